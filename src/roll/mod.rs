mod ctx;
pub(crate) mod roller;

pub use ctx::{DefaultRoller, Limits, RollContext};
pub use roller::Roller;
