use crate::common::UInt;
use rand::Rng;

/// A source of die faces.
pub trait Roller {
    /// Returns a uniformly distributed value in `1..=sides`.
    fn roll(&mut self, sides: UInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: UInt) -> UInt {
        self.gen_range(1..=sides)
    }
}

#[cfg(test)]
pub(crate) use mock::{MaxRoller, SequenceRoller};
