//! Parsing and rolling of tabletop dice notation such as `(Attack) 1d20+8, (Damage) 2d8 + 8`.
//!
//! Parsing never fails: text that is not a number or a roll is kept as an opaque term
//! worth nothing and echoed back as written.
//!
//! ```
//! let results = dice_notation::roll("(Damage) 2d8 + 8");
//! assert_eq!(results[0].label.as_deref(), Some("Damage"));
//! assert!((10..=24).contains(&results[0].total));
//! ```

mod common;
mod dice;
mod document;
mod error;
mod eval;
mod expr;
mod parse;
mod roll;
pub mod stringifiers;
mod term;

#[cfg(test)]
mod test_strategies;

pub use common::{Float, Int, NonEmpty, Operator, UInt};
pub use dice::{RollConfig, RollConfigBuilder};
pub use document::Document;
pub use error::ConfigError;
pub use eval::{Roll, RollResult};
pub use expr::{Evaluation, Expression};
pub use parse::{ParseError, SourcePosition};
pub use roll::{DefaultRoller, Limits, RollContext, Roller};
pub use stringifiers::{MarkdownStringifier, SimpleStringifier, Stringify};
pub use term::{Evaluate, Label, Literal, Opaque, Term};

/// Parses `s` and rolls every section with the thread-local generator.
pub fn roll(s: &str) -> Vec<Evaluation> {
    Document::parse(s).roll(&mut RollContext::default())
}
