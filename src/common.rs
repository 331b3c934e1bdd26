use std::fmt::{self, Write};
pub use vec1::vec1;

/// Signed totals.
pub type Int = i64;
/// Face values, side counts and modifier amounts.
pub type UInt = u32;
/// Analytic averages.
pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// How a term combines with the running total of its section.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    /// The first term of a section.
    Start,
    Add,
    Sub,
}

impl Operator {
    /// Folds `value` into `total`, saturating at the bounds of [`Int`].
    pub fn apply(self, total: Int, value: Int) -> Int {
        match self {
            Self::Start | Self::Add => total.saturating_add(value),
            Self::Sub => total.saturating_sub(value),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => Ok(()),
            Self::Add => f.write_char('+'),
            Self::Sub => f.write_char('-'),
        }
    }
}
