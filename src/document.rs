use crate::expr::{Evaluation, Expression};
use crate::roll::{RollContext, Roller};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A parsed notation string such as `(Attack) 1d20+8, (Damage) 2d8 + 8`.
///
/// # Examples
/// ```
/// # use dice_notation::{Document, RollContext};
/// let mut doc = Document::parse("(Attack) 1d20+8, (Damage) 2d8 + 8 + 1d6 - 3");
/// assert_eq!(doc.to_string(), "(Attack) 1d20 + 8, (Damage) 2d8 + 8 + 1d6 - 3");
///
/// let results = doc.roll(&mut RollContext::default());
/// assert_eq!(results.len(), 2);
/// assert!((9..=28).contains(&results[0].total));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    sections: Vec<Expression>,
}

impl Document {
    pub fn parse(s: &str) -> Self {
        crate::parse::parse(s)
    }

    pub fn sections(&self) -> &[Expression] {
        &self.sections
    }

    /// Rolls every section in order, drawing fresh dice each call.
    pub fn roll<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Vec<Evaluation> {
        self.sections
            .iter_mut()
            .map(|section| section.evaluate(ctx))
            .collect()
    }
}

impl FromIterator<Expression> for Document {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(section, f)?;
        }
        Ok(())
    }
}
