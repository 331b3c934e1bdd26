use crate::common::Int;
use crate::eval::Roll;
use crate::roll::{RollContext, Roller};
use std::fmt;

#[enum_dispatch::enum_dispatch]
pub trait Evaluate {
    /// Draws fresh dice for the term, if it has any.
    fn roll<R: Roller>(&mut self, _ctx: &mut RollContext<R>) {}

    /// The term's contribution to its section, rolling first if it never has.
    fn value<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Int;

    /// Whether the term takes part in totals at all.
    fn scoreable(&self) -> bool {
        true
    }
}

/// One operand of a section.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Evaluate)]
pub enum Term {
    Literal(Literal),
    Label(Label),
    Roll(Roll),
    Opaque(Opaque),
}

impl Term {
    pub fn as_roll(&self) -> Option<&Roll> {
        match self {
            Self::Roll(roll) => Some(roll),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(x) => fmt::Display::fmt(x, f),
            Self::Label(x) => fmt::Display::fmt(x, f),
            Self::Roll(x) => fmt::Display::fmt(x, f),
            Self::Opaque(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Literal(pub Int);

impl Evaluate for Literal {
    fn value<R: Roller>(&mut self, _ctx: &mut RollContext<R>) -> Int {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Decorative text; never part of a total.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Label(pub String);

impl Evaluate for Label {
    fn value<R: Roller>(&mut self, _ctx: &mut RollContext<R>) -> Int {
        0
    }

    fn scoreable(&self) -> bool {
        false
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

/// A token that is neither a number nor a roll; echoed back as written and worth 0.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Opaque(pub String);

impl Evaluate for Opaque {
    fn value<R: Roller>(&mut self, _ctx: &mut RollContext<R>) -> Int {
        0
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Evaluate for Roll {
    fn roll<R: Roller>(&mut self, ctx: &mut RollContext<R>) {
        Roll::roll(self, ctx);
    }

    fn value<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Int {
        self.total(ctx)
    }
}
