use super::roller::Roller;
use crate::common::UInt;

pub type DefaultRoller = rand::prelude::ThreadRng;

/// Safety bounds on the loops a single die can trigger.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Limits {
    /// Extra draws an original die may add by exploding.
    pub explode: usize,
    /// Redraws a single die may take to clear its reroll threshold; the last draw stands.
    pub reroll: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            explode: 20,
            reroll: 100,
        }
    }
}

/// The randomness source and limits used while rolling.
pub struct RollContext<R = DefaultRoller> {
    roller: R,
    limits: Limits,
}

impl<R: Roller> RollContext<R> {
    pub fn new(roller: R) -> Self {
        Self::with_limits(roller, Limits::default())
    }

    pub fn with_limits(roller: R, limits: Limits) -> Self {
        Self { roller, limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn roll_one(&mut self, sides: UInt) -> UInt {
        self.roller.roll(sides)
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::MaxRoller;

    #[test]
    fn test_default_limits() {
        let ctx = RollContext::new(MaxRoller);
        assert_eq!(ctx.limits(), Limits { explode: 20, reroll: 100 });
    }

    #[test]
    fn test_roll_one_uses_roller() {
        let mut ctx = RollContext::with_limits(MaxRoller, Limits { explode: 1, reroll: 1 });
        assert_eq!(ctx.roll_one(12), 12);
        assert_eq!(ctx.limits().explode, 1);
    }
}
