use crate::common::*;
use crate::dice::RollConfig;
use crate::roll::{RollContext, Roller};
use std::fmt;
use tracing::{debug, trace};

/// One rolled group: every face drawn, and the group's score.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RollResult {
    tally: NonEmpty<UInt>,
    kept: Vec<bool>,
    total: Int,
}

impl RollResult {
    fn score(config: &RollConfig, tally: NonEmpty<UInt>) -> Self {
        let mut order: Vec<usize> = (0..tally.len()).collect();
        order.sort_by(|&a, &b| tally[b].cmp(&tally[a]));

        let selected = if config.keep() > 0 {
            config.keep() as usize
        } else if config.drop() > 0 {
            tally.len().saturating_sub(config.drop() as usize)
        } else {
            tally.len()
        };

        let mut kept = vec![false; tally.len()];
        for &i in order.iter().take(selected) {
            kept[i] = true;
        }

        let chosen = order.iter().take(selected).map(|&i| tally[i]);
        let mut total = if config.target() > 0 {
            chosen.filter(|&face| face >= config.target()).count() as Int
        } else {
            chosen.map(Int::from).sum()
        };
        if config.multiplier() > 1 {
            total *= Int::from(config.multiplier());
        }

        Self { tally, kept, total }
    }

    /// Every face drawn for the group, in draw order.
    pub fn tally(&self) -> &[UInt] {
        self.tally.as_slice()
    }

    pub fn total(&self) -> Int {
        self.total
    }

    /// Whether the die at `index` survived keep/drop selection.
    pub fn is_kept(&self, index: usize) -> bool {
        self.kept.get(index).copied().unwrap_or(false)
    }
}

impl RollConfig {
    fn roll_die<R: Roller>(&self, ctx: &mut RollContext<R>) -> UInt {
        let mut value = ctx.roll_one(self.sides());
        if self.rerolls() {
            let limit = ctx.limits().reroll;
            let mut redraws = 0;
            while value <= self.reroll() {
                if redraws == limit {
                    debug!(limit, value, "reroll limit reached; keeping last draw");
                    break;
                }
                value = ctx.roll_one(self.sides());
                redraws += 1;
            }
        }
        value
    }

    fn roll_group<R: Roller>(&self, ctx: &mut RollContext<R>) -> RollResult {
        let count = self.count() as usize;
        let mut tally = NonEmpty::new(self.roll_die(ctx));
        for _ in 1..count {
            tally.push(self.roll_die(ctx));
        }

        if self.explodes() {
            let limit = ctx.limits().explode;
            for i in 0..count {
                let mut last = tally[i];
                let mut extra = 0;
                while last >= self.explode() {
                    if extra == limit {
                        debug!(limit, die = i, "explode limit reached");
                        break;
                    }
                    last = self.roll_die(ctx);
                    tally.push(last);
                    extra += 1;
                    if !self.explode_indefinite() {
                        break;
                    }
                }
            }
        }

        let result = RollResult::score(self, tally);
        trace!(dice = %self, tally = ?result.tally(), total = result.total(), "rolled group");
        result
    }

    fn roll_groups<R: Roller>(&self, ctx: &mut RollContext<R>) -> NonEmpty<RollResult> {
        let mut groups = NonEmpty::new(self.roll_group(ctx));
        for _ in 1..self.times() {
            groups.push(self.roll_group(ctx));
        }
        groups
    }
}

/// A dice term together with its most recent results.
///
/// Results are rolled lazily the first time they are read and stay cached until
/// [`roll`](Self::roll) is called again.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll {
    config: RollConfig,
    results: Option<NonEmpty<RollResult>>,
}

impl Roll {
    pub fn new(config: RollConfig) -> Self {
        Self {
            config,
            results: None,
        }
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// Rolls every group afresh, replacing any earlier results.
    pub fn roll<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> &NonEmpty<RollResult> {
        let results = self.config.roll_groups(ctx);
        self.results.insert(results)
    }

    /// The cached results, rolling first if this term has never been rolled.
    pub fn results<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> &NonEmpty<RollResult> {
        let config = &self.config;
        self.results.get_or_insert_with(|| config.roll_groups(ctx))
    }

    pub fn last_results(&self) -> Option<&NonEmpty<RollResult>> {
        self.results.as_ref()
    }

    pub fn total<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Int {
        self.results(ctx).iter().map(RollResult::total).sum()
    }

    pub fn tally<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Vec<&[UInt]> {
        self.results(ctx).iter().map(RollResult::tally).collect()
    }

    pub fn maximum(&self) -> Int {
        self.config.maximum()
    }

    pub fn minimum(&self) -> Int {
        self.config.minimum()
    }

    pub fn average(&self) -> Float {
        self.config.average()
    }
}

impl From<RollConfig> for Roll {
    fn from(config: RollConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.config, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::{MaxRoller, SequenceRoller};
    use crate::roll::Limits;
    use crate::test_strategies::{config_strategy, plain_config_strategy};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn roll(s: &str, values: &[UInt]) -> Roll {
        let mut ctx = RollContext::new(SequenceRoller::new(values));
        let mut roll = Roll::new(s.parse().unwrap());
        roll.roll(&mut ctx);
        roll
    }

    fn check(s: &str, values: &[UInt], tally: &[&[UInt]], total: Int) {
        let roll = roll(s, values);
        let results = roll.last_results().unwrap();
        let actual: Vec<&[UInt]> = results.iter().map(RollResult::tally).collect();
        assert_eq!(actual, tally, "tally of {}", s);
        let actual_total: Int = results.iter().map(RollResult::total).sum();
        assert_eq!(actual_total, total, "total of {}", s);
    }

    #[test]
    fn test_roll_max() {
        let mut ctx = RollContext::new(MaxRoller);
        let mut roll = Roll::new("3d6".parse().unwrap());
        assert_eq!(roll.tally(&mut ctx), vec![&[6u32, 6, 6][..]]);
        assert_eq!(roll.total(&mut ctx), 18);
    }

    #[test]
    fn test_roll_plain() {
        check("3d6", &[3, 4, 5], &[&[3, 4, 5]], 12);
        check("1d20", &[13], &[&[13]], 13);
    }

    #[test]
    fn test_roll_explode() {
        check("3d6e6", &[6, 2, 3, 6], &[&[6, 2, 3, 6]], 17);
        check("3d6e5", &[5, 6, 1, 2, 3], &[&[5, 6, 1, 2, 3]], 17);
        // a plain explode only adds one die per qualifying original
        check("1d6e", &[6, 6, 6], &[&[6, 6]], 12);
        check("1d6ie", &[6, 6, 2], &[&[6, 6, 2]], 14);
    }

    #[test]
    fn test_roll_explode_limit() {
        let mut ctx = RollContext::new(MaxRoller);
        let mut roll = Roll::new("1d6ie".parse().unwrap());
        assert_eq!(roll.tally(&mut ctx)[0].len(), 21);
        assert_eq!(roll.total(&mut ctx), 21 * 6);

        let limits = Limits {
            explode: 3,
            ..Limits::default()
        };
        let mut ctx = RollContext::with_limits(MaxRoller, limits);
        let mut roll = Roll::new("2d6!!".parse().unwrap());
        assert_eq!(roll.tally(&mut ctx)[0].len(), 8);
    }

    #[test]
    fn test_roll_keep_drop() {
        check("3d6k1", &[2, 5, 1], &[&[2, 5, 1]], 5);
        check("3d6d1", &[2, 5, 1], &[&[2, 5, 1]], 7);
        check("4d6k3", &[3, 1, 6, 4], &[&[3, 1, 6, 4]], 13);
        // keep takes precedence over drop
        check("3d6k1d1", &[2, 5, 1], &[&[2, 5, 1]], 5);
        check("2d6d5", &[2, 5], &[&[2, 5]], 0);
        check("2d6k5", &[2, 5], &[&[2, 5]], 7);
    }

    #[test]
    fn test_roll_kept_marks() {
        let roll = roll("3d6d1", &[2, 5, 1]);
        let result = &roll.last_results().unwrap()[0];
        assert!(result.is_kept(0));
        assert!(result.is_kept(1));
        assert!(!result.is_kept(2));
        assert!(!result.is_kept(3));
    }

    #[test]
    fn test_roll_target() {
        check("3d6t4", &[2, 5, 6], &[&[2, 5, 6]], 2);
        check("3d6t4k1", &[2, 5, 6], &[&[2, 5, 6]], 1);
        check("3d6t4*2", &[2, 5, 6], &[&[2, 5, 6]], 4);
    }

    #[test]
    fn test_roll_reroll() {
        check("1d6r2", &[1, 2, 5], &[&[5]], 5);
        check("2d6r1", &[1, 3, 1, 1, 4], &[&[3, 4]], 7);
        // a threshold covering every face is ignored
        check("1d6r6", &[1], &[&[1]], 1);
    }

    #[test]
    fn test_roll_reroll_limit() {
        let limits = Limits {
            reroll: 2,
            ..Limits::default()
        };
        let mut ctx = RollContext::with_limits(SequenceRoller::new(&[1]), limits);
        let mut roll = Roll::new("1d6r3".parse().unwrap());
        assert_eq!(roll.total(&mut ctx), 1);
    }

    #[test]
    fn test_roll_times_and_multiplier() {
        check("2x3d6", &[1, 2, 3, 4, 5, 6], &[&[1, 2, 3], &[4, 5, 6]], 21);
        check("2d6*3", &[2, 3], &[&[2, 3]], 15);
        check("2x1d4*2", &[1, 4], &[&[1], &[4]], 10);
    }

    #[test]
    fn test_lazy_results() {
        let mut roll = Roll::new("2d6".parse().unwrap());
        assert!(roll.last_results().is_none());

        let mut ctx = RollContext::new(SequenceRoller::new(&[1, 2]));
        assert_eq!(roll.total(&mut ctx), 3);

        // reading again does not roll again
        let mut ctx = RollContext::new(MaxRoller);
        assert_eq!(roll.total(&mut ctx), 3);

        roll.roll(&mut ctx);
        assert_eq!(roll.total(&mut ctx), 12);
    }

    #[test]
    fn test_roll_with_seeded_rng() {
        let mut a = Roll::new("4x3d8e".parse().unwrap());
        let mut b = a.clone();
        a.roll(&mut RollContext::new(StdRng::seed_from_u64(42)));
        b.roll(&mut RollContext::new(StdRng::seed_from_u64(42)));
        assert_eq!(a.last_results(), b.last_results());
    }

    proptest! {
        #[test]
        fn test_tally_at_least_count(c in config_strategy(), seed: u64) {
            let mut ctx = RollContext::new(StdRng::seed_from_u64(seed));
            let mut roll = Roll::new(c);
            let results = roll.roll(&mut ctx);
            prop_assert_eq!(results.len(), c.times() as usize);
            for result in results.iter() {
                prop_assert!(result.tally().len() >= c.count() as usize);
                prop_assert!(result.tally().iter().all(|&face| (1..=c.sides()).contains(&face)));
            }
        }

        #[test]
        fn test_plain_total_within_bounds(c in plain_config_strategy(), seed: u64) {
            let mut ctx = RollContext::new(StdRng::seed_from_u64(seed));
            let total = Roll::new(c).total(&mut ctx);
            prop_assert!(c.minimum() <= total && total <= c.maximum());
        }
    }
}
