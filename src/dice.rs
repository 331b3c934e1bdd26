use crate::common::{Float, Int, UInt};
use crate::error::ConfigError;
use crate::parse::{DiceParser, ParseError};
use std::fmt::{self, Write};

/// The parsed shape of a roll term such as `2x4d6e6k3r1`.
///
/// A zero in any modifier field means the modifier is disabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RollConfig {
    times: UInt,
    count: UInt,
    sides: UInt,
    explode: UInt,
    explode_indefinite: bool,
    reroll: UInt,
    keep: UInt,
    drop: UInt,
    multiplier: UInt,
    target: UInt,
}

impl RollConfig {
    /// Starts a configuration for `1d{sides}`.
    ///
    /// # Examples
    /// ```
    /// # use dice_notation::RollConfig;
    /// let config = RollConfig::builder(6).count(4).keep(3).build().unwrap();
    /// assert_eq!(config.to_string(), "4d6k3");
    ///
    /// assert!(RollConfig::builder(1).build().is_err());
    /// ```
    pub fn builder(sides: UInt) -> RollConfigBuilder {
        RollConfigBuilder::new(sides)
    }

    pub fn times(&self) -> UInt {
        self.times
    }

    pub fn count(&self) -> UInt {
        self.count
    }

    pub fn sides(&self) -> UInt {
        self.sides
    }

    pub fn explode(&self) -> UInt {
        self.explode
    }

    pub fn explode_indefinite(&self) -> bool {
        self.explode_indefinite
    }

    pub fn reroll(&self) -> UInt {
        self.reroll
    }

    pub fn keep(&self) -> UInt {
        self.keep
    }

    pub fn drop(&self) -> UInt {
        self.drop
    }

    pub fn multiplier(&self) -> UInt {
        self.multiplier
    }

    pub fn target(&self) -> UInt {
        self.target
    }

    pub fn explodes(&self) -> bool {
        self.explode > 0
    }

    /// A reroll threshold covering every face could never be satisfied, so it is ignored.
    pub fn rerolls(&self) -> bool {
        self.reroll > 0 && self.reroll < self.sides
    }

    fn selected_dice(&self) -> Int {
        let selected = if self.keep > 0 {
            self.keep.min(self.count)
        } else {
            self.count
        };
        Int::from(selected)
    }

    fn scale(&self) -> Int {
        Int::from(self.multiplier.max(1))
    }

    /// Highest possible total of a single group, ignoring explosions.
    pub fn maximum(&self) -> Int {
        self.selected_dice() * Int::from(self.sides) * self.scale()
    }

    /// Lowest possible total of a single group, ignoring explosions.
    pub fn minimum(&self) -> Int {
        let floor = if self.reroll >= self.sides {
            self.sides
        } else {
            self.reroll + 1
        };
        self.selected_dice() * Int::from(floor) * self.scale()
    }

    pub fn average(&self) -> Float {
        (self.maximum() + self.minimum()) as Float / 2.0
    }
}

impl fmt::Display for RollConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.times > 1 {
            write!(f, "{}x", self.times)?;
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.explodes() {
            if self.explode_indefinite {
                f.write_char('i')?;
            }
            f.write_char('e')?;
            if self.explode != self.sides {
                write!(f, "{}", self.explode)?;
            }
        }
        if self.multiplier > 1 {
            write!(f, "*{}", self.multiplier)?;
        }
        if self.keep > 0 {
            write!(f, "k{}", self.keep)?;
        }
        if self.drop > 0 {
            write!(f, "d{}", self.drop)?;
        }
        if self.reroll > 0 {
            write!(f, "r{}", self.reroll)?;
        }
        if self.target > 0 {
            write!(f, "t{}", self.target)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for RollConfig {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        DiceParser::new(&lowered).parse()
    }
}

/// Builds a [`RollConfig`], validating it in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct RollConfigBuilder {
    config: RollConfig,
}

impl RollConfigBuilder {
    fn new(sides: UInt) -> Self {
        Self {
            config: RollConfig {
                times: 1,
                count: 1,
                sides,
                explode: 0,
                explode_indefinite: false,
                reroll: 0,
                keep: 0,
                drop: 0,
                multiplier: 0,
                target: 0,
            },
        }
    }

    pub fn times(mut self, times: UInt) -> Self {
        self.config.times = times;
        self
    }

    pub fn count(mut self, count: UInt) -> Self {
        self.config.count = count;
        self
    }

    pub fn explode(mut self, threshold: UInt) -> Self {
        self.config.explode = threshold;
        self.config.explode_indefinite = false;
        self
    }

    pub fn explode_indefinitely(mut self, threshold: UInt) -> Self {
        self.config.explode = threshold;
        self.config.explode_indefinite = true;
        self
    }

    pub fn reroll(mut self, threshold: UInt) -> Self {
        self.config.reroll = threshold;
        self
    }

    pub fn keep(mut self, n: UInt) -> Self {
        self.config.keep = n;
        self
    }

    pub fn drop(mut self, n: UInt) -> Self {
        self.config.drop = n;
        self
    }

    pub fn multiplier(mut self, factor: UInt) -> Self {
        self.config.multiplier = factor;
        self
    }

    pub fn target(mut self, threshold: UInt) -> Self {
        self.config.target = threshold;
        self
    }

    /// # Errors
    /// Returns a [`ConfigError`] if `sides < 2`, `count == 0` or `times == 0`.
    pub fn build(self) -> Result<RollConfig, ConfigError> {
        let config = self.config;
        if config.sides < 2 {
            Err(ConfigError::TooFewSides(config.sides))
        } else if config.count == 0 {
            Err(ConfigError::ZeroCount)
        } else if config.times == 0 {
            Err(ConfigError::ZeroTimes)
        } else {
            Ok(config)
        }
    }
}
