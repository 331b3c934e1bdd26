use super::error::{ParseError, SourcePosition};
use super::lexer::{dice_lexer, DiceLexer, DiceToken};
use crate::common::{NonEmpty, UInt};
use crate::dice::RollConfig;
use logos_iter::LogosIter;

type PResult<T> = Result<T, ParseError>;

/// Reads one lowercased, whitespace-free roll term:
/// `[times x][count]d(sides|%)` followed by modifiers in any order.
pub struct DiceParser<'a> {
    lexer: DiceLexer<'a>,
}

impl<'a> DiceParser<'a> {
    const GROUP_DIGITS: usize = 2;
    const SIDES_DIGITS: usize = 3;
    const MODIFIER_DIGITS: usize = 3;
    const PERCENTILE: UInt = 100;

    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: dice_lexer(s),
        }
    }

    pub fn parse(mut self) -> PResult<RollConfig> {
        let mut times = 1;
        let mut count = 1;
        if self.matches(DiceToken::Number) {
            let n = self.parse_number(Self::GROUP_DIGITS)?;
            if self.matches(DiceToken::Times) {
                self.advance();
                times = n;
                if self.matches(DiceToken::Number) {
                    count = self.parse_number(Self::GROUP_DIGITS)?;
                }
            } else {
                count = n;
            }
        }
        self.consume(DiceToken::Dice)?;

        let sides = if self.matches(DiceToken::Percent) {
            self.advance();
            Self::PERCENTILE
        } else {
            self.parse_number(Self::SIDES_DIGITS)?
        };

        let mut builder = RollConfig::builder(sides).times(times).count(count);
        while let Some(modifier) = self.advance() {
            if !DiceToken::MODIFIERS.contains(&modifier) {
                return self.unexpected(modifier, DiceToken::MODIFIERS);
            }
            // A bare modifier letter stands for the die's side count.
            let amount = if self.matches(DiceToken::Number) {
                self.parse_number(Self::MODIFIER_DIGITS)?
            } else {
                sides
            };
            builder = match modifier {
                DiceToken::Explode => builder.explode(amount),
                DiceToken::ExplodeIndefinite => builder.explode_indefinitely(amount),
                DiceToken::Keep => builder.keep(amount),
                DiceToken::Dice => builder.drop(amount),
                DiceToken::Reroll => builder.reroll(amount),
                DiceToken::Multiply => builder.multiplier(amount),
                DiceToken::Target => builder.target(amount),
                _ => unreachable!("checked against MODIFIERS"),
            };
        }

        Ok(builder.build()?)
    }

    fn advance(&mut self) -> Option<DiceToken> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: DiceToken) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn consume(&mut self, expected: DiceToken) -> PResult<()> {
        match self.advance() {
            Some(found) if found == expected => Ok(()),
            Some(found) => self.unexpected(found, &[expected]),
            None => Err(Self::end(&[expected])),
        }
    }

    fn parse_number(&mut self, max_digits: usize) -> PResult<UInt> {
        self.consume(DiceToken::Number)?;
        let slice = self.lexer.slice();
        let value = if slice.len() > max_digits {
            None
        } else {
            slice.parse().ok()
        };
        value.ok_or_else(|| ParseError::TooManyDigits {
            pos: self.position(),
            max: max_digits,
        })
    }

    fn position(&mut self) -> SourcePosition {
        SourcePosition {
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        }
    }

    fn unexpected<T>(&mut self, found: DiceToken, expected: &[DiceToken]) -> PResult<T> {
        let expected = Self::describe(expected);
        Err(match found {
            DiceToken::Error => ParseError::UnexpectedToken {
                pos: self.position(),
                expected,
            },
            _ => ParseError::UnexpectedToken {
                pos: SourcePosition {
                    span: self.lexer.span(),
                    slice: found.to_string(),
                },
                expected,
            },
        })
    }

    fn end(expected: &[DiceToken]) -> ParseError {
        ParseError::UnexpectedEnd {
            expected: Self::describe(expected),
        }
    }

    fn describe(expected: &[DiceToken]) -> NonEmpty<String> {
        let names: Vec<String> = expected.iter().map(ToString::to_string).collect();
        NonEmpty::try_from_vec(names)
            .unwrap_or_else(|_| NonEmpty::new(DiceToken::Error.to_string()))
    }
}
