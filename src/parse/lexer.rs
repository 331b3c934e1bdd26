use crate::common::Operator;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

/// Tokens of a whitespace-stripped section.
#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum SectionToken {
    #[token("+", |_| Operator::Add)]
    #[token("-", |_| Operator::Sub)]
    Sign(Operator),

    #[regex(r"[0-9A-Za-z%*!]+")]
    Value,

    #[regex(r"\([^)]*\)")]
    Label,

    #[error]
    Error,
}

pub type DiceLexer<'a> = PeekableLexer<'a, LogosLexer<'a, DiceToken>, DiceToken>;

pub fn dice_lexer(s: &str) -> DiceLexer {
    DiceToken::lexer(s).peekable_lexer()
}

/// Tokens of a single lowercased roll term.
#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiceToken {
    #[regex(r"[0-9]+")]
    Number,

    #[token("x")]
    Times,
    // Both the dice separator and the drop modifier; the parser tells them apart.
    #[token("d")]
    Dice,
    #[token("%")]
    Percent,

    #[token("e")]
    #[token("!")]
    Explode,
    #[token("ie")]
    #[token("!!")]
    ExplodeIndefinite,
    #[token("k")]
    Keep,
    #[token("r")]
    Reroll,
    #[token("*")]
    Multiply,
    #[token("t")]
    Target,

    #[error]
    Error,
}

impl DiceToken {
    pub const MODIFIERS: &'static [Self] = &[
        Self::Explode,
        Self::ExplodeIndefinite,
        Self::Keep,
        Self::Dice,
        Self::Reroll,
        Self::Multiply,
        Self::Target,
    ];

    pub fn as_str(&self) -> &'static str {
        use DiceToken::*;

        match self {
            Number => "<number>",
            Times => "'x'",
            Dice => "'d'",
            Percent => "'%'",
            Explode => "'e'",
            ExplodeIndefinite => "'ie'",
            Keep => "'k'",
            Reroll => "'r'",
            Multiply => "'*'",
            Target => "'t'",
            Error => "<error>",
        }
    }
}

impl fmt::Display for DiceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
