use crate::common::NonEmpty;
use crate::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SourcePosition {
    pub span: logos::Span,
    pub slice: String,
}

/// Why a token could not be read as a roll term.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("(at position {}): unexpected token; found {:?}, expected {}", .pos.span.start, .pos.slice, .expected.fmt_expected())]
    UnexpectedToken {
        pos: SourcePosition,
        expected: NonEmpty<String>,
    },
    #[error("unexpected end of roll term; expected {}", .expected.fmt_expected())]
    UnexpectedEnd { expected: NonEmpty<String> },
    #[error("(at position {}): {:?} has more than {max} digits", .pos.span.start, .pos.slice)]
    TooManyDigits { pos: SourcePosition, max: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [String] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => unreachable!("NonEmpty cannot be empty"),
            [a] => a.to_owned(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}
