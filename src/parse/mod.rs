mod error;
mod lexer;
mod parser;

pub use error::{ParseError, SourcePosition};
pub(crate) use parser::DiceParser;

use crate::common::{Int, Operator};
use crate::document::Document;
use crate::eval::Roll;
use crate::expr::Expression;
use crate::term::{Literal, Opaque, Term};
use lexer::SectionToken;
use logos::Logos;
use std::ops::Range;
use tracing::debug;

/// Parses a full notation string. Never fails: anything unrecognized becomes opaque text.
pub(crate) fn parse(s: &str) -> Document {
    if s.trim().is_empty() {
        return Document::default();
    }
    let sections: Vec<Expression> = s.split(',').map(parse_section).collect();
    // Nothing but an empty label, such as `()`.
    if let [only] = sections.as_slice() {
        if only.is_empty() && only.label().is_none() {
            return Document::default();
        }
    }
    sections.into_iter().collect()
}

fn parse_section(section: &str) -> Expression {
    let (label, rest) = split_label(section);
    let stripped: String = rest.chars().filter(|c| !c.is_whitespace()).collect();

    let mut expr = Expression::new(label);
    let mut sign = None;
    // Adjacent unmatched characters are kept together as one opaque term.
    let mut junk: Option<Range<usize>> = None;
    let mut lexer = SectionToken::lexer(&stripped);
    while let Some(token) = lexer.next() {
        if token == SectionToken::Error {
            let span = lexer.span();
            junk = Some(junk.map_or(span.clone(), |run| run.start..span.end));
            continue;
        }
        if let Some(run) = junk.take() {
            push_junk(&mut expr, &mut sign, &stripped, run);
        }
        match token {
            SectionToken::Sign(op) => sign = Some(op),
            SectionToken::Value => push_term(&mut expr, &mut sign, classify(lexer.slice())),
            SectionToken::Label => debug!(label = lexer.slice(), "ignoring extra label"),
            SectionToken::Error => {}
        }
    }
    if let Some(run) = junk {
        push_junk(&mut expr, &mut sign, &stripped, run);
    }
    expr
}

fn push_term(expr: &mut Expression, sign: &mut Option<Operator>, term: Term) {
    let op = match (expr.is_empty(), sign.take()) {
        (true, Some(Operator::Sub)) => Operator::Sub,
        (true, _) => Operator::Start,
        (false, op) => op.unwrap_or(Operator::Add),
    };
    expr.push(op, term);
}

fn push_junk(
    expr: &mut Expression,
    sign: &mut Option<Operator>,
    source: &str,
    run: Range<usize>,
) {
    if let Some(text) = source.get(run) {
        debug!(text, "keeping unexpected input as plain text");
        push_term(expr, sign, Opaque(text.to_string()).into());
    }
}

/// Cuts the first `(...)` out of a section.
fn split_label(section: &str) -> (Option<String>, String) {
    let found = section.find('(').and_then(|open| {
        section[open + 1..]
            .find(')')
            .map(|len| (open, open + 1 + len))
    });
    match found {
        Some((open, close)) => {
            let text = section[open + 1..close].trim();
            let label = (!text.is_empty()).then(|| text.to_string());
            let rest = format!("{}{}", &section[..open], &section[close + 1..]);
            (label, rest)
        }
        None => (None, section.to_string()),
    }
}

fn classify(token: &str) -> Term {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = token.parse::<Int>() {
            return Literal(value).into();
        }
    }
    match DiceParser::new(&token.to_ascii_lowercase()).parse() {
        Ok(config) => Roll::new(config).into(),
        Err(why) => {
            debug!(token, %why, "treating token as plain text");
            Opaque(token.to_string()).into()
        }
    }
}
