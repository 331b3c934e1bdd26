use crate::common::{Int, Operator};
use crate::roll::{RollContext, Roller};
use crate::term::{Evaluate, Term};
use std::fmt;

/// One comma-separated section of a notation string, e.g. `(Damage) 2d8 + 8`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    label: Option<String>,
    terms: Vec<(Operator, Term)>,
}

impl Expression {
    pub fn new(label: Option<String>) -> Self {
        Self {
            label,
            terms: Vec::new(),
        }
    }

    pub fn push(&mut self, op: Operator, term: impl Into<Term>) {
        self.terms.push((op, term.into()));
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn terms(&self) -> &[(Operator, Term)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Rolls every dice term afresh and sums the section.
    pub fn evaluate<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> Evaluation {
        let mut total = 0;
        let mut label = self.label.clone();
        let mut terms = Vec::with_capacity(self.terms.len());

        for (op, term) in &mut self.terms {
            term.roll(ctx);
            if !term.scoreable() {
                if let (None, Term::Label(text)) = (&label, &*term) {
                    label = Some(text.0.clone());
                }
                continue;
            }
            total = op.apply(total, term.value(ctx));
            terms.push((*op, term.clone()));
        }

        Evaluation {
            total,
            terms,
            label,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(label) = &self.label {
            write!(f, "({})", label)?;
            first = false;
        }
        for (op, term) in &self.terms {
            match (first, op) {
                (true, Operator::Sub) => write!(f, "-{}", term)?,
                (true, _) => write!(f, "{}", term)?,
                (false, Operator::Start) => write!(f, " {}", term)?,
                (false, _) => write!(f, " {} {}", op, term)?,
            }
            first = false;
        }
        Ok(())
    }
}

/// The outcome of rolling one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub total: Int,
    /// The scoring terms with their rolled dice, in section order.
    pub terms: Vec<(Operator, Term)>,
    pub label: Option<String>,
}
