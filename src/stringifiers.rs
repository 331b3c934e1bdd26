use crate::common::{Int, Operator, UInt};
use crate::dice::RollConfig;
use crate::eval::{Roll, RollResult};
use crate::expr::Evaluation;
use crate::term::Term;

/// Renders rolled sections for people to read.
pub trait Stringify {
    fn stringify(&mut self, eval: &Evaluation) -> String {
        let mut parts = Vec::with_capacity(eval.terms.len() + 2);
        if let Some(label) = &eval.label {
            parts.push(format!("({})", label));
        }
        for (i, (op, term)) in eval.terms.iter().enumerate() {
            let term = self.str_term(term);
            parts.push(match (i, op) {
                (0, Operator::Sub) => format!("-{}", term),
                (_, Operator::Start) | (0, _) => term,
                (_, op) => format!("{} {}", op, term),
            });
        }
        parts.push(format!("= {}", self.str_total(eval.total)));
        parts.join(" ")
    }

    fn stringify_all(&mut self, evals: &[Evaluation]) -> String {
        evals
            .iter()
            .map(|eval| self.stringify(eval))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn str_term(&mut self, term: &Term) -> String {
        match term {
            Term::Roll(roll) => self.str_roll(roll),
            other => other.to_string(),
        }
    }

    fn str_roll(&mut self, roll: &Roll) -> String {
        match roll.last_results() {
            Some(results) => {
                let groups = results
                    .iter()
                    .map(|result| self.str_group(result, roll.config()))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{} {}", roll, groups)
            }
            None => roll.to_string(),
        }
    }

    fn str_group(&mut self, result: &RollResult, config: &RollConfig) -> String {
        let dice = result
            .tally()
            .iter()
            .enumerate()
            .map(|(i, &face)| self.str_die(face, result.is_kept(i), config))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", dice)
    }

    fn str_die(&mut self, face: UInt, _kept: bool, _config: &RollConfig) -> String {
        face.to_string()
    }

    fn str_total(&mut self, total: Int) -> String {
        total.to_string()
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Strikes through dropped dice and bolds natural highs and lows.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_die(&mut self, face: UInt, kept: bool, config: &RollConfig) -> String {
        let mut ret = face.to_string();
        if face == 1 || face == config.sides() {
            ret = format!("**{}**", ret);
        }
        if !kept {
            ret = format!("~~{}~~", ret);
        }
        ret
    }

    fn str_total(&mut self, total: Int) -> String {
        format!("`{}`", total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::SequenceRoller;
    use crate::roll::RollContext;
    use crate::Document;

    macro_rules! check {
        ($cls:ident, $input:expr, [$($value:expr),*], $expected:expr) => {
            let mut str = $cls::new();
            let mut ctx = RollContext::new(SequenceRoller::new(&[$($value),*]));
            let results = Document::parse($input).roll(&mut ctx);
            let actual = str.stringify_all(&results);
            assert_eq!(&actual, $expected);
        };
    }

    #[test]
    fn test_simple_stringify() {
        check!(SimpleStringifier, "(Attack) 1d20+8", [13], "(Attack) 1d20 [13] + 8 = 21");
        check!(SimpleStringifier, "4d6d1", [3, 1, 6, 4], "4d6d1 [3, 1, 6, 4] = 13");
        check!(SimpleStringifier, "2x1d4 - 1", [1, 4], "2x1d4 [1] [4] - 1 = 4");
        check!(SimpleStringifier, "foo + 2", [1], "foo + 2 = 2");
        check!(SimpleStringifier, "-2 + 1d4", [3], "-2 + 1d4 [3] = 1");
        check!(SimpleStringifier, "1d4, (Note)", [2], "1d4 [2] = 2, (Note) = 0");
    }

    #[test]
    fn test_markdown_stringify() {
        check!(MarkdownStringifier, "2 + 3", [1], "2 + 3 = `5`");
        check!(MarkdownStringifier, "4d6d1", [3, 1, 6, 4], "4d6d1 [3, ~~**1**~~, **6**, 4] = `13`");
        check!(MarkdownStringifier, "3d6e6", [6, 2, 3, 6], "3d6e [**6**, 2, 3, **6**] = `17`");
        check!(MarkdownStringifier, "(Save) 2d20k1", [8, 15], "(Save) 2d20k1 [~~8~~, 15] = `15`");
    }
}
