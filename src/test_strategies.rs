use crate::dice::RollConfig;
use proptest::prelude::*;

pub(crate) fn config_strategy() -> impl Strategy<Value = RollConfig> {
    (1..=3u32, 1..=10u32, 2..=100u32)
        .prop_flat_map(|(times, count, sides)| {
            (
                Just((times, count, sides)),
                0..=sides,
                any::<bool>(),
                0..=sides,
                0..=count + 1,
                0..=count,
                0..=4u32,
                0..=sides,
            )
        })
        .prop_map(
            |((times, count, sides), explode, indefinite, reroll, keep, drop, multiplier, target)| {
                let builder = RollConfig::builder(sides).times(times).count(count);
                let builder = if indefinite {
                    builder.explode_indefinitely(explode)
                } else {
                    builder.explode(explode)
                };
                builder
                    .reroll(reroll)
                    .keep(keep)
                    .drop(drop)
                    .multiplier(multiplier)
                    .target(target)
                    .build()
                    .unwrap()
            },
        )
}

/// Single-group configs without explode, drop or target, whose totals stay inside
/// `minimum()..=maximum()`.
pub(crate) fn plain_config_strategy() -> impl Strategy<Value = RollConfig> {
    (1..=10u32, 2..=100u32)
        .prop_flat_map(|(count, sides)| {
            (Just((count, sides)), 0..=sides / 2, 0..=count + 1, 0..=4u32)
        })
        .prop_map(|((count, sides), reroll, keep, multiplier)| {
            RollConfig::builder(sides)
                .count(count)
                .reroll(reroll)
                .keep(keep)
                .multiplier(multiplier)
                .build()
                .unwrap()
        })
}

pub(crate) fn term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..1000i64).prop_map(|n| n.to_string()),
        config_strategy().prop_map(|c| c.to_string()),
        "[a-z]{1,6}",
        "[?#@~]{1,3}",
    ]
}

fn sign_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" + "), Just(" - "), Just("+"), Just("-")]
}

pub(crate) fn section_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of("[A-Za-z][A-Za-z ]{0,8}"),
        any::<bool>(),
        prop::collection::vec((sign_strategy(), term_strategy()), 0..4),
    )
        .prop_map(|(label, negate, terms)| {
            let mut ret = String::new();
            if let Some(label) = label {
                ret.push_str(&format!("({}) ", label));
            }
            for (i, (sign, term)) in terms.into_iter().enumerate() {
                if i > 0 {
                    ret.push_str(sign);
                } else if negate {
                    ret.push('-');
                }
                ret.push_str(&term);
            }
            ret
        })
}

pub(crate) fn notation_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(section_strategy(), 1..4).prop_map(|sections| sections.join(", "))
}
