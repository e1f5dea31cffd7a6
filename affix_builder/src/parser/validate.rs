use std::collections::HashSet;

use crate::api::{OptionDefinition, Registry};
use crate::parser::ParseResult;

/// The outcome of a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    /// The parse result satisfies the validator.
    Passed,
    /// The parse result violates the validator; the violation has been reported.
    Failed,
    /// The parse result violates the validator, and the program should exit with this status.
    Exit(i32),
}

impl Verdict {
    pub(crate) fn new(passed: bool, exit_value: Option<i32>) -> Self {
        match (passed, exit_value) {
            (true, _) => Verdict::Passed,
            (false, None) => Verdict::Failed,
            (false, Some(code)) => Verdict::Exit(code),
        }
    }

    /// Whether the validator passed.
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Exit the process on [`Verdict::Exit`]; otherwise whether the validator passed.
    pub fn enforce(self) -> bool {
        match self {
            Verdict::Exit(code) => std::process::exit(code),
            verdict => verdict.passed(),
        }
    }
}

/// The keys (standard and, once supported, alternatives) under which each used option appears, in registration order.
fn used_keys<'r, 'a>(
    registry: &'r Registry<'a>,
    result: &'r ParseResult,
) -> Vec<(&'r OptionDefinition<'a>, Vec<&'r str>)> {
    registry
        .options()
        .iter()
        .filter(|definition| result.is_used(definition.standard()))
        .map(|definition| {
            let keys = definition
                .alternatives()
                .iter()
                .map(String::as_str)
                .filter(|alternative| {
                    *alternative == definition.standard()
                        || result.values.contains_key(*alternative)
                })
                .collect();
            (definition, keys)
        })
        .collect()
}

fn qualified(name: &str, standard: &str) -> String {
    if name == standard {
        name.to_string()
    } else {
        format!("{name}({standard})")
    }
}

/// Describe the conflict when more than one used option is named in `exclusives`.
pub(crate) fn conflict(
    registry: &Registry,
    result: &ParseResult,
    exclusives: &[&str],
) -> Option<String> {
    let exclusives: HashSet<&str> = exclusives.iter().copied().collect();
    let mut participants = 0;
    let mut message = "conflicting options:".to_string();

    for (definition, keys) in used_keys(registry, result) {
        let matched: Vec<&str> = keys
            .into_iter()
            .filter(|key| exclusives.contains(key))
            .collect();

        if !matched.is_empty() {
            participants += 1;

            for key in matched {
                message.push(' ');
                message.push_str(&qualified(key, definition.standard()));
            }
        }
    }

    if participants > 1 {
        Some(message)
    } else {
        None
    }
}

/// Describe every used option that is not named in `allowed`.
pub(crate) fn out_of_context(
    registry: &Registry,
    result: &ParseResult,
    allowed: &[&str],
) -> Vec<String> {
    let allowed: HashSet<&str> = allowed.iter().copied().collect();

    used_keys(registry, result)
        .into_iter()
        .filter(|(_, keys)| !keys.iter().any(|key| allowed.contains(key)))
        .flat_map(|(definition, keys)| {
            keys.into_iter().map(move |key| {
                format!(
                    "option used out of context: {}",
                    qualified(key, definition.standard())
                )
            })
        })
        .collect()
}

/// Whether the number of positional arguments is within the (inclusive) bounds.
pub(crate) fn file_count(result: &ParseResult, minimum: usize, maximum: Option<usize>) -> bool {
    let count = result.files().len();
    minimum <= count && maximum.map_or(true, |maximum| count <= maximum)
}
