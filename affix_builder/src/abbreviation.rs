use std::collections::{BTreeSet, HashMap};

/// Behaviour to expand an abbreviated option name into a registered one.
///
/// The parser consults the abbreviations only after a long option fails to match exactly.
/// An implementation must return `None` whenever the expansion is ambiguous; the parser then reports the option as unrecognised.
pub trait Abbreviations {
    /// Expand `candidate`.
    ///
    /// * `alternatives`: every registered alternative, in registration order.
    /// * `standards`: maps each alternative to its standard alternative.
    fn expand(
        &self,
        candidate: &str,
        alternatives: &[&str],
        standards: &HashMap<&str, &str>,
    ) -> Option<String>;
}

impl<F> Abbreviations for F
where
    F: Fn(&str, &[&str], &HashMap<&str, &str>) -> Option<String>,
{
    fn expand(
        &self,
        candidate: &str,
        alternatives: &[&str],
        standards: &HashMap<&str, &str>,
    ) -> Option<String> {
        self(candidate, alternatives, standards)
    }
}

/// Never expands anything: only exact option names are recognised.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAbbreviations;

impl Abbreviations for NoAbbreviations {
    fn expand(&self, _: &str, _: &[&str], _: &HashMap<&str, &str>) -> Option<String> {
        None
    }
}

/// Expands a prefix of alternative names, as long as every alternative it prefixes belongs to the same option.
/// The expansion is the standard alternative of that option.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{Abbreviations, StandardAbbreviations};
/// use std::collections::HashMap;
///
/// let alternatives = ["--verbose", "--version", "-V"];
/// let standards = HashMap::from([("--verbose", "--verbose"), ("--version", "-V"), ("-V", "-V")]);
///
/// assert_eq!(StandardAbbreviations.expand("--verb", &alternatives, &standards), Some("--verbose".to_string()));
/// assert_eq!(StandardAbbreviations.expand("--vers", &alternatives, &standards), Some("-V".to_string()));
/// assert_eq!(StandardAbbreviations.expand("--ver", &alternatives, &standards), None);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardAbbreviations;

impl Abbreviations for StandardAbbreviations {
    fn expand(
        &self,
        candidate: &str,
        alternatives: &[&str],
        standards: &HashMap<&str, &str>,
    ) -> Option<String> {
        if candidate.chars().count() == 1 {
            return Some(candidate.to_string());
        }

        let expansions: BTreeSet<&str> = alternatives
            .iter()
            .filter(|alternative| alternative.starts_with(candidate))
            .filter_map(|alternative| standards.get(alternative).copied())
            .collect();

        if expansions.len() == 1 {
            expansions.into_iter().next().map(str::to_string)
        } else {
            None
        }
    }
}
