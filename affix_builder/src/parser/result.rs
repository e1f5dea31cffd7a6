use std::collections::HashMap;

/// The values captured for one option: one entry per occurrence.
/// `None` marks an occurrence which captured no value.
pub type Occurrences = Vec<Option<String>>;

/// The outcome of parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub(crate) arguments: Vec<String>,
    // standard alternative (or, after `support_alternatives`, any alternative) -> occurrences
    // `None` means the option was never used.
    pub(crate) values: HashMap<String, Option<Occurrences>>,
    pub(crate) standards: HashMap<String, String>,
    pub(crate) files: Vec<String>,
    pub(crate) message: Option<String>,
    pub(crate) unrecognised_count: usize,
}

impl ParseResult {
    pub(crate) fn new(
        arguments: Vec<String>,
        standards: HashMap<String, String>,
        values: HashMap<String, Option<Occurrences>>,
    ) -> Self {
        Self {
            arguments,
            values,
            standards,
            files: Vec::default(),
            message: None,
            unrecognised_count: 0,
        }
    }

    /// The tokens that were parsed, as given.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Whether no unrecognised option was encountered.
    pub fn success(&self) -> bool {
        self.unrecognised_count == 0
    }

    /// The number of unrecognised options encountered.
    pub fn unrecognised_count(&self) -> usize {
        self.unrecognised_count
    }

    /// The positional arguments (files): tokens consumed neither as an option nor as an option's value.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The positional arguments joined by single spaces; `None` when there are none.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The occurrences of the option keyed by `name`, or `None` if it was never used.
    ///
    /// Values are keyed by standard alternative.
    /// After [`ParseResult::support_alternatives`] they may be looked up by any alternative.
    pub fn values(&self, name: &str) -> Option<&[Option<String>]> {
        self.values
            .get(name)
            .and_then(|occurrences| occurrences.as_deref())
    }

    /// Whether the option keyed by `name` was used.
    pub fn is_used(&self, name: &str) -> bool {
        self.values(name).is_some()
    }

    /// The number of occurrences of the option keyed by `name`.
    pub fn count(&self, name: &str) -> usize {
        self.values(name).map_or(0, <[Option<String>]>::len)
    }

    /// Every key with its occurrences (`None` for unused options).
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&[Option<String>]>)> {
        self.values
            .iter()
            .map(|(name, occurrences)| (name.as_str(), occurrences.as_deref()))
    }

    /// Make every alternative a key of the values, alongside the standard alternatives.
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumented, CommandLineParser, Syntax};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Argumented::new(["-l", "--line"]))
    ///     .build();
    ///
    /// let mut result = parser.parse_tokens(&["--line", "3"], Syntax::Conventional).unwrap();
    /// assert_eq!(result.values("--line"), None);
    ///
    /// result.support_alternatives();
    /// assert_eq!(result.values("--line"), result.values("-l"));
    /// assert_eq!(result.values("--line").unwrap(), &[Some("3".to_string())]);
    /// ```
    pub fn support_alternatives(&mut self) {
        for (alternative, standard) in &self.standards {
            let occurrences = self.values.get(standard).cloned().flatten();
            self.values.insert(alternative.clone(), occurrences);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ParseResult {
        let standards = HashMap::from([
            ("-a".to_string(), "-a".to_string()),
            ("--all".to_string(), "-a".to_string()),
            ("-l".to_string(), "--line".to_string()),
            ("--line".to_string(), "--line".to_string()),
        ]);
        let values = HashMap::from([
            ("-a".to_string(), Some(vec![None, None])),
            ("--line".to_string(), None),
        ]);
        ParseResult::new(vec!["-aa".to_string()], standards, values)
    }

    #[test]
    fn accessors() {
        let result = result();

        assert_eq!(result.arguments(), &["-aa".to_string()]);
        assert!(result.success());
        assert_eq!(result.unrecognised_count(), 0);
        assert!(result.files().is_empty());
        assert_eq!(result.message(), None);
        assert_eq!(result.values("-a"), Some(&[None, None][..]));
        assert!(result.is_used("-a"));
        assert_eq!(result.count("-a"), 2);
        assert_eq!(result.values("--line"), None);
        assert!(!result.is_used("--line"));
        assert_eq!(result.count("--line"), 0);
        // Alternatives aren't keys until supported.
        assert!(!result.is_used("--all"));
        assert_eq!(result.entries().count(), 2);
    }

    #[test]
    fn support_alternatives() {
        let mut result = result();

        result.support_alternatives();

        assert_eq!(result.values("--all"), Some(&[None, None][..]));
        assert_eq!(result.values("-a"), Some(&[None, None][..]));
        assert_eq!(result.values("-l"), None);
        assert_eq!(result.entries().count(), 4);
    }

    #[test]
    fn support_alternatives_idempotent() {
        let mut once = result();
        once.support_alternatives();
        let mut twice = once.clone();

        twice.support_alternatives();

        assert_eq!(once, twice);
    }

    #[test]
    fn failure() {
        let mut result = result();
        result.unrecognised_count = 2;

        assert!(!result.success());
    }
}
