/// The shape of an option: how many values each occurrence takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Takes no value (ex: `--verbose`).
    Argumentless,
    /// Takes exactly one value per occurrence (ex: `--line 3`, `--line=3`, `-l3`).
    Argumented,
    /// Takes zero or one value per occurrence.
    /// A detached value is only accepted when the option's stickless predicate allows it.
    OptArgumented,
    /// Takes every remaining token as its values, and absorbs the positional arguments.
    Variadic,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Selects which alternative of an option is its *standard* alternative.
/// The standard alternative keys the option's values in the [`ParseResult`](crate::ParseResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standard {
    /// The alternative at this index.
    ByIndex(usize),
    /// The alternative with this name; it must be one of the option's alternatives.
    ByName(String),
}

impl Default for Standard {
    fn default() -> Self {
        Standard::ByIndex(0)
    }
}

impl From<usize> for Standard {
    fn from(value: usize) -> Self {
        Standard::ByIndex(value)
    }
}

impl From<&str> for Standard {
    fn from(value: &str) -> Self {
        Standard::ByName(value.to_string())
    }
}

impl From<String> for Standard {
    fn from(value: String) -> Self {
        Standard::ByName(value)
    }
}

/// How option tokens are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// `--name` and `++name` are long options, while `-abc` and `+abc` are clusters of short options.
    #[default]
    Conventional,
    /// Every token starting with `-` or `+` names exactly one option (ex: `-name`, `+name`).
    Alternative,
}
