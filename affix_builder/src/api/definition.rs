use std::cell::RefCell;
use thiserror::Error;

use crate::constant::DEFAULT_ARGUMENT;
use crate::model::{OptionKind, Standard};

/// The error a trigger reports back through [`ArgParser::parse_tokens`](crate::ArgParser::parse_tokens).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Trigger error: {0}")]
pub struct TriggerError(pub String);

/// What a trigger returns.
pub type TriggerResult = Result<(), TriggerError>;

// Triggers are invoked through a shared reference to the registry (which stays read-only while parsing).
// The RefCell lets the caller's closures still mutate their captured state.
pub(crate) type FlagTrigger<'a> = RefCell<Box<dyn FnMut(&str, &str) -> TriggerResult + 'a>>;
pub(crate) type ValueTrigger<'a> =
    RefCell<Box<dyn FnMut(&str, &str, Option<&str>) -> TriggerResult + 'a>>;
pub(crate) type Stickless<'a> = Box<dyn Fn(&str) -> bool + 'a>;

/// The kind of an option together with its trigger (and stickless predicate).
/// Holding them in one enum keeps the trigger signature tied to the kind.
pub(crate) enum Behaviour<'a> {
    Argumentless(FlagTrigger<'a>),
    Argumented(ValueTrigger<'a>),
    OptArgumented(ValueTrigger<'a>, Stickless<'a>),
    Variadic(FlagTrigger<'a>),
}

impl<'a> Behaviour<'a> {
    pub(crate) fn kind(&self) -> OptionKind {
        match self {
            Behaviour::Argumentless(_) => OptionKind::Argumentless,
            Behaviour::Argumented(_) => OptionKind::Argumented,
            Behaviour::OptArgumented(_, _) => OptionKind::OptArgumented,
            Behaviour::Variadic(_) => OptionKind::Variadic,
        }
    }

    /// Invoke the trigger of an option which received no value.
    /// Value taking options see `None`.
    pub(crate) fn fire(&self, used: &str, standard: &str) -> TriggerResult {
        match self {
            Behaviour::Argumentless(trigger) | Behaviour::Variadic(trigger) => {
                (&mut *trigger.borrow_mut())(used, standard)
            }
            Behaviour::Argumented(trigger) | Behaviour::OptArgumented(trigger, _) => {
                (&mut *trigger.borrow_mut())(used, standard, None)
            }
        }
    }

    /// Invoke the trigger of an option with its value.
    /// Options that don't take a value drop it.
    pub(crate) fn fire_value(&self, used: &str, standard: &str, value: &str) -> TriggerResult {
        match self {
            Behaviour::Argumentless(trigger) | Behaviour::Variadic(trigger) => {
                (&mut *trigger.borrow_mut())(used, standard)
            }
            Behaviour::Argumented(trigger) | Behaviour::OptArgumented(trigger, _) => {
                (&mut *trigger.borrow_mut())(used, standard, Some(value))
            }
        }
    }

    /// Whether a detached token may satisfy this option's value.
    /// Only meaningful for `OptArgumented`; every other kind accepts.
    pub(crate) fn accepts_detached(&self, token: &str) -> bool {
        match self {
            Behaviour::OptArgumented(_, stickless) => stickless(token),
            _ => true,
        }
    }
}

/// An option, ready to be registered.
/// Build one with [`Argumentless`], [`Argumented`], [`OptArgumented`] or [`Variadic`].
pub struct Declaration<'a> {
    pub(crate) alternatives: Vec<String>,
    pub(crate) standard: Standard,
    pub(crate) argument: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) behaviour: Behaviour<'a>,
}

fn collect_alternatives(alternatives: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    alternatives.into_iter().map(Into::into).collect()
}

fn noop_flag<'a>() -> FlagTrigger<'a> {
    RefCell::new(Box::new(|_, _| Ok(())))
}

fn noop_value<'a>() -> ValueTrigger<'a> {
    RefCell::new(Box::new(|_, _, _| Ok(())))
}

/// The default stickless predicate: a detached token may be used unless it looks like an option.
pub fn default_stickless(token: &str) -> bool {
    !(token.starts_with('-') || token.starts_with('+'))
}

/// An option that takes no value.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{Argumentless, CommandLineParser, Syntax};
///
/// let mut hellos = 0;
/// let parser = CommandLineParser::new("program")
///     .add(
///         Argumentless::new(["-H", "--hello"])
///             .help("Prints the text: hello world")
///             .trigger(|_used, _standard| {
///                 hellos += 1;
///                 Ok(())
///             }),
///     )
///     .build();
///
/// let result = parser.parse_tokens(&["-HH", "--hello"], Syntax::Conventional).unwrap();
/// assert_eq!(result.count("-H"), 3);
/// drop(parser);
/// assert_eq!(hellos, 3);
/// ```
pub struct Argumentless<'a> {
    alternatives: Vec<String>,
    standard: Standard,
    help: Option<String>,
    trigger: FlagTrigger<'a>,
}

impl<'a> Argumentless<'a> {
    /// Create an argumentless option with the given alternative names (ex: `["-v", "--verbose"]`).
    pub fn new(alternatives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            alternatives: collect_alternatives(alternatives),
            standard: Standard::default(),
            help: None,
            trigger: noop_flag(),
        }
    }

    /// Choose the standard alternative, by index or by name.
    /// Defaults to the first alternative.
    pub fn standard(mut self, standard: impl Into<Standard>) -> Self {
        self.standard = standard.into();
        self
    }

    /// Document the option in the help message.
    /// Options without help are hidden from the help message, but still parsed.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.replace(help.into());
        self
    }

    /// Invoked with the used and the standard alternative each time the option is recognised.
    pub fn trigger(mut self, trigger: impl FnMut(&str, &str) -> TriggerResult + 'a) -> Self {
        self.trigger = RefCell::new(Box::new(trigger));
        self
    }
}

impl<'a> From<Argumentless<'a>> for Declaration<'a> {
    fn from(value: Argumentless<'a>) -> Self {
        Declaration {
            alternatives: value.alternatives,
            standard: value.standard,
            argument: None,
            help: value.help,
            behaviour: Behaviour::Argumentless(value.trigger),
        }
    }
}

/// An option that takes exactly one value per occurrence.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{Argumented, CommandLineParser, Syntax};
///
/// let parser = CommandLineParser::new("program")
///     .add(Argumented::new(["-l", "--line"]).argument("LINE").help("Prints the chosen line"))
///     .build();
///
/// let result = parser
///     .parse_tokens(&["-l1", "-l", "2", "--line=3", "--line", "4"], Syntax::Conventional)
///     .unwrap();
/// assert_eq!(
///     result.values("-l").unwrap(),
///     &[Some("1".to_string()), Some("2".to_string()), Some("3".to_string()), Some("4".to_string())]
/// );
/// ```
pub struct Argumented<'a> {
    alternatives: Vec<String>,
    standard: Standard,
    argument: String,
    help: Option<String>,
    trigger: ValueTrigger<'a>,
}

impl<'a> Argumented<'a> {
    /// Create an argumented option with the given alternative names.
    pub fn new(alternatives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            alternatives: collect_alternatives(alternatives),
            standard: Standard::default(),
            argument: DEFAULT_ARGUMENT.to_string(),
            help: None,
            trigger: noop_value(),
        }
    }

    /// Choose the standard alternative, by index or by name.
    pub fn standard(mut self, standard: impl Into<Standard>) -> Self {
        self.standard = standard.into();
        self
    }

    /// Name the value in the help message (one word, defaults to `ARG`).
    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = argument.into();
        self
    }

    /// Document the option in the help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.replace(help.into());
        self
    }

    /// Invoked with the used alternative, the standard alternative, and the value.
    /// The value is `None` only when the option ends the command line without one.
    pub fn trigger(
        mut self,
        trigger: impl FnMut(&str, &str, Option<&str>) -> TriggerResult + 'a,
    ) -> Self {
        self.trigger = RefCell::new(Box::new(trigger));
        self
    }
}

impl<'a> From<Argumented<'a>> for Declaration<'a> {
    fn from(value: Argumented<'a>) -> Self {
        Declaration {
            alternatives: value.alternatives,
            standard: value.standard,
            argument: Some(value.argument),
            help: value.help,
            behaviour: Behaviour::Argumented(value.trigger),
        }
    }
}

/// An option that optionally takes one value per occurrence.
///
/// A value stuck to the option (`-L3`, `--Line=3`) is always taken.
/// A detached value (`--Line 3`) is taken only when the stickless predicate accepts it;
/// by default anything that does not start with `-` or `+`.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{CommandLineParser, OptArgumented, Syntax};
///
/// let parser = CommandLineParser::new("program")
///     .add(OptArgumented::new(["-L", "--Line"]).argument("LINE"))
///     .build();
///
/// let result = parser.parse_tokens(&["--Line", "-x", "--Line", "2"], Syntax::Conventional);
/// let result = result.unwrap();
/// assert_eq!(result.values("-L").unwrap(), &[None, Some("2".to_string())]);
/// assert!(!result.success());
/// ```
pub struct OptArgumented<'a> {
    alternatives: Vec<String>,
    standard: Standard,
    argument: String,
    help: Option<String>,
    trigger: ValueTrigger<'a>,
    stickless: Stickless<'a>,
}

impl<'a> OptArgumented<'a> {
    /// Create an optionally argumented option with the given alternative names.
    pub fn new(alternatives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            alternatives: collect_alternatives(alternatives),
            standard: Standard::default(),
            argument: DEFAULT_ARGUMENT.to_string(),
            help: None,
            trigger: noop_value(),
            stickless: Box::new(default_stickless),
        }
    }

    /// Choose the standard alternative, by index or by name.
    pub fn standard(mut self, standard: impl Into<Standard>) -> Self {
        self.standard = standard.into();
        self
    }

    /// Name the value in the help message (one word, defaults to `ARG`).
    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = argument.into();
        self
    }

    /// Document the option in the help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.replace(help.into());
        self
    }

    /// Invoked with the used alternative, the standard alternative, and the value if any.
    pub fn trigger(
        mut self,
        trigger: impl FnMut(&str, &str, Option<&str>) -> TriggerResult + 'a,
    ) -> Self {
        self.trigger = RefCell::new(Box::new(trigger));
        self
    }

    /// Decide whether the following token may be used as the value without being stuck to the option.
    pub fn stickless(mut self, stickless: impl Fn(&str) -> bool + 'a) -> Self {
        self.stickless = Box::new(stickless);
        self
    }
}

impl<'a> From<OptArgumented<'a>> for Declaration<'a> {
    fn from(value: OptArgumented<'a>) -> Self {
        Declaration {
            alternatives: value.alternatives,
            standard: value.standard,
            argument: Some(value.argument),
            help: value.help,
            behaviour: Behaviour::OptArgumented(value.trigger, value.stickless),
        }
    }
}

/// An option that consumes all following tokens.
///
/// Once used, every later token is positional, and the positional arguments become the option's values.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{CommandLineParser, Syntax, Variadic};
///
/// let parser = CommandLineParser::new("program")
///     .add(Variadic::new(["--l", "--lines"]).argument("LINE"))
///     .build();
///
/// let result = parser.parse_tokens(&["a", "--lines", "b", "--c"], Syntax::Conventional).unwrap();
/// assert_eq!(
///     result.values("--l").unwrap(),
///     &[Some("a".to_string()), Some("b".to_string()), Some("--c".to_string())]
/// );
/// assert!(result.files().is_empty());
/// ```
pub struct Variadic<'a> {
    alternatives: Vec<String>,
    standard: Standard,
    argument: String,
    help: Option<String>,
    trigger: FlagTrigger<'a>,
}

impl<'a> Variadic<'a> {
    /// Create a variadic option with the given alternative names.
    pub fn new(alternatives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            alternatives: collect_alternatives(alternatives),
            standard: Standard::default(),
            argument: DEFAULT_ARGUMENT.to_string(),
            help: None,
            trigger: noop_flag(),
        }
    }

    /// Choose the standard alternative, by index or by name.
    pub fn standard(mut self, standard: impl Into<Standard>) -> Self {
        self.standard = standard.into();
        self
    }

    /// Name the values in the help message (one word, defaults to `ARG`).
    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = argument.into();
        self
    }

    /// Document the option in the help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.replace(help.into());
        self
    }

    /// Invoked with the used and the standard alternative when the option is recognised.
    pub fn trigger(mut self, trigger: impl FnMut(&str, &str) -> TriggerResult + 'a) -> Self {
        self.trigger = RefCell::new(Box::new(trigger));
        self
    }
}

impl<'a> From<Variadic<'a>> for Declaration<'a> {
    fn from(value: Variadic<'a>) -> Self {
        Declaration {
            alternatives: value.alternatives,
            standard: value.standard,
            argument: Some(value.argument),
            help: value.help,
            behaviour: Behaviour::Variadic(value.trigger),
        }
    }
}
