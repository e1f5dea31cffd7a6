use std::collections::HashMap;
use thiserror::Error;

use crate::api::definition::{Behaviour, Declaration};
use crate::model::{OptionKind, Standard};

/// Error raised when an option cannot be registered.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RegistryError {
    #[error("An option must have at least one alternative.")]
    NoAlternatives,

    #[error("Cannot duplicate the alternative '{0}'.")]
    DuplicateAlternative(String),

    #[error("Standard alternative index {index} is out of range for {alternatives:?}.")]
    StandardOutOfRange {
        index: usize,
        alternatives: Vec<String>,
    },

    #[error("Standard alternative '{standard}' is not one of {alternatives:?}.")]
    StandardNotAlternative {
        standard: String,
        alternatives: Vec<String>,
    },
}

impl From<RegistryError> for ConfigError {
    fn from(error: RegistryError) -> Self {
        ConfigError(error.to_string())
    }
}

/// A registered option.
pub struct OptionDefinition<'a> {
    alternatives: Vec<String>,
    standard: String,
    argument: Option<String>,
    help: Option<String>,
    pub(crate) behaviour: Behaviour<'a>,
}

impl<'a> std::fmt::Debug for OptionDefinition<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDefinition")
            .field("kind", &self.kind())
            .field("alternatives", &self.alternatives)
            .field("standard", &self.standard)
            .field("argument", &self.argument)
            .field("help", &self.help)
            .finish()
    }
}

impl<'a> OptionDefinition<'a> {
    /// The kind of this option.
    pub fn kind(&self) -> OptionKind {
        self.behaviour.kind()
    }

    /// The alternatives, in the order they were declared.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// The standard alternative, which keys this option's values.
    pub fn standard(&self) -> &str {
        &self.standard
    }

    /// The name of the value, for value taking options.
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// The help text; `None` hides the option from the help message.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// The ordered collection of registered options.
///
/// Every alternative name is unique across the registry, and so belongs to exactly one option.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    definitions: Vec<OptionDefinition<'a>>,
    // alternative -> index into definitions
    lookup: HashMap<String, usize>,
    // alternatives in registration order
    names: Vec<String>,
}

impl<'a> Registry<'a> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option.
    ///
    /// Fails when the option has no alternatives, when the standard alternative doesn't name one of them,
    /// or when any alternative is already registered (including repeated within the option itself).
    /// On failure the registry is left unchanged.
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumentless, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.register(Argumentless::new(["-v", "--verbose"]).standard("--verbose")).unwrap();
    /// assert_eq!(registry.standard_of("-v"), Some("--verbose"));
    ///
    /// registry.register(Argumentless::new(["--version", "-v"])).unwrap_err();
    /// assert!(!registry.contains("--version"));
    /// ```
    pub fn register(&mut self, declaration: impl Into<Declaration<'a>>) -> Result<(), ConfigError> {
        Ok(self.try_register(declaration.into())?)
    }

    pub(crate) fn try_register(&mut self, declaration: Declaration<'a>) -> Result<(), RegistryError> {
        let Declaration {
            alternatives,
            standard,
            argument,
            help,
            behaviour,
        } = declaration;

        if alternatives.is_empty() {
            return Err(RegistryError::NoAlternatives);
        }

        for (i, alternative) in alternatives.iter().enumerate() {
            if self.lookup.contains_key(alternative) || alternatives[..i].contains(alternative) {
                return Err(RegistryError::DuplicateAlternative(alternative.clone()));
            }
        }

        let standard = match standard {
            Standard::ByIndex(index) => match alternatives.get(index) {
                Some(name) => name.clone(),
                None => {
                    return Err(RegistryError::StandardOutOfRange {
                        index,
                        alternatives,
                    });
                }
            },
            Standard::ByName(name) => {
                if !alternatives.contains(&name) {
                    return Err(RegistryError::StandardNotAlternative {
                        standard: name,
                        alternatives,
                    });
                }

                name
            }
        };

        let index = self.definitions.len();

        for alternative in &alternatives {
            self.lookup.insert(alternative.clone(), index);
            self.names.push(alternative.clone());
        }

        self.definitions.push(OptionDefinition {
            alternatives,
            standard,
            argument,
            help,
            behaviour,
        });

        Ok(())
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[OptionDefinition<'a>] {
        &self.definitions
    }

    /// Every alternative name, in registration order.
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Find the option which `alternative` names.
    pub fn get(&self, alternative: &str) -> Option<&OptionDefinition<'a>> {
        self.lookup
            .get(alternative)
            .map(|index| &self.definitions[*index])
    }

    /// Whether `alternative` names a registered option.
    pub fn contains(&self, alternative: &str) -> bool {
        self.lookup.contains_key(alternative)
    }

    /// The standard alternative of the option which `alternative` names.
    pub fn standard_of(&self, alternative: &str) -> Option<&str> {
        self.get(alternative).map(OptionDefinition::standard)
    }

    /// The kind of the option which `alternative` names.
    pub fn kind_of(&self, alternative: &str) -> Option<OptionKind> {
        self.get(alternative).map(OptionDefinition::kind)
    }

    /// Map from every alternative to its standard alternative.
    pub fn standards(&self) -> HashMap<&str, &str> {
        self.lookup
            .iter()
            .map(|(alternative, index)| {
                (
                    alternative.as_str(),
                    self.definitions[*index].standard.as_str(),
                )
            })
            .collect()
    }
}
