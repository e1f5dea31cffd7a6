use crate::abbreviation::{Abbreviations, NoAbbreviations};
use crate::api::{ConfigError, Declaration, Registry};
use crate::parser::{ArgParser, ConsoleInterface, Printer, Stream, UserInterface};

#[cfg(any(test, feature = "unit_test"))]
use crate::parser::Transcript;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser configuration.
///
/// ### Example
/// ```
/// # use affix_builder as affix;
/// use affix::{Argumentless, CommandLineParser, Syntax};
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add.
///     .add(Argumentless::new(["-v", "--verbose"]))
///     .build();
/// parser.parse_tokens(&[], Syntax::Conventional).unwrap();
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    description: Option<String>,
    usage: Option<String>,
    long_description: Option<String>,
    stream: Stream,
    abbreviations: Box<dyn Abbreviations + 'a>,
    registry: Registry<'a>,
    deferred_error: Option<ConfigError>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    /// Only exact option names are recognised, unless [`CommandLineParser::abbreviations`] says otherwise.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: None,
            usage: None,
            long_description: None,
            stream: Stream::default(),
            abbreviations: Box::new(NoAbbreviations),
            registry: Registry::new(),
            deferred_error: None,
        }
    }

    /// Document the one line description of the program, shown in the title of the help message.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Document the usage of the program, one invocation per line (`'\n'` separated).
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage.replace(usage.into());
        self
    }

    /// Document the program at length.
    /// It may carry escape sequences, which are removed when the help message is not coloured.
    pub fn long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description.replace(long_description.into());
        self
    }

    /// Print warnings, validator messages and help to stderr instead of stdout.
    pub fn stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }

    /// Choose how abbreviated long options expand.
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumentless, CommandLineParser, StandardAbbreviations, Syntax};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .abbreviations(StandardAbbreviations)
    ///     .add(Argumentless::new(["--verbose"]))
    ///     .add(Argumentless::new(["--version"]))
    ///     .build();
    ///
    /// let result = parser.parse_tokens(&["--verb", "--ver"], Syntax::Conventional).unwrap();
    /// assert!(result.is_used("--verbose"));
    /// assert_eq!(result.unrecognised_count(), 1);
    /// ```
    pub fn abbreviations(mut self, abbreviations: impl Abbreviations + 'a) -> Self {
        self.abbreviations = Box::new(abbreviations);
        self
    }

    /// Add an option to the command line parser.
    ///
    /// Options are listed in the help message in the order they are added.
    /// A registration error (ex: a repeated alternative) is reported when the parser is built.
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumentless, CommandLineParser};
    ///
    /// let result = CommandLineParser::new("program")
    ///     .add(Argumentless::new(["-v", "--verbose"]))
    ///     .add(Argumentless::new(["--version", "-v"]))
    ///     .build_parser();
    ///
    /// assert!(result.is_err());
    /// ```
    pub fn add(mut self, declaration: impl Into<Declaration<'a>>) -> Self {
        if let Err(error) = self.registry.register(declaration) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Deferring registration failure: {error}.");
            }

            if self.deferred_error.is_none() {
                self.deferred_error.replace(error);
            }
        }

        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<ArgParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let printer = Printer::terminal(self.description, self.usage, self.long_description);
        Ok(ArgParser::new(
            self.program,
            self.registry,
            self.abbreviations,
            printer,
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated alternative).
    pub fn build_parser(self) -> Result<ArgParser<'a>, ConfigError> {
        let stream = self.stream;
        self.build_with_interface(Box::new(ConsoleInterface::new(stream)))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated alternative).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> ArgParser<'a> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build the command line parser, recording its output in the returned [`Transcript`] instead of printing it.
    #[cfg(any(test, feature = "unit_test"))]
    pub fn build_transcribed(self) -> Result<(ArgParser<'a>, Transcript), ConfigError> {
        let transcript = Transcript::default();
        let parser = self.build_with_interface(Box::new(transcript.clone()))?;
        Ok((parser, transcript))
    }
}
