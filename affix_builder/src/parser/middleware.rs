use std::env;

use crate::abbreviation::Abbreviations;
use crate::api::{Registry, TriggerError};
use crate::model::Syntax;
use crate::parser::engine::Engine;
use crate::parser::printer::Printer;
use crate::parser::validate::{self, Verdict};
use crate::parser::{ParseResult, UserInterface};

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](crate::CommandLineParser::build).
///
/// The parser may be used any number of times; each parse produces an independent [`ParseResult`].
pub struct ArgParser<'a> {
    program: String,
    registry: Registry<'a>,
    abbreviations: Box<dyn Abbreviations + 'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> ArgParser<'a> {
    pub(crate) fn new(
        program: impl Into<String>,
        registry: Registry<'a>,
        abbreviations: Box<dyn Abbreviations + 'a>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            registry,
            abbreviations,
            printer,
            user_interface,
        }
    }

    /// The program name, which prefixes every warning.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The registered options.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Run the parser against the input tokens.
    ///
    /// Triggers are invoked as their options are encountered.
    /// Unrecognised options are reported (the first 5 individually, then a summary) and counted in the result,
    /// but never stop the parse.
    /// The only failure is a trigger failure, which stops the parse immediately.
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumentless, CommandLineParser, Syntax};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Argumentless::new(["-a", "--all"]))
    ///     .build();
    ///
    /// let result = parser.parse_tokens(&["-a", "--", "-a"], Syntax::Conventional).unwrap();
    /// assert_eq!(result.count("-a"), 1);
    /// assert_eq!(result.files(), &["-a"]);
    /// assert!(result.success());
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str], syntax: Syntax) -> Result<ParseResult, TriggerError> {
        Engine::new(
            &self.program,
            &self.registry,
            &*self.abbreviations,
            &*self.user_interface,
        )
        .run(tokens, syntax)
    }

    /// Run the parser against the Cli [`env::args`] (excluding the program itself).
    pub fn parse(&self, syntax: Syntax) -> Result<ParseResult, TriggerError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            syntax,
        )
    }

    /// Print the help message.
    ///
    /// `colours`: whether to colour the message; `None` colours it when the output is a terminal.
    pub fn help(&self, colours: Option<bool>) {
        let colours = colours.unwrap_or_else(|| self.user_interface.is_terminal());
        self.printer
            .print_help(&self.program, &self.registry, colours, &*self.user_interface);
    }

    /// Check that at most one of the `exclusives` options was used.
    ///
    /// On violation the conflict is reported, and the verdict carries `exit_value` (if any).
    ///
    /// ### Example
    /// ```
    /// # use affix_builder as affix;
    /// use affix::{Argumentless, CommandLineParser, Syntax, Verdict};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Argumentless::new(["-q", "--quiet"]))
    ///     .add(Argumentless::new(["-v", "--verbose"]))
    ///     .build();
    ///
    /// let result = parser.parse_tokens(&["-qv"], Syntax::Conventional).unwrap();
    /// assert_eq!(parser.check_exclusiveness(&result, &["-q", "-v"], None), Verdict::Failed);
    /// assert!(parser.check_exclusiveness(&result, &["-q"], None).passed());
    /// ```
    pub fn check_exclusiveness(
        &self,
        result: &ParseResult,
        exclusives: &[&str],
        exit_value: Option<i32>,
    ) -> Verdict {
        let conflict = validate::conflict(&self.registry, result, exclusives);
        let passed = conflict.is_none();

        if let Some(message) = conflict {
            self.report(message);
        }

        Verdict::new(passed, exit_value)
    }

    /// Like [`ArgParser::check_exclusiveness`], but exits the process with `exit_value` (if any) on violation.
    pub fn test_exclusiveness(
        &self,
        result: &ParseResult,
        exclusives: &[&str],
        exit_value: Option<i32>,
    ) -> bool {
        self.check_exclusiveness(result, exclusives, exit_value)
            .enforce()
    }

    /// Check that only the `allowed` options were used.
    ///
    /// On violation every offending option is reported, and the verdict carries `exit_value` (if any).
    pub fn check_allowed(
        &self,
        result: &ParseResult,
        allowed: &[&str],
        exit_value: Option<i32>,
    ) -> Verdict {
        let violations = validate::out_of_context(&self.registry, result, allowed);
        let passed = violations.is_empty();

        for message in violations {
            self.report(message);
        }

        Verdict::new(passed, exit_value)
    }

    /// Like [`ArgParser::check_allowed`], but exits the process with `exit_value` (if any) on violation.
    pub fn test_allowed(&self, result: &ParseResult, allowed: &[&str], exit_value: Option<i32>) -> bool {
        self.check_allowed(result, allowed, exit_value).enforce()
    }

    /// Check that the number of positional arguments lies within `minimum..=maximum` (`None` for unbounded).
    ///
    /// Nothing is reported; the verdict carries `exit_value` (if any) on violation.
    pub fn check_files(
        &self,
        result: &ParseResult,
        minimum: usize,
        maximum: Option<usize>,
        exit_value: Option<i32>,
    ) -> Verdict {
        Verdict::new(validate::file_count(result, minimum, maximum), exit_value)
    }

    /// Like [`ArgParser::check_files`], but exits the process with `exit_value` (if any) on violation.
    pub fn test_files(
        &self,
        result: &ParseResult,
        minimum: usize,
        maximum: Option<usize>,
        exit_value: Option<i32>,
    ) -> bool {
        self.check_files(result, minimum, maximum, exit_value)
            .enforce()
    }

    fn report(&self, message: String) {
        self.user_interface
            .print(format!("{program}: {message}", program = self.program));
    }
}
