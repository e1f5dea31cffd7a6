//! `affix` is a trigger driven command line option parser for Rust.
//!
//! Programs register *options*, each with one or more alternative names, and `affix` scans the command line against them.
//! Every recognised occurrence invokes the option's trigger on the spot, and is also recorded in a [`ParseResult`].
//! Whatever is neither an option nor an option's value is a positional argument (a *file*).
//!
//! `affix` is forgiving by design of the command line it is handed:
//! unrecognised options are reported (the first five individually, then a summary) and counted, but never stop the parse.
//! It is the program that decides what to do with an unsuccessful [`ParseResult`].
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo.rs")]
//! ```
//!
//! ```console
//! $ demo --hello -l3 --line=4
//! Hello World
//! 3
//! 4
//!
//! $ demo a --lines b c
//! a
//! b
//! c
//!
//! $ demo --nope x
//! demo: warning: unrecognised option --nope
//! Number of unrecognised options: 1
//! Entered message: x
//! Entered files:
//!         x
//! ```
//!
//! # Options
//! There are four kinds of option, each with its own builder:
//! * [`Argumentless`]: takes no value (ex: `--verbose`, `-v`).
//! * [`Argumented`]: takes exactly one value per occurrence (ex: `--line 3`, `--line=3`, `-l3`, `-l 3`).
//! * [`OptArgumented`]: takes zero or one value per occurrence.
//! A value stuck to the option (`--Line=3`, `-L3`) is always taken.
//! A detached value (`--Line 3`) is taken only when the option's *stickless* predicate accepts it, by default when it does not look like an option.
//! * [`Variadic`]: takes every following token as its values (ex: `--lines a b -c`).
//! The first variadic option used also absorbs the positional arguments.
//!
//! Each option names one of its alternatives as the *standard* alternative, which keys its values in the [`ParseResult`].
//! [`ParseResult::support_alternatives`] makes the values available under every alternative.
//!
//! # Token grammar
//! With [`Syntax::Conventional`]:
//! * `--name` or `++name` is a long option; `--name=value` attaches a value.
//! * `-abc` or `+abc` is a cluster of short options (`-a`, `-b`, `-c`).
//! The first value taking option in the cluster takes the rest of the token as its value (`-ab3` is `-a -b 3`).
//! * `--` makes every following token positional.
//! * `++` makes exactly the next token positional (ex: `++ -a`).
//! * A lone `-` or `+` is positional.
//!
//! With [`Syntax::Alternative`] every token starting with `-` or `+` is a single option (ex: `-name`, `+name=value`).
//!
//! Long options that match no alternative exactly may be expanded as abbreviations (see [`CommandLineParser::abbreviations`]).
//! [`StandardAbbreviations`] expands any prefix that belongs to exactly one option.
//!
//! # Validation
//! Once parsed, the [`ArgParser`] checks the result:
//! * [`ArgParser::check_exclusiveness`]: at most one of a set of options was used.
//! * [`ArgParser::check_allowed`]: only a set of options was used.
//! * [`ArgParser::check_files`]: the number of positional arguments lies within bounds.
//!
//! Each check returns a [`Verdict`].
//! The `test_*` variants act on it, exiting the process when the caller supplied an exit status.
//!
//! # Help
//! [`ArgParser::help`] prints the program description, usage, and a synopsis of every option that has help text.
pub use affix_builder::*;
