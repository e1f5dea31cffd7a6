//! Builder module for `affix`.
//! See the `affix` crate root for the full command line grammar.
#![deny(missing_docs)]
mod abbreviation;
mod api;
mod constant;
mod model;
mod parser;

pub use abbreviation::*;
pub use api::*;
pub use model::*;
pub use parser::{ArgParser, Occurrences, ParseResult, Verdict};

#[cfg(feature = "unit_test")]
pub use parser::Transcript;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
