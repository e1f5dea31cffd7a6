mod engine;
mod interface;
mod middleware;
mod printer;
mod result;
mod validate;

pub(crate) use interface::*;
pub use middleware::*;
pub(crate) use printer::*;
pub use result::*;
pub use validate::Verdict;

#[cfg(any(test, feature = "unit_test"))]
pub use interface::util::Transcript;
