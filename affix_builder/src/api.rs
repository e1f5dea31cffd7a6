mod core;
mod definition;
mod registry;

pub use self::core::*;
pub use definition::*;
pub use registry::*;
