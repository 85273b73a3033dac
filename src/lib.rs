pub mod config;
pub mod error;
pub mod parse;
pub mod torn;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
pub use torn::market;
pub use utils::stats;

#[cfg(test)]
#[macro_use]
extern crate approx;
