//! Configuration loader and schema types.
//!
//! Settings provide the defaults for every subcommand; command-line flags
//! override them per invocation.

mod load;
mod schema;

pub use load::expand_home;
pub use schema::*;

#[cfg(test)]
mod tests;
