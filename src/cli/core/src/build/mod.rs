/* src/cli/core/src/build/mod.rs */

pub mod cache;
pub mod pipeline;
pub mod session;

#[cfg(test)]
mod tests;

pub use pipeline::{copy_output, describe_failure, expand_file, run_build, write_output};
pub use session::{Outcome, Session};
