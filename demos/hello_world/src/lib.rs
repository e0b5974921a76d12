//! Library facade for the `hello_world` example so tests can reuse the
//! option types and the report writer.

pub mod cli;
pub mod error;
pub mod report;
