//! Command-line front end for the type-relationship engine.
//!
//! Loads the core runtime library plus any universe files, resolves the
//! textual types given on the command line and runs one query against the
//! resulting store.

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;
