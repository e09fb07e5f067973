use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the typerel binary.
#[derive(Parser, Debug)]
#[command(
    name = "typerel",
    version,
    about = "Assignability, common ancestors and structural matching over runtime type metadata"
)]
pub struct CliArgs {
    /// JSON universe file declaring additional types. May be repeated;
    /// files are loaded in order on top of the core library.
    #[arg(short = 'u', long = "universe", value_name = "FILE", global = true)]
    pub universes: Vec<PathBuf>,

    /// Output format for the query result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Is CANDIDATE the same as, derived from or an implementation of TARGET?
    Assignable { target: String, candidate: String },

    /// Does CANDIDATE, a base type or an interface instantiate DEFINITION?
    ///
    /// DEFINITION is usually open, e.g. `IEnumerable<>`.
    Generic {
        definition: String,
        candidate: String,
        /// Names in DEFINITION that are free method-level parameters.
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,
    },

    /// Lowest common ancestor of the given types.
    Common {
        #[arg(required = true)]
        types: Vec<String>,
    },

    /// Match CANDIDATE against PATTERN and print the variable bindings.
    Match {
        candidate: String,
        pattern: String,
        /// Names in PATTERN that are type variables, e.g. `--vars TKey,TValue`.
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,
    },

    /// Is TYPE a static class?
    Static {
        #[arg(value_name = "TYPE")]
        ty: String,
    },

    /// Print the descriptor and ancestry of TYPE.
    Show {
        #[arg(value_name = "TYPE")]
        ty: String,
    },
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
