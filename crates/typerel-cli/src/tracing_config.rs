//! Opt-in diagnostics for relation queries.
//!
//! Nothing is installed unless `TYPEREL_LOG` (or `RUST_LOG`) holds a filter.
//! `TYPEREL_LOG_FORMAT` picks the layout: `text` (default, flat lines),
//! `tree` (indented via `tracing-tree`) or `json` (one object per event).
//! All output goes to stderr; query results stay alone on stdout.
//!
//! ## Targets
//!
//! | Target | Level | Events |
//! |--------|-------|--------|
//! | `typerel_solver::assignability` | trace | every direct and generic-definition check |
//! | `typerel_solver::hierarchy` | trace | truncated ancestor walks |
//! | `typerel_solver::store` | debug, trace | declarations, instantiations, rollbacks |
//! | `typerel_solver::common_base` | debug | common-ancestor results |
//! | `typerel_solver::matcher` | debug | top-level match results |
//! | `typerel_cli::config` | debug | loaded universe files |
//! | `typerel_cli::driver` | info | query completion |
//!
//! ```bash
//! # Why did a pattern fail to match?
//! TYPEREL_LOG=typerel_solver=trace TYPEREL_LOG_FORMAT=tree \
//!     typerel match "List<int>" "IEnumerable<T>" --vars T
//!
//! # Which universe files were read
//! TYPEREL_LOG=typerel_cli::config=debug typerel -u app.json show App.Widget
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("TYPEREL_LOG_FORMAT").unwrap_or_default())
    }
}

/// The filter directive in effect, `TYPEREL_LOG` first, then `RUST_LOG`.
fn filter_directive() -> Option<String> {
    std::env::var("TYPEREL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
}

/// Install the global subscriber if a filter directive is set.
///
/// Malformed directives are skipped rather than rejected, so a typo in
/// `TYPEREL_LOG` never stops a query from running.
pub fn init_tracing() {
    let Some(directive) = filter_directive() else {
        return;
    };

    let filter = EnvFilter::builder().parse_lossy(directive);
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }
}
