//! Universe files.
//!
//! A universe file declares application types on top of the core library:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "Base", "namespace": "App", "params": ["T"] },
//!     { "name": "Derived", "namespace": "App", "params": ["T"], "base": "Base<T>" },
//!     { "name": "Money", "kind": "struct", "interfaces": ["IComparable"] }
//!   ],
//!   "aliases": { "money": "Money" }
//! }
//! ```
//!
//! Types are declared in file order, so a type must follow its base type
//! and interfaces. A self-reference (`IEquatable<Money>` on `Money`) is fine.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use typerel_solver::{TypeDecl, TypeStore};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UniverseFile {
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    /// Keyword alias -> type expression.
    #[serde(default)]
    pub aliases: FxHashMap<String, String>,
}

impl UniverseFile {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid universe JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read universe file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in universe file {}", path.display()))
    }

    /// Declare every type, then register the aliases in name order.
    pub fn apply(&self, store: &mut TypeStore) -> Result<()> {
        for decl in &self.types {
            store
                .declare(decl)
                .with_context(|| format!("failed to declare `{}`", decl.qualified_name()))?;
        }

        let mut aliases: Vec<(&String, &String)> = self.aliases.iter().collect();
        aliases.sort();
        for (alias, target) in aliases {
            let id = store
                .parse_type(target)
                .with_context(|| format!("failed to resolve alias `{alias}` -> `{target}`"))?;
            store
                .alias(alias, id)
                .with_context(|| format!("failed to register alias `{alias}`"))?;
        }
        Ok(())
    }
}

/// The core library plus every universe file, in order.
pub fn build_store(universes: &[PathBuf]) -> Result<TypeStore> {
    let mut store = TypeStore::with_core_library().context("failed to install the core library")?;
    let core_types = store.len();
    for path in universes {
        UniverseFile::load(path)?
            .apply(&mut store)
            .with_context(|| format!("in universe file {}", path.display()))?;
    }
    debug!(
        universes = universes.len(),
        core_types,
        total_types = store.len(),
        "build_store"
    );
    Ok(store)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
