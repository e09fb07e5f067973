//! Query execution and result rendering.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::info;
use typerel_solver::{
    Ancestry, AssignabilityChecker, CommonBaseResolver, StructuralMatcher, TypeFormatter, TypeId,
    TypeKind, TypeStore,
};

use crate::args::{CliArgs, Command, OutputFormat};
use crate::config;

/// Result of one query, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Outcome {
    Assignable {
        target: String,
        candidate: String,
        assignable: bool,
    },
    Generic {
        definition: String,
        candidate: String,
        assignable: bool,
    },
    Common {
        types: Vec<String>,
        success: bool,
        result: Option<String>,
    },
    Match {
        candidate: String,
        pattern: String,
        matched: bool,
        bindings: Vec<Binding>,
    },
    Static {
        #[serde(rename = "type")]
        ty: String,
        is_static: bool,
    },
    Show(TypeReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub variable: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReport {
    pub name: String,
    pub qualified: String,
    pub kind: TypeKind,
    pub flags: Vec<String>,
    pub definition: Option<String>,
    pub arguments: Vec<String>,
    pub base: Option<String>,
    pub interfaces: Vec<String>,
    pub ancestry: Vec<AncestorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorEntry {
    #[serde(rename = "type")]
    pub ty: String,
    pub distance: u32,
}

impl Outcome {
    /// Whether the query answered "yes". `show` always does.
    pub fn is_positive(&self) -> bool {
        match self {
            Outcome::Assignable { assignable, .. } | Outcome::Generic { assignable, .. } => *assignable,
            Outcome::Common { success, .. } => *success,
            Outcome::Match { matched, .. } => *matched,
            Outcome::Static { is_static, .. } => *is_static,
            Outcome::Show(_) => true,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self).context("failed to serialize result"),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    pub fn render_text(&self) -> String {
        let not = |yes: bool| if yes { "" } else { "not " };
        match self {
            Outcome::Assignable {
                target,
                candidate,
                assignable,
            } => format!("{candidate} is {}assignable to {target}", not(*assignable)),
            Outcome::Generic {
                definition,
                candidate,
                assignable,
            } => format!(
                "{candidate} is {}assignable to generic definition {definition}",
                not(*assignable)
            ),
            Outcome::Common { result: Some(result), .. } => format!("common ancestor: {result}"),
            Outcome::Common { types, .. } => {
                format!("no common ancestor besides the root for {}", types.join(", "))
            }
            Outcome::Match {
                candidate,
                pattern,
                matched,
                bindings,
            } => {
                let mut out = format!("{candidate} {} {pattern}", if *matched { "matches" } else { "does not match" });
                for binding in bindings {
                    let _ = write!(out, "\n  {} = {}", binding.variable, binding.types.join(" | "));
                }
                out
            }
            Outcome::Static { ty, is_static } => format!("{ty} is {}a static class", not(*is_static)),
            Outcome::Show(report) => report.render_text(),
        }
    }
}

impl TypeReport {
    fn render_text(&self) -> String {
        let mut out = format!("{} ({})", self.qualified, kind_name(self.kind));
        if !self.flags.is_empty() {
            let _ = write!(out, " [{}]", self.flags.join(", "));
        }
        if let Some(definition) = &self.definition {
            let _ = write!(out, "\n  definition: {definition}");
        }
        if !self.arguments.is_empty() {
            let _ = write!(out, "\n  arguments:  {}", self.arguments.join(", "));
        }
        if let Some(base) = &self.base {
            let _ = write!(out, "\n  base:       {base}");
        }
        if !self.interfaces.is_empty() {
            let _ = write!(out, "\n  interfaces: {}", self.interfaces.join(", "));
        }
        out.push_str("\n  ancestry:");
        for entry in &self.ancestry {
            let _ = write!(out, "\n    {} {}", entry.distance, entry.ty);
        }
        out
    }
}

fn kind_name(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
        TypeKind::ValueType => "struct",
        TypeKind::Parameter => "generic parameter",
    }
}

/// Build the store from the arguments and run the command.
pub fn run(args: &CliArgs) -> Result<Outcome> {
    let mut store = config::build_store(&args.universes)?;
    execute(&mut store, &args.command)
}

pub fn execute(store: &mut TypeStore, command: &Command) -> Result<Outcome> {
    let outcome = match command {
        Command::Assignable { target, candidate } => {
            let target = resolve(store, target, &[])?;
            let candidate = resolve(store, candidate, &[])?;
            let assignable = AssignabilityChecker::new(store).is_directly_assignable(target, candidate)?;
            Outcome::Assignable {
                target: store.display(target),
                candidate: store.display(candidate),
                assignable,
            }
        }
        Command::Generic {
            definition,
            candidate,
            vars,
        } => {
            let definition = resolve(store, definition, vars)?;
            let candidate = resolve(store, candidate, &[])?;
            let assignable = AssignabilityChecker::new(store)
                .is_assignable_to_generic_definition(definition, candidate)?;
            Outcome::Generic {
                definition: store.display(definition),
                candidate: store.display(candidate),
                assignable,
            }
        }
        Command::Common { types } => {
            let ids = types
                .iter()
                .map(|text| resolve(store, text, &[]))
                .collect::<Result<Vec<_>>>()?;
            let found = CommonBaseResolver::new(store).lowest_common_ancestor(&ids)?;
            Outcome::Common {
                types: ids.iter().map(|&id| store.display(id)).collect(),
                success: found.success(),
                result: found.result().map(|id| store.display(id)),
            }
        }
        Command::Match {
            candidate,
            pattern,
            vars,
        } => {
            let candidate = resolve(store, candidate, &[])?;
            let pattern = resolve(store, pattern, vars)?;
            let bindings = StructuralMatcher::new(store).match_fresh(candidate, pattern)?;
            Outcome::Match {
                candidate: store.display(candidate),
                pattern: store.display(pattern),
                matched: bindings.is_some(),
                bindings: bindings
                    .iter()
                    .flat_map(|set| set.iter())
                    .map(|(name, tys)| Binding {
                        variable: store.resolve_atom(name).to_string(),
                        types: tys.iter().map(|&ty| store.display(ty)).collect(),
                    })
                    .collect(),
            }
        }
        Command::Static { ty } => {
            let id = resolve(store, ty, &[])?;
            Outcome::Static {
                ty: store.display(id),
                is_static: AssignabilityChecker::new(store).is_static_class(id)?,
            }
        }
        Command::Show { ty } => {
            let id = resolve(store, ty, &[])?;
            Outcome::Show(report(store, id)?)
        }
    };
    info!(positive = outcome.is_positive(), "query complete");
    Ok(outcome)
}

fn resolve(store: &mut TypeStore, text: &str, vars: &[String]) -> Result<TypeId> {
    let vars: Vec<&str> = vars.iter().map(String::as_str).collect();
    store
        .parse_type_with_vars(text, &vars)
        .with_context(|| format!("cannot resolve type `{text}`"))
}

fn report(store: &TypeStore, id: TypeId) -> Result<TypeReport> {
    let desc = store.descriptor(id)?;
    let qualified = TypeFormatter::new(store).qualified();
    let ancestry = Ancestry::of(store, id)?;
    Ok(TypeReport {
        name: store.display(id),
        qualified: qualified.format(id),
        kind: desc.kind,
        flags: desc
            .flags
            .iter_names()
            .map(|(name, _)| name.to_lowercase())
            .collect(),
        definition: desc
            .definition
            .filter(|&def| def != id)
            .map(|def| store.display(def)),
        arguments: desc.generic_arguments.iter().map(|&arg| store.display(arg)).collect(),
        base: desc.base_type.map(|base| store.display(base)),
        interfaces: desc.interfaces.iter().map(|&iface| store.display(iface)).collect(),
        ancestry: ancestry
            .iter()
            .skip(1)
            .map(|(ty, distance)| AncestorEntry {
                ty: store.display(ty),
                distance,
            })
            .collect(),
    })
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
