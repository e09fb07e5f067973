//! Type Relationship Engine
//!
//! Answers relationship questions over runtime type metadata of a
//! nominal, single-inheritance type system with interfaces and generics:
//!
//! - **Assignability**: identity, inheritance and interface implementation
//!   (`AssignabilityChecker`), including "is this an instantiation of
//!   `IEnumerable<>`?" questions.
//! - **Common ancestry**: the most specific shared supertype of a set of
//!   types (`CommonBaseResolver`).
//! - **Structural matching**: matching a concrete type against a pattern
//!   with type variables and collecting the bindings (`StructuralMatcher`).
//!
//! Metadata lives in a `TypeStore` and is referenced through `TypeId`
//! handles. Instantiations are interned, so identity is handle equality.
//! Every query takes the store by shared reference.
mod assignability;
mod bindings;
mod common_base;
mod decl;
mod error;
mod format;
pub mod hierarchy;
mod matcher;
mod shape;
mod store;
pub mod type_expr;
pub mod types;
pub mod well_known;

pub use assignability::AssignabilityChecker;
pub use bindings::BindingSet;
pub use common_base::{AncestorMatch, CommonBaseResolver};
pub use decl::TypeDecl;
pub use error::{RelationError, StoreError};
pub use format::TypeFormatter;
pub use hierarchy::Ancestry;
pub use matcher::StructuralMatcher;
pub use shape::PatternShape;
pub use store::{TypeStore, WellKnownTypes};
pub use type_expr::TypeExpr;
pub use types::{TypeDescriptor, TypeFlags, TypeId, TypeKind};

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/concurrent_tests.rs"]
mod concurrent_tests;
