//! Error types.
//!
//! Negative answers (not assignable, no common ancestor, no match) are
//! ordinary return values. These errors only report caller bugs and
//! malformed metadata.

use crate::types::TypeId;
use thiserror::Error;

/// Precondition violations of the relation algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// The handle does not belong to the store being queried.
    #[error("unknown type handle {0:?}")]
    UnknownType(TypeId),

    /// `lowest_common_ancestor` needs at least one type.
    #[error("cannot compute a common ancestor of an empty type set")]
    EmptyTypeSet,
}

/// Failures while building or querying the type metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("type `{0}` is already declared")]
    DuplicateType(String),

    #[error("unknown type `{0}`")]
    UnknownTypeName(String),

    #[error("type name `{name}` is ambiguous; qualify it with one of: {candidates}")]
    AmbiguousTypeName { name: String, candidates: String },

    #[error("`{name}` expects {expected} generic argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("`{0}` is not a generic type definition")]
    NotGenericDefinition(String),

    #[error("invalid declaration of `{name}`: {reason}")]
    InvalidDeclaration { name: String, reason: String },

    #[error("parse error in `{input}` at offset {offset}: {message}")]
    Parse {
        input: String,
        offset: usize,
        message: String,
    },

    #[error("no nullable wrapper definition is registered")]
    MissingNullableDefinition,

    #[error("instantiation of `{0}` is excessively deep and possibly infinite")]
    InstantiationTooDeep(String),

    #[error(transparent)]
    Relation(#[from] RelationError),
}
