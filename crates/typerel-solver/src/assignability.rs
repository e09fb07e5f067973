//! Assignability between type descriptors.
//!
//! Two questions, both pure and side-effect free:
//!
//! - **Direct assignability**: may a value of `candidate` be stored in a
//!   location of type `target`? Identity, inheritance and implementation
//!   only. Generic arguments are invariant.
//! - **Generic-definition assignability**: does `candidate`, one of its base
//!   types or one of its interfaces instantiate the definition behind
//!   `generic_definition`? `List<int>` answers yes for `IEnumerable<>`.
//!
//! | Target / definition | Candidate | Direct | Generic |
//! |---------------------|-----------|--------|---------|
//! | `IEnumerable<int>` | `List<int>` | yes | no (closed) |
//! | `IEnumerable<>` | `List<int>` | no | yes |
//! | `IQueryable<int>` | `List<int>` | no | no |
//! | `Nullable<>` | `int?` | no | yes |
//! | `int?` | `int` | yes | no |
//! | `object` | anything | yes | only `object` |

use crate::error::RelationError;
use crate::hierarchy::{Ancestry, base_chain, find_instantiation};
use crate::shape::PatternShape;
use crate::store::TypeStore;
use crate::types::TypeId;
use tracing::trace;

#[derive(Clone, Copy)]
pub struct AssignabilityChecker<'a> {
    store: &'a TypeStore,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(store: &'a TypeStore) -> Self {
        Self { store }
    }

    /// True iff `candidate` is `target`, derives from it or implements it.
    pub fn is_directly_assignable(&self, target: TypeId, candidate: TypeId) -> Result<bool, RelationError> {
        let result = self.directly_assignable(target, candidate)?;
        trace!(
            target = %self.store.display(target),
            candidate = %self.store.display(candidate),
            result,
            "is_directly_assignable"
        );
        Ok(result)
    }

    pub(crate) fn directly_assignable(&self, target: TypeId, candidate: TypeId) -> Result<bool, RelationError> {
        let target_desc = self.store.descriptor(target)?;
        self.store.descriptor(candidate)?;

        if target == candidate || self.store.is_root(target) {
            return Ok(true);
        }

        // `Nullable<X>` accepts `X`.
        if target_desc.definition.is_some()
            && target_desc.definition == self.store.well_known().nullable
            && !target_desc.is_generic_definition()
            && target_desc.generic_arguments.as_slice() == [candidate]
        {
            return Ok(true);
        }

        if target_desc.is_interface() {
            Ok(Ancestry::of(self.store, candidate)?.contains(target))
        } else {
            Ok(base_chain(self.store, candidate)?.contains(&target))
        }
    }

    /// True iff some type among `candidate`, its base chain and its
    /// interfaces is an instantiation of `generic_definition`'s definition.
    ///
    /// A closed or non-generic `generic_definition` only matches itself.
    pub fn is_assignable_to_generic_definition(
        &self,
        generic_definition: TypeId,
        candidate: TypeId,
    ) -> Result<bool, RelationError> {
        self.store.descriptor(candidate)?;
        let shape = PatternShape::classify(self.store, generic_definition)?;
        let result = match shape {
            PatternShape::Definition { definition } | PatternShape::Facade { definition } => {
                find_instantiation(self.store, candidate, definition)?.is_some()
            }
            // Nullable value types only ever instantiate the wrapper directly.
            PatternShape::NullableWrapper {
                definition,
                open: true,
            } => candidate == generic_definition || self.store.definition_of(candidate) == Some(definition),
            PatternShape::NullableWrapper { open: false, .. }
            | PatternShape::Instantiation { .. }
            | PatternShape::Plain
            | PatternShape::Variable { .. } => candidate == generic_definition,
        };
        trace!(
            definition = %self.store.display(generic_definition),
            candidate = %self.store.display(candidate),
            ?shape,
            result,
            "is_assignable_to_generic_definition"
        );
        Ok(result)
    }

    /// A class declared static: no instance constructor, only static members.
    pub fn is_static_class(&self, ty: TypeId) -> Result<bool, RelationError> {
        let desc = self.store.descriptor(ty)?;
        Ok(desc.is_class() && desc.is_static())
    }
}

#[cfg(test)]
#[path = "../tests/assignability_tests.rs"]
mod tests;
