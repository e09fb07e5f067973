//! Structural matching of a concrete type against a pattern with variables.
//!
//! Used to infer the type arguments of a generic method from an argument
//! type: matching `Dictionary<int, string>` against `IDictionary<TKey, TValue>`
//! binds `TKey = int` and `TValue = string`.
//!
//! ## Dispatch on the pattern
//!
//! | Pattern | Rule |
//! |---------|------|
//! | variable `T` | bind `T` to the candidate, succeed |
//! | non-generic | candidate equals or is directly assignable to it |
//! | nullable wrapper | nullable candidate: match arguments; other value type: match the wrapped argument |
//! | generic | find the nearest instantiation of the pattern's definition among the candidate and its supertypes, match arguments pairwise |
//!
//! Generic arguments are invariant: `IList<int>` does not match `List<T>`.
//!
//! ## Bindings
//!
//! Bindings are appended as they are found and never retracted. When a match
//! fails halfway, the set still holds what the successful sub-matches bound.
//! Use [`StructuralMatcher::match_fresh`] to get bindings only on success.
//!
//! ## Termination
//!
//! Every recursive step moves to a generic argument of the pattern (or the
//! wrapped argument of a nullable pattern), so recursion depth never exceeds
//! the nesting of the pattern itself.

use crate::assignability::AssignabilityChecker;
use crate::bindings::BindingSet;
use crate::error::RelationError;
use crate::hierarchy::find_instantiation;
use crate::shape::PatternShape;
use crate::store::TypeStore;
use crate::types::TypeId;
use tracing::debug;

#[derive(Clone, Copy)]
pub struct StructuralMatcher<'a> {
    store: &'a TypeStore,
    checker: AssignabilityChecker<'a>,
}

impl<'a> StructuralMatcher<'a> {
    pub fn new(store: &'a TypeStore) -> Self {
        Self {
            store,
            checker: AssignabilityChecker::new(store),
        }
    }

    /// Match `candidate` against `pattern`, appending variable bindings.
    pub fn match_type(
        &self,
        candidate: TypeId,
        pattern: TypeId,
        bindings: &mut BindingSet,
    ) -> Result<bool, RelationError> {
        let matched = self.match_pattern(candidate, pattern, bindings)?;
        debug!(
            candidate = %self.store.display(candidate),
            pattern = %self.store.display(pattern),
            matched,
            bound = bindings.len(),
            "StructuralMatcher::match_type"
        );
        Ok(matched)
    }

    /// Match into a new binding set, returned only on success.
    pub fn match_fresh(&self, candidate: TypeId, pattern: TypeId) -> Result<Option<BindingSet>, RelationError> {
        let mut bindings = BindingSet::new();
        Ok(self
            .match_type(candidate, pattern, &mut bindings)?
            .then_some(bindings))
    }

    fn match_pattern(
        &self,
        candidate: TypeId,
        pattern: TypeId,
        bindings: &mut BindingSet,
    ) -> Result<bool, RelationError> {
        let candidate_desc = self.store.descriptor(candidate)?;
        let shape = PatternShape::classify(self.store, pattern)?;

        match shape {
            PatternShape::Variable { name } => {
                bindings.bind(name, candidate);
                Ok(true)
            }
            PatternShape::Plain => {
                Ok(candidate == pattern || self.checker.directly_assignable(pattern, candidate)?)
            }
            PatternShape::NullableWrapper { definition, .. } => {
                if candidate_desc.definition == Some(definition) {
                    self.match_arguments(candidate, pattern, bindings)
                } else if candidate_desc.is_value_type() {
                    // `int` against `T?` lifts to `int` against `T`.
                    match self.store.descriptor(pattern)?.generic_arguments.as_slice() {
                        [inner] => self.match_pattern(candidate, *inner, bindings),
                        _ => Ok(false),
                    }
                } else {
                    Ok(false)
                }
            }
            PatternShape::Definition { definition }
            | PatternShape::Facade { definition }
            | PatternShape::Instantiation { definition } => {
                match find_instantiation(self.store, candidate, definition)? {
                    Some(found) => self.match_arguments(found, pattern, bindings),
                    None => Ok(false),
                }
            }
        }
    }

    /// Match the generic arguments of `found` against those of `pattern`.
    fn match_arguments(
        &self,
        found: TypeId,
        pattern: TypeId,
        bindings: &mut BindingSet,
    ) -> Result<bool, RelationError> {
        let found_args = &self.store.descriptor(found)?.generic_arguments;
        let pattern_args = &self.store.descriptor(pattern)?.generic_arguments;
        if found_args.len() != pattern_args.len() {
            return Ok(false);
        }
        for (&arg, &pattern_arg) in found_args.iter().zip(pattern_args.iter()) {
            if !self.match_pattern(arg, pattern_arg, bindings)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod tests;
