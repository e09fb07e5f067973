//! Variable bindings collected by structural matching.

use crate::types::TypeId;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use typerel_common::Atom;

/// Type-variable name -> the types it was bound to, in binding order.
///
/// A variable that occurs several times in a pattern is bound once per
/// occurrence, so `Func<T, T>` against `Func<int, long>` leaves `T` with two
/// candidates. Agreement is checked by the caller through
/// [`unique`](Self::unique) or [`is_consistent`](Self::is_consistent).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingSet {
    entries: IndexMap<Atom, SmallVec<[TypeId; 2]>, FxBuildHasher>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate for `name`.
    pub fn bind(&mut self, name: Atom, ty: TypeId) {
        self.entries.entry(name).or_default().push(ty);
    }

    pub fn get(&self, name: Atom) -> Option<&[TypeId]> {
        self.entries.get(&name).map(|tys| tys.as_slice())
    }

    pub fn first(&self, name: Atom) -> Option<TypeId> {
        self.get(name).and_then(|tys| tys.first().copied())
    }

    /// The single type `name` is bound to, if every candidate agrees.
    pub fn unique(&self, name: Atom) -> Option<TypeId> {
        let (&first, rest) = self.get(name)?.split_first()?;
        rest.iter().all(|&ty| ty == first).then_some(first)
    }

    pub fn is_consistent(&self) -> bool {
        self.entries.keys().all(|&name| self.unique(name).is_some())
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variable names in first-bound order.
    pub fn names(&self) -> impl Iterator<Item = Atom> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, &[TypeId])> + '_ {
        self.entries.iter().map(|(&name, tys)| (name, tys.as_slice()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../tests/bindings_tests.rs"]
mod tests;
