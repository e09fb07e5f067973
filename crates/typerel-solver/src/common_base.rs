//! Lowest common ancestor of a set of types.
//!
//! The result is the most specific type every input can be widened to,
//! ignoring the universal root:
//!
//! 1. Intersect the ancestries of all inputs (each input included), keeping
//!    the breadth-first order of the first input.
//! 2. If some input is a class or value type and a common class exists, the
//!    most derived common class wins.
//! 3. Otherwise the deepest common interface wins. Equal depths are broken by
//!    how many inputs the interface is nearest to, then by distance from the
//!    first input, then by breadth-first order.
//!
//! An empty intersection is a failed match, not an error.

use crate::error::RelationError;
use crate::hierarchy::{Ancestry, interface_depth};
use crate::store::TypeStore;
use crate::types::TypeId;
use tracing::debug;

/// Outcome of a common-ancestor query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AncestorMatch {
    result: Option<TypeId>,
}

impl AncestorMatch {
    pub const NONE: AncestorMatch = AncestorMatch { result: None };

    pub const fn found(ty: TypeId) -> Self {
        Self { result: Some(ty) }
    }

    pub const fn success(&self) -> bool {
        self.result.is_some()
    }

    /// The common ancestor; `None` exactly when the query failed.
    pub const fn result(&self) -> Option<TypeId> {
        self.result
    }
}

#[derive(Clone, Copy)]
pub struct CommonBaseResolver<'a> {
    store: &'a TypeStore,
}

impl<'a> CommonBaseResolver<'a> {
    pub fn new(store: &'a TypeStore) -> Self {
        Self { store }
    }

    pub fn lowest_common_ancestor(&self, types: &[TypeId]) -> Result<AncestorMatch, RelationError> {
        let (&first, rest) = types.split_first().ok_or(RelationError::EmptyTypeSet)?;
        for &ty in types {
            self.store.descriptor(ty)?;
        }

        let found = if rest.iter().all(|&ty| ty == first) {
            Some(first)
        } else {
            self.resolve(types)?
        };

        debug!(
            inputs = types.len(),
            first = %self.store.display(first),
            result = ?found.map(|ty| self.store.display(ty)),
            "CommonBaseResolver::lowest_common_ancestor"
        );
        Ok(found.map_or(AncestorMatch::NONE, AncestorMatch::found))
    }

    fn resolve(&self, types: &[TypeId]) -> Result<Option<TypeId>, RelationError> {
        let ancestries = types
            .iter()
            .map(|&ty| Ancestry::of(self.store, ty))
            .collect::<Result<Vec<_>, _>>()?;
        let (first, others) = (&ancestries[0], &ancestries[1..]);

        let common: Vec<TypeId> = first
            .iter()
            .map(|(ty, _)| ty)
            .filter(|&ty| !self.store.is_root(ty) && others.iter().all(|a| a.contains(ty)))
            .collect();
        if common.is_empty() {
            return Ok(None);
        }

        let has_class_input = types
            .iter()
            .any(|&ty| self.store.get(ty).is_some_and(|d| !d.is_interface()));
        if has_class_input {
            // The first input's chain runs most derived first.
            let class = first.chain().iter().copied().find(|&ty| {
                common.contains(&ty) && self.store.get(ty).is_some_and(|d| !d.is_interface())
            });
            if class.is_some() {
                return Ok(class);
            }
        }

        let mut best: Option<(TypeId, (u32, usize, std::cmp::Reverse<u32>))> = None;
        let interfaces: Vec<TypeId> = common
            .into_iter()
            .filter(|&ty| self.store.get(ty).is_some_and(|d| d.is_interface()))
            .collect();
        for &iface in &interfaces {
            let key = (
                interface_depth(self.store, iface)?,
                self.votes(iface, &interfaces, &ancestries),
                std::cmp::Reverse(first.distance(iface).unwrap_or(u32::MAX)),
            );
            // Strictly greater keeps the earliest candidate on a full tie.
            if best.is_none_or(|(_, best_key)| key > best_key) {
                best = Some((iface, key));
            }
        }
        Ok(best.map(|(iface, _)| iface))
    }

    /// Number of inputs for which `iface` is among the nearest candidates.
    fn votes(&self, iface: TypeId, candidates: &[TypeId], ancestries: &[Ancestry]) -> usize {
        ancestries
            .iter()
            .filter(|ancestry| {
                let nearest = candidates
                    .iter()
                    .filter_map(|&c| ancestry.distance(c))
                    .min();
                nearest.is_some() && ancestry.distance(iface) == nearest
            })
            .count()
    }
}

#[cfg(test)]
#[path = "../tests/common_base_tests.rs"]
mod tests;
