//! Ancestor queries over the class and interface graphs.
//!
//! Class inheritance (`base_type`, one parent per type) and interface
//! implementation (many-to-many) are two distinct edge sets. An [`Ancestry`]
//! walks both breadth-first from a type, so every reachable supertype gets a
//! distance and the collection is ordered nearest first:
//!
//! ```text
//! List<int>                     0
//! Object, IList<int>, ...       1
//! ICollection<int>, ...         2
//! IEnumerable<int>, IEnumerable 3
//! ```
//!
//! Walks are bounded by [`MAX_ANCESTOR_DEPTH`] and [`MAX_ANCESTRY_SIZE`], so
//! a cyclic metadata source cannot hang a query.

use crate::error::RelationError;
use crate::store::TypeStore;
use crate::types::TypeId;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::trace;
use typerel_common::limits::{MAX_ANCESTOR_DEPTH, MAX_ANCESTRY_SIZE};

/// A type together with every type it can be widened to, nearest first.
#[derive(Clone, Debug)]
pub struct Ancestry {
    /// The type itself, then its base chain up to the root.
    chain: SmallVec<[TypeId; 8]>,
    /// Every reachable type with its distance, in breadth-first order.
    distances: IndexMap<TypeId, u32, FxBuildHasher>,
}

impl Ancestry {
    pub fn of(store: &TypeStore, ty: TypeId) -> Result<Self, RelationError> {
        let chain = base_chain(store, ty)?;

        let mut distances: IndexMap<TypeId, u32, FxBuildHasher> = IndexMap::default();
        let mut queue = VecDeque::new();
        distances.insert(ty, 0);
        queue.push_back((ty, 0u32));

        while let Some((current, distance)) = queue.pop_front() {
            if distance >= MAX_ANCESTOR_DEPTH || distances.len() >= MAX_ANCESTRY_SIZE {
                trace!(ty = ty.0, distance, "Ancestry::of - walk truncated");
                break;
            }
            let desc = store.descriptor(current)?;
            let neighbors = desc.base_type.into_iter().chain(desc.interfaces.iter().copied());
            for next in neighbors {
                if !distances.contains_key(&next) {
                    distances.insert(next, distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }

        Ok(Self { chain, distances })
    }

    /// The type itself followed by its base types, root last.
    pub fn chain(&self) -> &[TypeId] {
        &self.chain
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.distances.contains_key(&ty)
    }

    pub fn distance(&self, ty: TypeId) -> Option<u32> {
        self.distances.get(&ty).copied()
    }

    /// All reachable types in breadth-first order, including the type itself.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, u32)> + '_ {
        self.distances.iter().map(|(&ty, &d)| (ty, d))
    }

    /// Reachable interfaces, nearest first.
    pub fn interfaces<'a>(&'a self, store: &'a TypeStore) -> impl Iterator<Item = TypeId> + 'a {
        self.distances
            .keys()
            .copied()
            .filter(move |&ty| store.get(ty).is_some_and(|d| d.is_interface()))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// `ty`, its base type, that type's base, ... up to the root.
pub fn base_chain(store: &TypeStore, ty: TypeId) -> Result<SmallVec<[TypeId; 8]>, RelationError> {
    let mut chain: SmallVec<[TypeId; 8]> = SmallVec::new();
    let mut current = Some(ty);
    while let Some(id) = current {
        if chain.len() as u32 > MAX_ANCESTOR_DEPTH || chain.contains(&id) {
            trace!(ty = ty.0, "base_chain - cycle or depth limit");
            break;
        }
        chain.push(id);
        current = store.descriptor(id)?.base_type;
    }
    Ok(chain)
}

/// Interface-inheritance depth: 1 for an interface with no base interfaces,
/// otherwise one more than its deepest base interface.
pub fn interface_depth(store: &TypeStore, iface: TypeId) -> Result<u32, RelationError> {
    let mut memo = FxHashMap::default();
    interface_depth_memo(store, iface, 0, &mut memo)
}

fn interface_depth_memo(
    store: &TypeStore,
    iface: TypeId,
    level: u32,
    memo: &mut FxHashMap<TypeId, u32>,
) -> Result<u32, RelationError> {
    if let Some(&depth) = memo.get(&iface) {
        return Ok(depth);
    }
    if level >= MAX_ANCESTOR_DEPTH {
        return Ok(1);
    }
    let mut deepest = 0;
    for &base in &store.descriptor(iface)?.interfaces {
        deepest = deepest.max(interface_depth_memo(store, base, level + 1, memo)?);
    }
    memo.insert(iface, deepest + 1);
    Ok(deepest + 1)
}

/// The nearest type among `ty`, its base chain and its interfaces that was
/// built from `definition`.
pub fn find_instantiation(
    store: &TypeStore,
    ty: TypeId,
    definition: TypeId,
) -> Result<Option<TypeId>, RelationError> {
    // Fast path: the type itself.
    if store.descriptor(ty)?.definition == Some(definition) {
        return Ok(Some(ty));
    }
    let ancestry = Ancestry::of(store, ty)?;
    Ok(ancestry
        .iter()
        .map(|(ancestor, _)| ancestor)
        .find(|&ancestor| store.definition_of(ancestor) == Some(definition)))
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
