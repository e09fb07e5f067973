//! String interner for type names.
//!
//! Type names, namespaces and generic parameter names are interned into a
//! single pool and passed around as `u32` handles (`Atom`). Two descriptors
//! with the same name compare their atoms instead of their strings, and
//! binding sets key variables by atom.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// An interned string identifier.
///
/// Atoms are cheap to copy and compare. Use [`Interner::resolve`] to get the
/// text back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty string.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names that show up in nearly every type universe: the core runtime
/// namespaces, the keyword aliases and the conventional parameter names.
const COMMON_STRINGS: &[&str] = &[
    "System",
    "System.Collections",
    "System.Collections.Generic",
    "System.Linq",
    "System.ComponentModel",
    "Object",
    "ValueType",
    "Nullable",
    "String",
    "Int32",
    "Int64",
    "Boolean",
    "Double",
    "object",
    "string",
    "int",
    "long",
    "bool",
    "double",
    "T",
    "TKey",
    "TValue",
    "TSource",
    "TResult",
];

/// Single-owner string interner.
///
/// ```
/// use typerel_common::Interner;
///
/// let mut interner = Interner::new();
/// let a1 = interner.intern("TKey");
/// let a2 = interner.intern("TKey");
/// assert_eq!(a1, a2);
/// assert_eq!(interner.resolve(a1), "TKey");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Interner {
    map: FxHashMap<Arc<str>, Atom>,
    /// Index 0 is the empty string.
    strings: Vec<Arc<str>>,
}

impl Interner {
    /// Create an interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: Arc<str> = Arc::from("");
        interner.strings.push(empty.clone());
        interner.map.insert(empty, Atom::NONE);
        interner
    }

    /// Intern a string, returning the existing atom when already present.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.map.get(s) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, atom);
        atom
    }

    /// Look up a string without interning it.
    #[inline]
    pub fn lookup(&self, s: &str) -> Option<Atom> {
        self.map.get(s).copied()
    }

    /// Resolve an atom back to its text.
    /// Returns the empty string for out-of-range atoms.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or("")
    }

    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        self.strings.get(atom.0 as usize).map(|s| s.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True when only the empty string is interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }

    /// Pre-intern the core runtime names.
    pub fn intern_common(&mut self) {
        for s in COMMON_STRINGS {
            self.intern(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_none() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern(""), Atom::NONE);
        assert!(interner.is_empty());
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut interner = Interner::new();
        assert_eq!(interner.lookup("TValue"), None);
        let atom = interner.intern("TValue");
        assert_eq!(interner.lookup("TValue"), Some(atom));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_out_of_range_resolves_empty() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Atom(42)), "");
        assert_eq!(interner.try_resolve(Atom(42)), None);
    }

    #[test]
    fn test_common_strings_are_stable() {
        let mut interner = Interner::new();
        interner.intern_common();
        let before = interner.len();
        let t = interner.intern("T");
        assert_eq!(interner.len(), before);
        assert_eq!(interner.resolve(t), "T");
    }
}
