//! The core runtime library.
//!
//! Installs the types every universe builds on: the universal root, the
//! value-type root, the nullable wrapper, primitive value types with keyword
//! aliases (`int`, `string`, ...) and the collection interfaces. Application
//! universes are declared on top of this.

use crate::decl::TypeDecl;
use crate::error::StoreError;
use crate::store::TypeStore;

pub const SYSTEM: &str = "System";
pub const COLLECTIONS: &str = "System.Collections";
pub const GENERIC_COLLECTIONS: &str = "System.Collections.Generic";
pub const LINQ: &str = "System.Linq";
pub const COMPONENT_MODEL: &str = "System.ComponentModel";

/// Primitive value types and their keyword aliases.
const PRIMITIVES: &[(&str, &str)] = &[
    ("Int32", "int"),
    ("Int64", "long"),
    ("Double", "double"),
    ("Boolean", "bool"),
    ("Char", "char"),
];

pub fn install_core_library(store: &mut TypeStore) -> Result<(), StoreError> {
    let object = store.declare(&TypeDecl::class("Object").in_namespace(SYSTEM))?;
    store.set_root(object)?;
    store.alias("object", object)?;

    let value_type =
        store.declare(&TypeDecl::class("ValueType").in_namespace(SYSTEM).abstract_class())?;
    store.set_value_type_root(value_type)?;

    for decl in [
        TypeDecl::interface("IDisposable").in_namespace(SYSTEM),
        TypeDecl::interface("IComparable").in_namespace(SYSTEM),
        TypeDecl::interface("IComparable")
            .in_namespace(SYSTEM)
            .with_params(["T"]),
        TypeDecl::interface("IEquatable")
            .in_namespace(SYSTEM)
            .with_params(["T"]),
        // Non-generic collections
        TypeDecl::interface("IEnumerable").in_namespace(COLLECTIONS),
        TypeDecl::interface("ICollection")
            .in_namespace(COLLECTIONS)
            .implements(["IEnumerable"]),
        TypeDecl::interface("IList")
            .in_namespace(COLLECTIONS)
            .implements(["ICollection"]),
        // Generic collections
        TypeDecl::interface("IEnumerable")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["System.Collections.IEnumerable"]),
        TypeDecl::interface("ICollection")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["IEnumerable<T>"]),
        TypeDecl::interface("IList")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["ICollection<T>"]),
        TypeDecl::interface("IReadOnlyCollection")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["IEnumerable<T>"]),
        TypeDecl::interface("IReadOnlyList")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["IReadOnlyCollection<T>"]),
        TypeDecl::value_type("KeyValuePair")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["TKey", "TValue"]),
        TypeDecl::interface("IDictionary")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["TKey", "TValue"])
            .implements(["ICollection<KeyValuePair<TKey, TValue>>"]),
        TypeDecl::interface("IReadOnlyDictionary")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["TKey", "TValue"])
            .implements(["IReadOnlyCollection<KeyValuePair<TKey, TValue>>"]),
        TypeDecl::class("List")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["T"])
            .implements(["IList<T>", "IReadOnlyList<T>", "IList"]),
        TypeDecl::class("Dictionary")
            .in_namespace(GENERIC_COLLECTIONS)
            .with_params(["TKey", "TValue"])
            .implements(["IDictionary<TKey, TValue>", "IReadOnlyDictionary<TKey, TValue>"]),
        // Queries
        TypeDecl::interface("IQueryable")
            .in_namespace(LINQ)
            .implements(["IEnumerable"]),
        TypeDecl::interface("IQueryable")
            .in_namespace(LINQ)
            .with_params(["T"])
            .implements(["IEnumerable<T>", "IQueryable"]),
        TypeDecl::class("Enumerable").in_namespace(LINQ).static_class(),
    ] {
        store.declare(&decl)?;
    }

    let nullable = store.declare(
        &TypeDecl::value_type("Nullable")
            .in_namespace(SYSTEM)
            .with_params(["T"]),
    )?;
    store.set_nullable_definition(nullable)?;

    for &(name, alias) in PRIMITIVES {
        let id = store.declare(&TypeDecl::value_type(name).in_namespace(SYSTEM).implements([
            "IComparable".to_string(),
            format!("IComparable<{name}>"),
            format!("IEquatable<{name}>"),
        ]))?;
        store.alias(alias, id)?;
    }

    let string = store.declare(
        &TypeDecl::class("String")
            .in_namespace(SYSTEM)
            .sealed()
            .implements([
                "IEnumerable<char>",
                "IComparable",
                "IComparable<String>",
                "IEquatable<String>",
            ]),
    )?;
    store.alias("string", string)?;

    store.declare(
        &TypeDecl::class("MarshalByRefObject")
            .in_namespace(SYSTEM)
            .abstract_class(),
    )?;
    store.declare(
        &TypeDecl::interface("IComponent")
            .in_namespace(COMPONENT_MODEL)
            .implements(["IDisposable"]),
    )?;
    store.declare(
        &TypeDecl::class("Component")
            .in_namespace(COMPONENT_MODEL)
            .extends("MarshalByRefObject")
            .implements(["IComponent"]),
    )?;

    Ok(())
}

#[cfg(test)]
#[path = "../tests/well_known_tests.rs"]
mod tests;
