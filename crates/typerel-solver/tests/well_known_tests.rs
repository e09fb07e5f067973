use super::*;
use crate::TypeFlags;

fn core() -> TypeStore {
    TypeStore::with_core_library().unwrap()
}

#[test]
fn test_roles_are_registered() {
    let store = core();
    let wk = store.well_known();

    let root = wk.root.unwrap();
    assert_eq!(store.qualified_name(root), "System.Object");
    assert_eq!(store.get(root).unwrap().base_type, None);

    let value_root = wk.value_type_root.unwrap();
    assert_eq!(store.qualified_name(value_root), "System.ValueType");
    assert_eq!(store.get(value_root).unwrap().base_type, Some(root));

    let nullable = wk.nullable.unwrap();
    assert_eq!(store.display(nullable), "Nullable<T>");
}

#[test]
fn test_keyword_aliases() {
    let store = core();
    for (alias, qualified) in [
        ("object", "System.Object"),
        ("int", "System.Int32"),
        ("long", "System.Int64"),
        ("double", "System.Double"),
        ("bool", "System.Boolean"),
        ("char", "System.Char"),
        ("string", "System.String"),
    ] {
        let id = store.lookup(alias, 0).unwrap();
        assert_eq!(store.qualified_name(id), qualified);
        assert_eq!(store.display(id), alias);
    }
}

#[test]
fn test_primitives_are_comparable_value_types() {
    let mut store = core();
    let int = store.parse_type("int").unwrap();
    let equatable = store.parse_type("IEquatable<int>").unwrap();
    let desc = store.get(int).unwrap();

    assert!(desc.is_value_type());
    assert_eq!(desc.base_type, store.well_known().value_type_root);
    assert!(desc.interfaces.contains(&equatable));
}

#[test]
fn test_string_is_a_sealed_sequence_of_chars() {
    let mut store = core();
    let string = store.parse_type("string").unwrap();
    let chars = store.parse_type("IEnumerable<char>").unwrap();
    let desc = store.get(string).unwrap();

    assert!(desc.is_class());
    assert!(desc.flags.contains(TypeFlags::SEALED));
    assert!(desc.interfaces.contains(&chars));
}

#[test]
fn test_static_and_component_types() {
    let mut store = core();
    let enumerable = store.parse_type("System.Linq.Enumerable").unwrap();
    let component = store.parse_type("Component").unwrap();
    let marshal = store.parse_type("MarshalByRefObject").unwrap();
    let disposable = store.parse_type("IDisposable").unwrap();

    assert!(store.get(enumerable).unwrap().is_static());
    assert_eq!(store.get(component).unwrap().base_type, Some(marshal));
    assert!(crate::Ancestry::of(&store, component).unwrap().contains(disposable));
}

#[test]
fn test_namespaces() {
    let mut store = core();
    for (text, qualified) in [
        ("List<>", "System.Collections.Generic.List"),
        ("IQueryable<>", "System.Linq.IQueryable"),
        ("IComponent", "System.ComponentModel.IComponent"),
        ("System.Collections.IList", "System.Collections.IList"),
    ] {
        let id = store.parse_type(text).unwrap();
        assert_eq!(store.qualified_name(id), qualified, "{text}");
    }
    assert_eq!(SYSTEM, "System");
    assert_eq!(GENERIC_COLLECTIONS, "System.Collections.Generic");
}
