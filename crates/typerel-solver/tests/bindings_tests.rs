use super::*;
use typerel_common::Interner;

#[test]
fn test_bind_appends_in_order() {
    let mut interner = Interner::new();
    let t = interner.intern("T");
    let u = interner.intern("U");
    let mut bindings = BindingSet::new();

    bindings.bind(u, TypeId(7));
    bindings.bind(t, TypeId(3));
    bindings.bind(u, TypeId(9));

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings.names().collect::<Vec<_>>(), vec![u, t]);
    assert_eq!(bindings.get(u), Some(&[TypeId(7), TypeId(9)][..]));
    assert_eq!(bindings.first(u), Some(TypeId(7)));
    assert_eq!(bindings.unique(u), None);
    assert_eq!(bindings.unique(t), Some(TypeId(3)));
    assert!(!bindings.is_consistent());
}

#[test]
fn test_unbound_variable() {
    let mut interner = Interner::new();
    let t = interner.intern("T");
    let bindings = BindingSet::new();

    assert!(bindings.is_empty());
    assert!(bindings.is_consistent());
    assert_eq!(bindings.get(t), None);
    assert_eq!(bindings.first(t), None);
    assert_eq!(bindings.unique(t), None);
}

#[test]
fn test_clear() {
    let mut interner = Interner::new();
    let t = interner.intern("T");
    let mut bindings = BindingSet::new();
    bindings.bind(t, TypeId(1));
    bindings.bind(t, TypeId(1));
    assert!(bindings.is_consistent());
    assert_eq!(bindings.iter().count(), 1);

    bindings.clear();
    assert!(bindings.is_empty());
}
