use super::*;
use crate::fixtures::{store, ty};

#[test]
fn test_ancestry_is_breadth_first() {
    let mut store = store();
    let list = ty(&mut store, "List<int>");
    let object = ty(&mut store, "object");
    let ilist = ty(&mut store, "IList<int>");
    let icollection = ty(&mut store, "ICollection<int>");
    let enumerable = ty(&mut store, "IEnumerable<int>");
    let plain = ty(&mut store, "System.Collections.IEnumerable");
    let ancestry = Ancestry::of(&store, list).unwrap();

    assert_eq!(ancestry.distance(list), Some(0));
    assert_eq!(ancestry.distance(object), Some(1));
    assert_eq!(ancestry.distance(ilist), Some(1));
    assert_eq!(ancestry.distance(icollection), Some(2));
    assert_eq!(ancestry.distance(enumerable), Some(3));
    // Three hops through the non-generic IList and ICollection.
    assert_eq!(ancestry.distance(plain), Some(3));

    let distances: Vec<u32> = ancestry.iter().map(|(_, d)| d).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ancestry.iter().next(), Some((list, 0)));
}

#[test]
fn test_ancestry_excludes_unrelated_types() {
    let mut store = store();
    let list = ty(&mut store, "List<int>");
    let queryable = ty(&mut store, "IQueryable<int>");
    let longs = ty(&mut store, "IEnumerable<long>");
    let ancestry = Ancestry::of(&store, list).unwrap();

    assert!(!ancestry.contains(queryable));
    assert!(!ancestry.contains(longs));
    assert!(!ancestry.is_empty());
}

#[test]
fn test_ancestry_interfaces_only() {
    let mut store = store();
    let derived2 = ty(&mut store, "Derived2<int>");
    let ibase = ty(&mut store, "IBase<int>");
    let ancestry = Ancestry::of(&store, derived2).unwrap();

    let interfaces: Vec<TypeId> = ancestry.interfaces(&store).collect();
    assert_eq!(interfaces, vec![ibase]);
    assert_eq!(ancestry.len(), 5);
}

#[test]
fn test_base_chain_and_height() {
    let mut store = store();
    let derived2 = ty(&mut store, "Derived2<int>");
    let derived = ty(&mut store, "Derived<int>");
    let base = ty(&mut store, "Base<int>");
    let object = ty(&mut store, "object");
    let int = ty(&mut store, "int");
    let iface = ty(&mut store, "IBase<int>");

    assert_eq!(
        base_chain(&store, derived2).unwrap().as_slice(),
        [derived2, derived, base, object]
    );
    assert_eq!(base_chain(&store, object).unwrap().as_slice(), [object]);
    assert_eq!(base_chain(&store, int).unwrap().len(), 3);
    assert_eq!(base_chain(&store, iface).unwrap().as_slice(), [iface]);
}

#[test]
fn test_interface_depth() {
    let mut store = store();
    let plain = ty(&mut store, "System.Collections.IEnumerable");
    let enumerable = ty(&mut store, "IEnumerable<int>");
    let ilist = ty(&mut store, "IList<int>");
    let deep = ty(&mut store, "IDeep");

    assert_eq!(interface_depth(&store, plain).unwrap(), 1);
    assert_eq!(interface_depth(&store, enumerable).unwrap(), 2);
    assert_eq!(interface_depth(&store, ilist).unwrap(), 4);
    assert_eq!(interface_depth(&store, deep).unwrap(), 3);
}

#[test]
fn test_find_instantiation() {
    let mut store = store();
    let dict = ty(&mut store, "Dictionary<int, string>");
    let enumerable_def = ty(&mut store, "IEnumerable<>");
    let pairs = ty(&mut store, "IEnumerable<KeyValuePair<int, string>>");
    let list_def = ty(&mut store, "List<>");

    assert_eq!(
        find_instantiation(&store, dict, enumerable_def).unwrap(),
        Some(pairs)
    );
    assert_eq!(find_instantiation(&store, dict, list_def).unwrap(), None);
    assert_eq!(find_instantiation(&store, pairs, enumerable_def).unwrap(), Some(pairs));
}

#[test]
fn test_unknown_handle() {
    let store = store();
    let bogus = TypeId(u32::MAX);
    assert_eq!(
        Ancestry::of(&store, bogus).unwrap_err(),
        RelationError::UnknownType(bogus)
    );
    assert!(base_chain(&store, bogus).is_err());
}
