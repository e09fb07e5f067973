use super::*;
use crate::fixtures::{pattern, store, ty};

#[test]
fn test_classify_each_shape() {
    let mut store = store();
    let t = pattern(&mut store, "T", &["T"]);
    let int = ty(&mut store, "int");
    let enumerable = ty(&mut store, "IEnumerable");
    let open_dict = ty(&mut store, "IDictionary<,>");
    let facade = pattern(&mut store, "IEnumerable<T>", &["T"]);
    let closed = ty(&mut store, "List<int>");
    let partial = pattern(&mut store, "IDictionary<T, int>", &["T"]);
    let list_def = ty(&mut store, "List<>");
    let enumerable_def = ty(&mut store, "IEnumerable<>");

    let shape = |id| PatternShape::classify(&store, id).unwrap();
    assert!(matches!(shape(t), PatternShape::Variable { .. }));
    assert_eq!(shape(int), PatternShape::Plain);
    assert_eq!(shape(enumerable), PatternShape::Plain);
    assert_eq!(shape(open_dict), PatternShape::Definition { definition: open_dict });
    assert_eq!(shape(facade), PatternShape::Facade { definition: enumerable_def });
    assert_eq!(shape(closed), PatternShape::Instantiation { definition: list_def });
    assert_eq!(shape(partial), PatternShape::Instantiation { definition: open_dict });
}

#[test]
fn test_classify_nullable_wrapper() {
    let mut store = store();
    let nullable_def = ty(&mut store, "Nullable<>");
    let nullable_int = ty(&mut store, "int?");
    let nullable_t = pattern(&mut store, "T?", &["T"]);

    let shape = |id| PatternShape::classify(&store, id).unwrap();
    assert_eq!(
        shape(nullable_def),
        PatternShape::NullableWrapper { definition: nullable_def, open: true }
    );
    assert_eq!(
        shape(nullable_t),
        PatternShape::NullableWrapper { definition: nullable_def, open: true }
    );
    assert_eq!(
        shape(nullable_int),
        PatternShape::NullableWrapper { definition: nullable_def, open: false }
    );
    assert!(shape(nullable_t).is_open_generic());
    assert!(!shape(nullable_int).is_open_generic());
}

#[test]
fn test_variable_carries_parameter_name() {
    let mut store = store();
    let key = pattern(&mut store, "TKey", &["TKey"]);
    let PatternShape::Variable { name } = PatternShape::classify(&store, key).unwrap() else {
        panic!("expected a variable");
    };
    assert_eq!(store.resolve_atom(name), "TKey");
    assert_eq!(PatternShape::Variable { name }.definition(), None);
}
