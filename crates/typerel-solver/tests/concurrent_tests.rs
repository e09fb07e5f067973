//! A built store is shared read-only across threads; each thread owns its
//! own binding sets.

use crate::fixtures::{pattern, store, ty};
use crate::{AssignabilityChecker, CommonBaseResolver, StructuralMatcher, TypeId};
use rayon::prelude::*;

#[test]
fn test_parallel_queries_match_sequential_results() {
    let mut store = store();
    let candidates: Vec<TypeId> = [
        "List<int>",
        "Dictionary<int, string>",
        "Derived2<long>",
        "DerivedI<int>",
        "string",
        "int?",
        "SqlCommand",
    ]
    .iter()
    .map(|text| ty(&mut store, text))
    .collect();
    let enumerable_def = ty(&mut store, "IEnumerable<>");
    let ibase_def = ty(&mut store, "IBase<>");
    let enumerable_of_t = pattern(&mut store, "IEnumerable<T>", &["T"]);
    let store = &store;

    let run = |candidate: TypeId| {
        let checker = AssignabilityChecker::new(store);
        let matcher = StructuralMatcher::new(store);
        (
            checker
                .is_assignable_to_generic_definition(enumerable_def, candidate)
                .unwrap(),
            checker
                .is_assignable_to_generic_definition(ibase_def, candidate)
                .unwrap(),
            matcher
                .match_fresh(candidate, enumerable_of_t)
                .unwrap()
                .map(|bindings| bindings.len()),
        )
    };

    let sequential: Vec<_> = candidates.iter().map(|&c| run(c)).collect();
    let parallel: Vec<_> = candidates.par_iter().map(|&c| run(c)).collect();
    assert_eq!(sequential, parallel);
    assert_eq!(sequential[0], (true, false, Some(1)));
    assert_eq!(sequential[2], (false, true, None));
}

#[test]
fn test_parallel_common_ancestor() {
    let mut store = store();
    let sets: Vec<Vec<TypeId>> = [
        &["OleDbCommand", "OdbcCommand", "SqlCommand"][..],
        &["Scheduler", "CacheRefresherEventHandler"][..],
        &["PropertyAliasDto", "ContentDto"][..],
    ]
    .iter()
    .map(|names| names.iter().map(|n| ty(&mut store, n)).collect())
    .collect();
    let store = &store;

    let results: Vec<Option<String>> = (0..64)
        .into_par_iter()
        .map(|i| {
            let set = &sets[i % sets.len()];
            CommonBaseResolver::new(store)
                .lowest_common_ancestor(set)
                .unwrap()
                .result()
                .map(|id| store.display(id))
        })
        .collect();

    for (i, result) in results.iter().enumerate() {
        let expected = match i % 3 {
            0 => Some("DbCommand"),
            1 => Some("IApplicationEventHandler"),
            _ => None,
        };
        assert_eq!(result.as_deref(), expected);
    }
}
