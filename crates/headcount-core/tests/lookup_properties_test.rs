//! Property tests for the lookup engine: ordering, witnesses, purity,
//! constraint-order robustness, and agreement with a naive scan.

use std::collections::BTreeSet;

use proptest::prelude::*;

use headcount_core::hierarchy::{Constraints, HierarchyLevel, PositionRecord, RawRow};
use headcount_core::LookupEngine;

/// Small alphabets so that constraints actually hit rows.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(" ".to_string()),
        "[ab]",
        "[AB][12]",
    ]
}

fn raw_row() -> impl Strategy<Value = RawRow> {
    prop::collection::vec(cell(), 0..=8).prop_map(RawRow::from)
}

fn level() -> impl Strategy<Value = HierarchyLevel> {
    (0usize..HierarchyLevel::COUNT).prop_map(|i| HierarchyLevel::from_index(i).unwrap())
}

fn constraints() -> impl Strategy<Value = Constraints> {
    prop::collection::vec((level(), cell()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect::<Constraints>())
}

fn naive(rows: &[RawRow], level: HierarchyLevel, c: &Constraints) -> Vec<String> {
    rows.iter()
        .map(PositionRecord::from_raw)
        .filter(PositionRecord::has_hierarchy)
        .filter(|r| c.matches(r, level))
        .map(|r| r.field(level).to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

proptest! {
    #[test]
    fn prop_results_sorted_unique_nonempty(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
    ) {
        let engine = LookupEngine::build(rows);
        let out = engine.options_for(level, &c);
        prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(out.iter().all(|v| !v.is_empty()));
    }

    #[test]
    fn prop_every_value_has_a_witness_row(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
    ) {
        let engine = LookupEngine::build(rows);
        for value in engine.options_for(level, &c) {
            let witnessed = engine
                .records()
                .iter()
                .any(|r| c.matches(r, level) && r.field(level) == value);
            prop_assert!(witnessed, "no witness for {value} at {level}");
        }
    }

    #[test]
    fn prop_index_matches_naive_scan(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
    ) {
        let engine = LookupEngine::build(rows.clone());
        prop_assert_eq!(engine.options_for(level, &c), naive(&rows, level, &c));
    }

    #[test]
    fn prop_queries_are_idempotent(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
    ) {
        let engine = LookupEngine::build(rows);
        prop_assert_eq!(engine.options_for(level, &c), engine.options_for(level, &c));
        prop_assert_eq!(engine.requester_names(), engine.requester_names());
    }

    #[test]
    fn prop_later_constraints_do_not_change_result(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
        extra_offset in 0usize..HierarchyLevel::COUNT,
        extra_value in cell(),
    ) {
        let engine = LookupEngine::build(rows);
        let extra_idx = level.index() + extra_offset % (HierarchyLevel::COUNT - level.index());
        let extra_level = HierarchyLevel::from_index(extra_idx).unwrap();
        let noisy = c.clone().with(extra_level, extra_value);
        let prefix_only: Constraints = c.prefix_for(level).collect();
        prop_assert_eq!(
            engine.options_for(level, &noisy),
            engine.options_for(level, &prefix_only)
        );
    }

    #[test]
    fn prop_valid_selection_agrees_with_options(
        rows in prop::collection::vec(raw_row(), 0..30),
        level in level(),
        c in constraints(),
        value in cell(),
    ) {
        let engine = LookupEngine::build(rows);
        let listed = engine.options_for(level, &c).contains(&value);
        prop_assert_eq!(engine.is_valid_selection(level, &value, &c), listed && !value.is_empty());
    }

    #[test]
    fn prop_requesters_sorted_unique_nonempty(rows in prop::collection::vec(raw_row(), 0..30)) {
        let engine = LookupEngine::build(rows);
        let names = engine.requester_names();
        prop_assert!(names.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(names.iter().all(|n| !n.is_empty() && n.trim() == n));
    }
}
