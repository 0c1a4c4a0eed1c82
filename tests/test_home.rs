//! Tests for the home page token selection.

use marketplace_api::home::{order_by_ids, pseudo_shuffle};
use std::collections::HashSet;

fn tokens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("1-0xcol-{}", i)).collect()
}

#[test]
fn test_same_seed_same_selection() {
    let list = tokens(20);
    for seed in [0, 1, 7, 1_700_000_000, u64::MAX] {
        assert_eq!(pseudo_shuffle(&list, seed, 6), pseudo_shuffle(&list, seed, 6));
    }
}

#[test]
fn test_selection_is_bounded_and_distinct() {
    let list = tokens(20);
    let picked = pseudo_shuffle(&list, 1_700_000_123, 6);
    assert_eq!(picked.len(), 6);
    let unique: HashSet<_> = picked.iter().collect();
    assert_eq!(unique.len(), 6);
    assert!(picked.iter().all(|t| list.contains(t)));
}

#[test]
fn test_large_size_yields_permutation() {
    let list = tokens(9);
    let picked = pseudo_shuffle(&list, 12345, 100);
    assert_eq!(picked.len(), list.len());
    let mut sorted = picked.clone();
    sorted.sort();
    let mut expected = list.clone();
    expected.sort();
    assert_eq!(sorted, expected);
}

#[test]
fn test_empty_inputs() {
    let empty: Vec<String> = Vec::new();
    assert!(pseudo_shuffle(&empty, 42, 5).is_empty());
    assert!(pseudo_shuffle(&tokens(3), 42, 0).is_empty());
}

#[test]
fn test_seed_zero_keeps_order() {
    let list = tokens(4);
    assert_eq!(pseudo_shuffle(&list, 0, 4), list);
}

#[test]
fn test_fetched_assets_follow_shuffled_order() {
    let ids = pseudo_shuffle(&tokens(5), 3, 3);
    let fetched: Vec<String> = ids.iter().rev().cloned().collect();
    assert_eq!(order_by_ids(&ids, fetched, |id| id.clone()), ids);
}

#[test]
fn test_checksummed_home_users_keep_their_slot() {
    let home: marketplace_api::cfg::HomeConfig =
        serde_json::from_value(serde_json::json!({ "users": "0xAbCd,0x1234" })).unwrap();
    let fetched = vec!["0x1234".to_string(), "0xabcd".to_string()];
    let ordered = order_by_ids(&home.users, fetched, |a| a.to_lowercase());
    assert_eq!(ordered, vec!["0xabcd".to_string(), "0x1234".to_string()]);
}
