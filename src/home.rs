use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Seed for [`pseudo_shuffle`]: UNIX time in whole seconds, so every request
/// within the same second sees the same selection.
pub fn shuffle_seed(now: DateTime<Utc>) -> u64 {
    now.timestamp().max(0) as u64
}

/// Picks up to `size` items from `list`, repeatedly taking the element at
/// `seed % remaining` out of a working copy.
///
/// The result depends only on the arguments. With `size >= list.len()` it is a
/// permutation of the whole list.
pub fn pseudo_shuffle<T: Clone>(list: &[T], seed: u64, size: usize) -> Vec<T> {
    let mut working = list.to_vec();
    let mut result = Vec::with_capacity(size.min(working.len()));
    while result.len() < size && !working.is_empty() {
        let index = (seed % working.len() as u64) as usize;
        result.push(working.remove(index));
    }
    result
}

/// Returns `items` in the order of `ids`. Ids without a matching item are
/// skipped, as are items whose id is not listed.
pub fn order_by_ids<T, F>(ids: &[String], items: Vec<T>, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut by_id: HashMap<String, T> = items.into_iter().map(|item| (id_of(&item), item)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn takes_seed_modulo_remaining_length() {
        let list = vec!["a", "b", "c", "d", "e"];
        // 7 % 5 = 2 -> c, 7 % 4 = 3 -> e, 7 % 3 = 1 -> b
        assert_eq!(pseudo_shuffle(&list, 7, 3), vec!["c", "e", "b"]);
    }

    #[test]
    fn seed_is_whole_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(shuffle_seed(now), 1_700_000_000);
    }

    #[test]
    fn order_by_ids_drops_missing() {
        let ids = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        let items = vec![("1", 10), ("3", 30), ("4", 40)];
        let ordered = order_by_ids(&ids, items, |item| item.0.to_string());
        assert_eq!(ordered, vec![("3", 30), ("1", 10)]);
    }
}
