//! Candidate collection, re-rank ("qualify"), and the combined search.

use crate::accessor::{Item, ItemAccessor};
use crate::bitkey::BitKey;
use crate::distance::angular_distance;
use crate::error::Result;
use crate::storage::Storage;
use std::collections::BTreeMap;

/// A re-ranked result: the resolved record plus its true distance to the
/// query.
#[derive(Clone, Debug)]
pub struct QualifiedItem<T> {
    /// The resolved record.
    pub item: T,
    /// Its true angular distance to the query vector.
    pub distance: f32,
}

/// Collects candidate item ids close to `query_key` in hash space.
///
/// Enumerates every bucket key present in `bucket_map`, sorts by ascending
/// Hamming distance from `query_key`, and drains bucket chains in that
/// order. Stops once `limit` items have been accumulated AND the next
/// bucket's distance is strictly greater than the last consumed distance
/// (the "tie-drain" rule: all buckets tied at the current distance are
/// drained even past `limit`).
///
/// Returns items in collection order, not yet ranked by true distance.
/// `limit == 0` or an empty bucket map yields an empty result.
pub fn candidates(
    query_key: &BitKey,
    bucket_map: &BTreeMap<u32, usize>,
    storage: &Storage,
    bitsize: usize,
    limit: usize,
) -> Vec<u64> {
    if limit == 0 || bucket_map.is_empty() {
        return Vec::new();
    }

    let mut keys: Vec<BitKey> = bucket_map
        .keys()
        .map(|&u| BitKey::from_u32(u, bitsize))
        .collect();
    BitKey::sort_by_distance_from(&mut keys, query_key);

    let mut items = Vec::new();
    let mut last_dist: Option<u32> = None;

    for key in keys {
        let this_dist = BitKey::hamming(query_key, &key);
        if let Some(last) = last_dist {
            if this_dist != last && items.len() >= limit {
                break;
            }
        }
        last_dist = Some(this_dist);

        let head = bucket_map[&key.to_u32()];
        for page in storage.iterate(head) {
            items.extend_from_slice(page.items());
        }
    }

    items
}

/// Re-ranks `candidates` by ascending true angular distance to `query`,
/// preserving original candidate order on ties, and truncates to the top
/// `min(limit, candidates.len())`.
///
/// Item ids that resolve to `None` via `accessor.get` are skipped, not
/// treated as errors.
///
/// # Errors
///
/// Propagates [`crate::error::Error::DimensionMismatch`] if a resolved
/// record's vector length differs from `query`'s.
pub fn qualify<A: ItemAccessor>(
    query: &[f32],
    limit: usize,
    accessor: &A,
    candidates: &[u64],
) -> Result<Vec<QualifiedItem<A::Item>>> {
    let mut resolved = Vec::with_capacity(candidates.len());
    for &item_id in candidates {
        if let Some(item) = accessor.get(item_id) {
            let distance = angular_distance(item.vector(), query)?;
            resolved.push(QualifiedItem { item, distance });
        }
    }

    resolved.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let limit = limit.min(resolved.len());
    resolved.truncate(limit);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::SimpleRecords;

    fn build_bucket_map(storage: &mut Storage, entries: &[(u32, &[u64])]) -> BTreeMap<u32, usize> {
        let mut map = BTreeMap::new();
        for &(key, ids) in entries {
            let head = storage.allocate_page();
            for &id in ids {
                storage.add(id, head);
            }
            map.insert(key, head);
        }
        map
    }

    #[test]
    fn tie_drain_consumes_all_buckets_at_the_boundary_distance() {
        let mut storage = Storage::new();
        // query key = 0b000 (bitsize 3); buckets at hamming distance 1: 0b001, 0b010, 0b100
        let map = build_bucket_map(
            &mut storage,
            &[
                (0b000, &[1]),
                (0b001, &[2]),
                (0b010, &[3]),
                (0b100, &[4]),
                (0b111, &[5]),
            ],
        );
        let query_key = BitKey::from_u32(0b000, 3);
        let result = candidates(&query_key, &map, &storage, 3, 2);
        // distance-0 bucket (item 1) is consumed first; limit=2 is then
        // reached inside the distance-1 ring, so all three of its buckets
        // drain before stopping, leaving the distance-3 bucket untouched.
        let mut got = result.clone();
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_bucket_map_or_zero_limit_yields_empty() {
        let storage = Storage::new();
        let map = BTreeMap::new();
        let key = BitKey::new(3);
        assert!(candidates(&key, &map, &storage, 3, 5).is_empty());

        let mut storage2 = Storage::new();
        let map2 = build_bucket_map(&mut storage2, &[(0, &[1])]);
        assert!(candidates(&key, &map2, &storage2, 3, 0).is_empty());
    }

    #[test]
    fn qualify_sorts_by_ascending_true_distance() {
        let records = SimpleRecords(vec![
            vec![-1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.9, 0.1],
        ]);
        let query = [1.0_f32, 0.0];
        let result = qualify(&query, 10, &records, &[1, 2, 3]).unwrap();
        assert_eq!(result[0].item.item_id(), 2);
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn qualify_skips_absent_ids_without_erroring() {
        let records = SimpleRecords(vec![vec![1.0, 0.0]]);
        let result = qualify(&[1.0, 0.0], 10, &records, &[1, 999]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].item.item_id(), 1);
    }

    #[test]
    fn qualify_truncates_to_limit() {
        let records = SimpleRecords(vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![-1.0, 0.0]]);
        let result = qualify(&[1.0, 0.0], 2, &records, &[1, 2, 3]).unwrap();
        assert_eq!(result.len(), 2);
    }
}
