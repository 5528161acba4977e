use bithash::{Indexer, RandomVectorGen, SimpleRecords};
use std::collections::HashSet;

fn brute_force_top_k(data: &[Vec<f32>], center: &[f32], k: usize) -> HashSet<u64> {
    let mut scored: Vec<(usize, f32)> = data
        .iter()
        .enumerate()
        .map(|(i, v)| (i, bithash::angular_distance(v, center).unwrap()))
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.iter().take(k).map(|(i, _)| (*i + 1) as u64).collect()
}

#[test]
fn indexed_top_5_matches_brute_force_over_1000_vectors() {
    let mut gen = RandomVectorGen::new(42, 2);
    let data = gen.generate(1000);

    let mut idx = Indexer::new(39, 8, 2).unwrap();
    for (i, v) in data.iter().enumerate() {
        idx.add((i + 1) as u64, v).unwrap();
    }
    let records = SimpleRecords(data.clone());

    let center = [0.3_f32, 0.3];
    let expected = brute_force_top_k(&data, &center, 5);

    let results = idx.search(&center, 5, &records).unwrap();
    let got: HashSet<u64> = results.iter().map(|r| r.item.item_id()).collect();

    assert_eq!(expected, got);
}

#[test]
fn search_results_are_sorted_by_ascending_distance() {
    let mut gen = RandomVectorGen::new(5, 4);
    let data = gen.generate(500);

    let mut idx = Indexer::new(13, 10, 4).unwrap();
    for (i, v) in data.iter().enumerate() {
        idx.add((i + 1) as u64, v).unwrap();
    }
    let records = SimpleRecords(data.clone());

    let results = idx.search(&data[0], 20, &records).unwrap();
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn dimension_mismatch_is_reported_not_panicked() {
    let idx = Indexer::new(1, 8, 4).unwrap();
    let records = SimpleRecords(Vec::new());
    let err = idx.search(&[1.0, 2.0], 5, &records).unwrap_err();
    assert!(matches!(
        err,
        bithash::Error::DimensionMismatch { expected: 4, actual: 2 }
    ));
}

#[test]
fn stats_total_items_matches_insert_count_across_many_buckets() {
    let mut gen = RandomVectorGen::new(21, 6);
    let data = gen.generate(5000);

    let mut idx = Indexer::new(4, 14, 6).unwrap();
    for (i, v) in data.iter().enumerate() {
        idx.add((i + 1) as u64, v).unwrap();
    }

    let stats = idx.stats();
    assert_eq!(stats.total_items, 5000);
    assert!(stats.num_buckets >= 1);
    assert_eq!(
        stats.buckets.iter().map(|b| b.item_count).sum::<usize>(),
        5000
    );
}
