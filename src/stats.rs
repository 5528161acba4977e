//! Index statistics: per-bucket item counts and their aggregates.

use crate::bitkey::BitKey;
use std::fmt;

/// Statistics for a single bucket.
#[derive(Clone, Debug)]
pub struct BucketStats {
    /// The bucket's key, in both integer and string form.
    pub key: BitKey,
    /// Integer form of `key`, as stored in the bucket map.
    pub key_u32: u32,
    /// The page indices making up this bucket's linked chain.
    pub page_indices: Vec<usize>,
    /// Number of items stored across the chain.
    pub item_count: usize,
}

/// A summary of an index: per-bucket stats plus population aggregates.
#[derive(Clone, Debug)]
pub struct IndexStats {
    /// Per-bucket statistics, ordered by ascending integer key.
    pub buckets: Vec<BucketStats>,
    /// Total items across all buckets.
    pub total_items: usize,
    /// Number of distinct bucket keys present.
    pub num_buckets: usize,
    /// Mean item count per bucket.
    pub mean: f64,
    /// Population standard deviation of per-bucket item counts.
    pub stddev: f64,
}

impl IndexStats {
    pub(crate) fn compute(buckets: Vec<BucketStats>) -> Self {
        let num_buckets = buckets.len();
        let total_items: usize = buckets.iter().map(|b| b.item_count).sum();

        let (mean, stddev) = if num_buckets == 0 {
            (0.0, 0.0)
        } else {
            let sum: f64 = buckets.iter().map(|b| b.item_count as f64).sum();
            let sq_sum: f64 = buckets
                .iter()
                .map(|b| (b.item_count as f64) * (b.item_count as f64))
                .sum();
            let mean = sum / num_buckets as f64;
            let variance = sq_sum / num_buckets as f64 - mean * mean;
            (mean, variance.max(0.0).sqrt())
        };

        Self {
            buckets,
            total_items,
            num_buckets,
            mean,
            stddev,
        }
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in &self.buckets {
            writeln!(
                f,
                "key({:08}:{}) -> page({:?}) = {} items",
                bucket.key_u32,
                bucket.key.format(),
                bucket.page_indices,
                bucket.item_count
            )?;
        }
        write!(
            f,
            "total items = {} / keys = {}, mean = {:.6}, stddev = {:.6}",
            self.total_items, self.num_buckets, self.mean, self.stddev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_zero_aggregates() {
        let stats = IndexStats::compute(Vec::new());
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.num_buckets, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.stddev, 0.0);
    }

    #[test]
    fn aggregates_match_simple_population() {
        let buckets = vec![
            BucketStats {
                key: BitKey::new(4),
                key_u32: 0,
                page_indices: vec![0],
                item_count: 2,
            },
            BucketStats {
                key: BitKey::from_u32(1, 4),
                key_u32: 1,
                page_indices: vec![1],
                item_count: 4,
            },
        ];
        let stats = IndexStats::compute(buckets);
        assert_eq!(stats.total_items, 6);
        assert_eq!(stats.num_buckets, 2);
        assert!((stats.mean - 3.0).abs() < 1e-9);
        assert!((stats.stddev - 1.0).abs() < 1e-9);
    }

    #[test]
    fn display_renders_one_line_per_bucket_plus_totals() {
        let buckets = vec![BucketStats {
            key: BitKey::new(4),
            key_u32: 0,
            page_indices: vec![0],
            item_count: 1,
        }];
        let stats = IndexStats::compute(buckets);
        let rendered = stats.to_string();
        assert!(rendered.contains("total items = 1"));
        assert!(rendered.contains("key(00000000"));
    }
}
