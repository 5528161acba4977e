//! The LSH indexer: owns the hyperplane set, bucket map, and page storage;
//! exposes build (`add`) and query (`candidates`/`qualify`/`search`)
//! operations plus serialization.

/// Candidate retrieval and re-rank (`candidates`/`qualify`/`search`).
pub mod search;

pub use search::QualifiedItem;

use crate::accessor::ItemAccessor;
use crate::bitkey::BitKey;
use crate::distance::{bucket_key, DistanceKind};
use crate::error::{Error, Result};
use crate::rvg::RandomVectorGen;
use crate::stats::{BucketStats, IndexStats};
use crate::storage::Storage;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MAX_BITSIZE: usize = 32;

/// The LSH index: a seeded hyperplane set plus a bucket map over paged
/// item-id storage.
///
/// Build-once, query-many: see the crate-level docs for the
/// single-writer/concurrent-reader contract.
#[derive(Clone, Debug)]
pub struct Indexer {
    seed: i64,
    bitsize: usize,
    vecsize: usize,
    distance: DistanceKind,
    hyperplanes: Vec<Vec<f32>>,
    bucket_map: BTreeMap<u32, usize>,
    storage: Storage,
}

/// On-the-wire mirror of [`Indexer`]'s fields.
///
/// `distance` is carried as its serialized tag string rather than
/// `DistanceKind` itself, so [`Indexer::decode`] can route an unrecognized
/// tag through [`DistanceKind::from_tag`] and report
/// [`Error::UnknownDistance`] instead of an opaque decode failure.
#[derive(Serialize, Deserialize)]
struct IndexerWire {
    seed: i64,
    bitsize: usize,
    vecsize: usize,
    distance_tag: String,
    hyperplanes: Vec<Vec<f32>>,
    bucket_map: BTreeMap<u32, usize>,
    storage: Storage,
}

impl Indexer {
    /// Creates a new indexer with `bitsize` hyperplanes over `vecsize`
    /// dimensions, seeded at `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `bitsize` is not in `[1, 32]` or
    /// `vecsize < 1`.
    pub fn new(seed: i64, bitsize: usize, vecsize: usize) -> Result<Self> {
        if bitsize == 0 || bitsize > MAX_BITSIZE {
            return Err(Error::Config(format!(
                "bitsize must be in [1, {MAX_BITSIZE}], got {bitsize}"
            )));
        }
        if vecsize == 0 {
            return Err(Error::Config("vecsize must be >= 1".to_string()));
        }

        let mut gen = RandomVectorGen::new(seed, vecsize);
        let hyperplanes = (0..bitsize).map(|_| gen.next()).collect();

        Ok(Self {
            seed,
            bitsize,
            vecsize,
            distance: DistanceKind::Angular,
            hyperplanes,
            bucket_map: BTreeMap::new(),
            storage: Storage::new(),
        })
    }

    /// The configured hyperplane count (`B`).
    #[must_use]
    pub fn bitsize(&self) -> usize {
        self.bitsize
    }

    /// The configured vector dimension (`D`).
    #[must_use]
    pub fn vecsize(&self) -> usize {
        self.vecsize
    }

    /// The seed this indexer's hyperplanes were drawn from.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Adds `item_id` to the index, bucketed by `vector`'s hash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `vector.len() != vecsize`.
    pub fn add(&mut self, item_id: u64, vector: &[f32]) -> Result<()> {
        if vector.len() != self.vecsize {
            return Err(Error::DimensionMismatch {
                expected: self.vecsize,
                actual: vector.len(),
            });
        }

        let key = bucket_key(&self.hyperplanes, vector)?;
        let u = key.to_u32();
        let head = *self.bucket_map.entry(u).or_insert_with(|| {
            let page = self.storage.allocate_page();
            debug!("allocated head page {page} for bucket {u:#010x}");
            page
        });
        self.storage.add(item_id, head);
        Ok(())
    }

    /// Exposes the `BucketKey` of `vector`, for introspection and tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `vector.len() != vecsize`.
    pub fn get_bit_vector(&self, vector: &[f32]) -> Result<BitKey> {
        if vector.len() != self.vecsize {
            return Err(Error::DimensionMismatch {
                expected: self.vecsize,
                actual: vector.len(),
            });
        }
        bucket_key(&self.hyperplanes, vector)
    }

    /// Collects candidate item ids near `query` in hash space.
    ///
    /// See [`search::candidates`] for the full contract (tie-drain rule).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `query.len() != vecsize`.
    pub fn candidates(&self, query: &[f32], limit: usize) -> Result<Vec<u64>> {
        if query.len() != self.vecsize {
            return Err(Error::DimensionMismatch {
                expected: self.vecsize,
                actual: query.len(),
            });
        }
        let key = bucket_key(&self.hyperplanes, query)?;
        Ok(search::candidates(
            &key,
            &self.bucket_map,
            &self.storage,
            self.bitsize,
            limit,
        ))
    }

    /// Re-ranks `candidates` by true angular distance to `query` and
    /// truncates to the top `limit`.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::DimensionMismatch`] from [`angular_distance`] if
    /// a resolved record's vector has the wrong length.
    pub fn qualify<A: ItemAccessor>(
        &self,
        query: &[f32],
        limit: usize,
        accessor: &A,
        candidates: &[u64],
    ) -> Result<Vec<QualifiedItem<A::Item>>> {
        search::qualify(query, limit, accessor, candidates)
    }

    /// `qualify(candidates(query, limit), limit)` — the full search pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] on a wrongly-sized `query`.
    pub fn search<A: ItemAccessor>(
        &self,
        query: &[f32],
        limit: usize,
        accessor: &A,
    ) -> Result<Vec<QualifiedItem<A::Item>>> {
        let candidates = self.candidates(query, limit)?;
        self.qualify(query, limit, accessor, &candidates)
    }

    /// Summarizes the index: per-bucket key/page/item-count stats plus
    /// population aggregates.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let mut buckets = Vec::with_capacity(self.bucket_map.len());
        for (&key_u32, &head) in &self.bucket_map {
            let mut page_indices = Vec::new();
            let mut item_count = 0usize;
            let mut next = Some(head);
            while let Some(idx) = next {
                page_indices.push(idx);
                let page = self.storage.page(idx);
                item_count += page.count();
                next = page.next();
            }
            buckets.push(BucketStats {
                key: BitKey::from_u32(key_u32, self.bitsize),
                key_u32,
                page_indices,
                item_count,
            });
        }
        IndexStats::compute(buckets)
    }

    /// Serializes this indexer to its opaque blob form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if postcard encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let wire = IndexerWire {
            seed: self.seed,
            bitsize: self.bitsize,
            vecsize: self.vecsize,
            distance_tag: self.distance.tag().to_string(),
            hyperplanes: self.hyperplanes.clone(),
            bucket_map: self.bucket_map.clone(),
            storage: self.storage.clone(),
        };
        postcard::to_allocvec(&wire).map_err(Error::Encode)
    }

    /// Deserializes an indexer from its opaque blob form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a valid encoding, or
    /// [`Error::UnknownDistance`] if the embedded distance tag is
    /// unrecognized.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let wire: IndexerWire = postcard::from_bytes(bytes).map_err(Error::Decode)?;
        let distance = DistanceKind::from_tag(&wire.distance_tag)?;
        Ok(Self {
            seed: wire.seed,
            bitsize: wire.bitsize,
            vecsize: wire.vecsize,
            distance,
            hyperplanes: wire.hyperplanes,
            bucket_map: wire.bucket_map,
            storage: wire.storage,
        })
    }
}
