//! # bithash
//!
//! A random-hyperplane LSH index over angular distance, with paged bucket
//! storage and a postcard-serializable on-disk form.
//!
//! The core has no notion of a metadata store or of how vectors are kept in
//! memory: build an [`index::Indexer`], `add` item ids keyed by their
//! vectors, and resolve candidates back to records through a caller-supplied
//! [`accessor::ItemAccessor`]. See [`index::Indexer::search`] for the full
//! build-then-query pipeline.
//!
//! ## Concurrency
//!
//! An `Indexer` is built by a single writer (`add` takes `&mut self`) and
//! queried by any number of concurrent readers once building is done
//! (`candidates`/`qualify`/`search` take `&self`). There is no interior
//! mutability and no locking: callers that need concurrent build and query
//! must synchronize externally, e.g. by swapping in a freshly built,
//! read-only `Indexer` behind an `arc-swap` or a `RwLock`.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]

/// Caller-supplied resolution of item ids to vectors.
pub mod accessor;

/// Fixed-width packed bit keys.
pub mod bitkey;

/// Angular distance and the hyperplane side classifier.
pub mod distance;

/// Unified error hierarchy.
pub mod error;

/// The LSH indexer: build, query, and serialize.
pub mod index;

/// Seeded Gaussian vector generation.
pub mod rvg;

/// Per-bucket and population index statistics.
pub mod stats;

/// Paged, linked-list item-id storage.
pub mod storage;

pub use accessor::{Item, ItemAccessor, SimpleRecord, SimpleRecords};
pub use bitkey::BitKey;
pub use distance::{angular_distance, DistanceKind};
pub use error::{Error, Result};
pub use index::{Indexer, QualifiedItem};
pub use rvg::RandomVectorGen;
pub use stats::{BucketStats, IndexStats};

/// The crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
