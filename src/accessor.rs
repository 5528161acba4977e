//! The contract the search pipeline uses to resolve item ids to vectors.
//!
//! The core never touches the metadata store directly; callers supply an
//! [`ItemAccessor`] backed by whatever secondary id-to-key mapping and
//! metadata lookup they use.

/// A record the search pipeline can measure distance against.
pub trait Item {
    /// The record's vector, of the indexer's configured dimension.
    fn vector(&self) -> &[f32];
}

/// Resolves item ids (as stored in the index) to records exposing a vector.
pub trait ItemAccessor {
    /// The record type returned by [`ItemAccessor::get`].
    type Item: Item;

    /// Looks up `item_id`. Returns `None` if absent; absence is not an
    /// error, the caller simply skips that candidate.
    fn get(&self, item_id: u64) -> Option<Self::Item>;
}

/// An in-memory record pairing an item id with its vector.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleRecord {
    item_id: u64,
    vector: Vec<f32>,
}

impl SimpleRecord {
    /// The record's item id.
    #[must_use]
    pub fn item_id(&self) -> u64 {
        self.item_id
    }
}

impl Item for SimpleRecord {
    fn vector(&self) -> &[f32] {
        &self.vector
    }
}

/// A reference [`ItemAccessor`] backed by a flat `Vec<Vec<f32>>`, indexed by
/// `item_id - 1` (item id `0` is reserved as the absent sentinel).
#[derive(Clone, Debug, Default)]
pub struct SimpleRecords(pub Vec<Vec<f32>>);

impl ItemAccessor for SimpleRecords {
    type Item = SimpleRecord;

    fn get(&self, item_id: u64) -> Option<SimpleRecord> {
        if item_id == 0 {
            return None;
        }
        let idx = usize::try_from(item_id - 1).ok()?;
        self.0.get(idx).map(|v| SimpleRecord {
            item_id,
            vector: v.clone(),
        })
    }
}
