//! Angular distance and the hyperplane "side" classifier used for hashing.

use crate::bitkey::BitKey;
use crate::error::{Error, Result};

/// A distance kind, tagged for serialization.
///
/// Only `Angular` is currently wired in. `Euclidean` exists in the upstream
/// system this crate distills from but is reserved and not implemented here.
///
/// This type is deliberately not `Serialize`/`Deserialize`: the wire form is
/// the tag string (see [`DistanceKind::tag`]/[`DistanceKind::from_tag`]),
/// routed explicitly through [`crate::index::Indexer::encode`]/[`decode`][d]
/// so that an unrecognized tag surfaces as [`Error::UnknownDistance`] rather
/// than an opaque decode failure.
///
/// [d]: crate::index::Indexer::decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Angular (cosine-derived) distance, see [`angular_distance`].
    Angular,
}

impl DistanceKind {
    /// The serialized tag for this distance kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            DistanceKind::Angular => "angular",
        }
    }

    /// Parses a serialized distance tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDistance`] for any tag other than `"angular"`.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "angular" => Ok(DistanceKind::Angular),
            other => Err(Error::UnknownDistance(other.to_string())),
        }
    }
}

/// Angular distance between two equal-length vectors, in `[0, 4]`.
///
/// `2.0 - 2.0 * dot(x, y) / sqrt(|x|^2 * |y|^2)`, or `2.0` if either vector
/// has zero norm (cosine is undefined; callers should normalize or filter
/// zero vectors before insertion).
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `x.len() != y.len()`.
pub fn angular_distance(x: &[f32], y: &[f32]) -> Result<f32> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }

    let mut xx: f32 = 0.0;
    let mut yy: f32 = 0.0;
    let mut xy: f32 = 0.0;
    for i in 0..x.len() {
        xx += x[i] * x[i];
        yy += y[i] * y[i];
        xy += x[i] * y[i];
    }

    let xxyy = xx * yy;
    if xxyy > 0.0 {
        Ok(2.0 - 2.0 * xy / xxyy.sqrt())
    } else {
        Ok(2.0)
    }
}

/// Classifies which side of hyperplane `h` vector `v` lies on.
///
/// Strict `>`: a vector whose dot product with `h` is exactly zero is
/// classified as the negative side. This is load-bearing for
/// cross-implementation agreement on `BucketKey` and must not change to `>=`.
#[must_use]
pub fn side(h: &[f32], v: &[f32]) -> bool {
    let mut dot: f32 = 0.0;
    for i in 0..h.len() {
        dot += h[i] * v[i];
    }
    dot > 0.0
}

/// Computes the `BucketKey` of `v` against hyperplane set `h`.
///
/// Bit `i` of the result is `side(h[i], v)`. Deterministic given `(h, v)`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if any hyperplane's dimension
/// differs from `v`'s.
pub fn bucket_key(h: &[Vec<f32>], v: &[f32]) -> Result<BitKey> {
    let mut key = BitKey::new(h.len());
    for (i, plane) in h.iter().enumerate() {
        if plane.len() != v.len() {
            return Err(Error::DimensionMismatch {
                expected: plane.len(),
                actual: v.len(),
            });
        }
        if side(plane, v) {
            key.set(i).expect("i < h.len() == key.size()");
        }
    }
    Ok(key)
}
