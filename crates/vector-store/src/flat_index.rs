use crate::error::{Result, VectorStoreError};

/// Brute-force nearest-neighbor index over fixed-dimension vectors.
///
/// Append-only: a vector's id is its insertion position and never changes.
/// Search is an exact O(n·d) scan ranked by Euclidean distance, which is the
/// right trade-off at this scale; nothing in the contract prevents swapping
/// in an ANN structure later.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Fixed dimension every stored vector must match
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Append vectors in order, assigning sequential ids.
    ///
    /// The whole batch is validated before anything is stored, so a
    /// mismatched vector never leaves a partial insert behind.
    pub fn insert(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Return up to `k` ids sorted by ascending L2 distance to `query`.
    ///
    /// Ties rank the earlier-inserted vector first. Fewer than `k` stored
    /// vectors yields all of them; an empty index yields an empty list.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<usize>> {
        if query.len() != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, vector)| (id, l2_distance_sq(query, vector)))
            .collect();

        // Stable sort keeps insertion order among equal distances
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }

    /// Number of stored vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Squared Euclidean distance; ranking-equivalent to L2 without the sqrt
fn l2_distance_sq(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
