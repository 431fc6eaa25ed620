use crate::error::{Result, VectorStoreError};
use ragnote_chunker::Chunk;

/// Append-only positional store of chunks.
///
/// A chunk's id is its position in insertion order; ids are never reused.
#[derive(Default)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Append chunks in order, continuing the id sequence
    pub fn append(&mut self, chunks: Vec<Chunk>) {
        self.chunks.extend(chunks);
    }

    /// Look up a chunk by id
    pub fn get(&self, id: usize) -> Result<&Chunk> {
        self.chunks.get(id).ok_or(VectorStoreError::OutOfRange {
            id,
            len: self.chunks.len(),
        })
    }

    /// Number of stored chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut store = ChunkStore::new();
        store.append(vec![Chunk::new("a", "first")]);
        store.append(vec![Chunk::new("b", "second"), Chunk::new("b", "third")]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().text, "first");
        assert_eq!(store.get(2).unwrap().text, "third");
    }

    #[test]
    fn test_out_of_range_get_fails() {
        let mut store = ChunkStore::new();
        store.append(vec![Chunk::new("a", "only")]);

        let err = store.get(1).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::OutOfRange { id: 1, len: 1 }
        ));
    }
}
