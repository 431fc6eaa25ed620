use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Numeric precision of stored embeddings.
///
/// Affects storage footprint only; ranking changes at most by the rounding
/// introduced when components pass through the narrower format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Full single precision
    #[default]
    Float32,
    /// Components rounded to half-precision mantissa width
    Float16,
}

impl Precision {
    pub(crate) fn quantize(self, value: f32) -> f32 {
        match self {
            Self::Float32 => value,
            // Mantissa truncated to f16 width; the exponent range is not
            // clamped, which is enough for unit-norm components.
            Self::Float16 => f32::from_bits(value.to_bits() & 0xFFFF_E000),
        }
    }
}

/// Contract for the embedding collaborator: text in, fixed-length vector out.
///
/// The dimension must be deterministic per embedder instance; the index probes
/// it once at construction and rejects any vector that deviates.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch in one call; output order matches input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Deterministic in-process embedder.
///
/// Hashes the text into a seeded generator and emits a normalized vector.
/// Identical texts always map to identical vectors, which makes it suitable
/// both as a zero-dependency default backend and for tests.
pub struct HashEmbedder {
    dimension: usize,
    precision: Precision,
}

impl HashEmbedder {
    #[must_use]
    pub const fn new(dimension: usize, precision: Precision) -> Self {
        Self {
            dimension,
            precision,
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut state = fnv1a_64(text.as_bytes())
            ^ (self.dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut vec = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            let bits = splitmix64(&mut state);
            let high = (bits >> 32) as u32;
            let mantissa = high >> 9;
            let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
            vec.push(unit.mul_add(2.0, -1.0));
        }
        normalize(&mut vec);
        for value in &mut vec {
            *value = self.precision.quantize(*value);
        }
        vec
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_one(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
