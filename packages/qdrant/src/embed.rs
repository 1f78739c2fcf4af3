// ABOUTME: Embedding interface and the default deterministic implementation
// ABOUTME: Feature hashing over token trigrams, L2-normalized, fixed 768 dims

use pacta_core::constants::VECTOR_SIZE;

/// Turns text into a fixed-size vector. The default implementation is a
/// local feature hasher; swap in a real model client without touching the
/// storage or retrieval code.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn dimensions(&self) -> usize {
        VECTOR_SIZE
    }
}

/// Deterministic feature-hashing embedder. Not a semantic model: it only
/// guarantees that identical text maps to identical vectors and that
/// lexically similar texts land near each other under cosine distance.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self {
            dimensions: VECTOR_SIZE,
        }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        // Unigrams plus token trigrams so word order contributes.
        for token in &tokens {
            accumulate(&mut vector, token);
        }
        for gram in tokens.windows(3) {
            accumulate(&mut vector, &gram.join(" "));
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn accumulate(vector: &mut [f32], feature: &str) {
    let hash = fnv1a(feature.as_bytes());
    let index = (hash % vector.len() as u64) as usize;
    // One hash bit decides the sign, which keeps the expected value of each
    // component at zero across unrelated features.
    let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
    vector[index] += sign;
}

// FNV-1a, fixed offset/prime. Stable across builds, unlike DefaultHasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
