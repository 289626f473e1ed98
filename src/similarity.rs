//! Cosine similarity between embedding vectors

/// Cosine similarity of two equal-length vectors, in `[-1, 1]`.
///
/// Dot product and both magnitudes are accumulated in a single pass. Returns
/// None for mismatched lengths or empty inputs; a zero-magnitude vector gives
/// a defined score of 0.0 rather than a division error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let mag_a = mag_a.sqrt();
    let mag_b = mag_b.sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return Some(0.0);
    }

    Some(dot / (mag_a * mag_b))
}
