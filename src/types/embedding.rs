//! Face embeddings and the distance primitive.

use serde::Serialize;

use super::error::{FaceError, FaceResult};

/// A fixed-length face embedding produced by an external extractor.
///
/// Immutable once built; it has no identity of its own beyond its numeric
/// content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Build an embedding from raw components. Rejects empty vectors.
    pub fn new(values: Vec<f32>) -> FaceResult<Self> {
        if values.is_empty() {
            return Err(FaceError::EmptyEmbedding);
        }
        Ok(Self(values))
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// The raw components.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Iterate over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.0.iter()
    }
}

/// Compute the Euclidean distance between two embeddings.
///
/// Fails fast on dimension mismatch; a distance across model spaces is
/// meaningless.
pub fn euclidean_distance(a: &Embedding, b: &Embedding) -> FaceResult<f32> {
    if a.dimension() != b.dimension() {
        return Err(FaceError::DimensionMismatch {
            expected: a.dimension(),
            got: b.dimension(),
        });
    }
    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    Ok(sum.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_embedding_rejected() {
        assert!(matches!(
            Embedding::new(Vec::new()),
            Err(FaceError::EmptyEmbedding)
        ));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let e = Embedding::new(vec![0.3, -1.2, 4.5]).unwrap();
        assert_eq!(euclidean_distance(&e, &e).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Embedding::new(vec![0.0, 0.0]).unwrap();
        let b = Embedding::new(vec![3.0, 4.0]).unwrap();
        assert!((euclidean_distance(&a, &b).unwrap() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn distance_dimension_mismatch() {
        let a = Embedding::new(vec![1.0, 2.0]).unwrap();
        let b = Embedding::new(vec![1.0, 2.0, 3.0]).unwrap();
        match euclidean_distance(&a, &b) {
            Err(FaceError::DimensionMismatch { expected: 2, got: 3 }) => {}
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }
}
