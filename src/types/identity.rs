//! Enrolled identities and the read-only store snapshot.

use serde::Serialize;

use super::embedding::Embedding;

/// An enrolled identity: a name and its ordered embedding sequence.
///
/// The sequence grows monotonically via enrollment and is never empty once
/// the identity exists in a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    /// Unique, case-sensitive name; doubles as the storage key.
    pub name: String,
    /// Embeddings in enrollment order.
    pub embeddings: Vec<Embedding>,
}

/// A fully materialized, read-only view of the store at recognition time.
///
/// Identities keep insertion order, which fixes the flattening order used
/// for stable tie-breaking in classification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    identities: Vec<Identity>,
}

impl StoreSnapshot {
    /// Build a snapshot from an ordered identity list.
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// Look up an identity by name.
    pub fn get(&self, name: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.name == name)
    }

    /// All identities in insertion order.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Number of enrolled identities.
    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    /// Total number of embeddings across all identities.
    pub fn embedding_count(&self) -> usize {
        self.identities.iter().map(|i| i.embeddings.len()).sum()
    }

    /// Whether the snapshot holds no embeddings at all.
    pub fn is_empty(&self) -> bool {
        self.embedding_count() == 0
    }

    /// Flatten into (name, embedding) pairs in insertion order.
    pub fn flatten(&self) -> impl Iterator<Item = (&str, &Embedding)> {
        self.identities
            .iter()
            .flat_map(|i| i.embeddings.iter().map(move |e| (i.name.as_str(), e)))
    }
}
