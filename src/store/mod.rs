//! Durable store of enrolled identities.
//!
//! One `.fvec` record per identity in a flat directory, scanned wholesale at
//! load time. `add` is the only mutator and the only source of durable
//! writes; writes for the same identity must not run concurrently with each
//! other (the store takes `&mut self`, so a single owner serializes them).

pub mod record;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::types::error::{FaceError, FaceResult};
use crate::types::{Embedding, Identity, StoreSnapshot};

use record::IdentityRecord;

/// File extension for identity records.
pub const RECORD_EXTENSION: &str = "fvec";

/// Directory-backed collection of enrolled identities.
pub struct IdentityStore {
    dir: PathBuf,
    dimension: usize,
    identities: Vec<Identity>,
}

impl IdentityStore {
    /// Open a store rooted at `dir`, creating the directory if absent, and
    /// load all persisted identities.
    pub fn open(dir: impl Into<PathBuf>, dimension: usize) -> FaceResult<Self> {
        let mut store = Self {
            dir: dir.into(),
            dimension,
            identities: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Read all persisted identities into memory.
    ///
    /// A missing backing directory is created empty, not an error. Malformed
    /// records are skipped with a warning so one bad file never blocks the
    /// rest. Loading is idempotent: records are read in file-name order.
    pub fn load(&mut self) -> FaceResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION))
            .collect();
        paths.sort();

        let mut identities = Vec::with_capacity(paths.len());
        for path in paths {
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => {
                    warn!("skipping record with unusable name: {}", path.display());
                    continue;
                }
            };
            match IdentityRecord::read_from_file(&path) {
                Ok(record) => {
                    if record.dimension as usize != self.dimension {
                        warn!(
                            "skipping {}: dimension {} does not match store dimension {}",
                            path.display(),
                            record.dimension,
                            self.dimension
                        );
                        continue;
                    }
                    if record.embeddings.is_empty() {
                        // An identity with zero embeddings is equivalent to absence.
                        warn!("skipping empty record: {}", path.display());
                        continue;
                    }
                    identities.push(Identity {
                        name,
                        embeddings: record.embeddings,
                    });
                }
                Err(e) => {
                    warn!("skipping malformed record {}: {}", path.display(), e);
                }
            }
        }

        info!(
            "loaded {} identities from {}",
            identities.len(),
            self.dir.display()
        );
        self.identities = identities;
        Ok(())
    }

    /// Append `embedding` to `name`'s sequence, creating the identity if
    /// absent, and durably persist that identity's full sequence before
    /// returning.
    ///
    /// The in-memory view is only updated once the record rewrite has been
    /// renamed into place, so a failed write leaves the store unchanged.
    pub fn add(&mut self, name: &str, embedding: Embedding) -> FaceResult<()> {
        validate_name(name)?;
        if embedding.dimension() != self.dimension {
            return Err(FaceError::DimensionMismatch {
                expected: self.dimension,
                got: embedding.dimension(),
            });
        }

        let mut embeddings = match self.identities.iter().find(|i| i.name == name) {
            Some(identity) => identity.embeddings.clone(),
            None => Vec::new(),
        };
        embeddings.push(embedding);

        let record = IdentityRecord::new(self.dimension, embeddings.clone());
        record.write_to_file(&self.record_path(name))?;

        match self.identities.iter_mut().find(|i| i.name == name) {
            Some(identity) => identity.embeddings = embeddings,
            None => self.identities.push(Identity {
                name: name.to_string(),
                embeddings,
            }),
        }
        debug!("added embedding for {:?}", name);
        Ok(())
    }

    /// The current in-memory view, for use by classification and scanning.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(self.identities.clone())
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The embedding dimension this store accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of enrolled identities.
    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, RECORD_EXTENSION))
    }
}

/// Reject names that cannot serve as a storage key.
fn validate_name(name: &str) -> FaceResult<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(FaceError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("alice.smith").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }
}
