//! CLI command implementations.

use std::path::Path;

use crate::matcher::classify;
use crate::store::IdentityStore;
use crate::types::error::{FaceError, FaceResult};
use crate::types::Embedding;

/// Read an embedding from a JSON file holding an array of floats.
fn read_embedding(path: &Path) -> FaceResult<Embedding> {
    let text = std::fs::read_to_string(path)?;
    let values: Vec<f32> = serde_json::from_str(&text)
        .map_err(|e| FaceError::Config(format!("{}: {}", path.display(), e)))?;
    Embedding::new(values)
}

/// Enroll one embedding under an identity name.
pub fn cmd_enroll(
    store_dir: &Path,
    name: &str,
    embedding_path: &Path,
    dimension: usize,
    json: bool,
) -> FaceResult<()> {
    let embedding = read_embedding(embedding_path)?;
    let mut store = IdentityStore::open(store_dir, dimension)?;
    store.add(name, embedding)?;

    let count = store
        .snapshot()
        .get(name)
        .map(|i| i.embeddings.len())
        .unwrap_or(0);
    if json {
        println!(
            "{}",
            serde_json::json!({ "name": name, "embeddings": count })
        );
    } else {
        println!("Enrolled {} ({} embeddings on record)", name, count);
    }
    Ok(())
}

/// List enrolled identities and their embedding counts.
pub fn cmd_list(store_dir: &Path, dimension: usize, json: bool) -> FaceResult<()> {
    let store = IdentityStore::open(store_dir, dimension)?;
    let snapshot = store.snapshot();

    if json {
        let entries: Vec<_> = snapshot
            .identities()
            .iter()
            .map(|i| serde_json::json!({ "name": i.name, "embeddings": i.embeddings.len() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_default()
        );
    } else {
        if snapshot.identity_count() == 0 {
            println!("No identities enrolled in {}", store_dir.display());
            return Ok(());
        }
        for identity in snapshot.identities() {
            println!("{}  ({} embeddings)", identity.name, identity.embeddings.len());
        }
    }
    Ok(())
}

/// Classify a query embedding against the store.
pub fn cmd_classify(
    store_dir: &Path,
    embedding_path: &Path,
    dimension: usize,
    threshold: f32,
    json: bool,
) -> FaceResult<()> {
    let query = read_embedding(embedding_path)?;
    let store = IdentityStore::open(store_dir, dimension)?;
    let classification = classify(&query, &store.snapshot(), threshold)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "label": classification.display_label(),
                "distance": classification.distance,
            })
        );
    } else {
        match classification.distance {
            Some(distance) => println!(
                "{} (distance {:.4})",
                classification.display_label(),
                distance
            ),
            None => println!("{} (store is empty)", classification.display_label()),
        }
    }
    Ok(())
}

/// Display information about a store directory.
pub fn cmd_info(store_dir: &Path, dimension: usize, json: bool) -> FaceResult<()> {
    let store = IdentityStore::open(store_dir, dimension)?;
    let snapshot = store.snapshot();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "dir": store_dir.display().to_string(),
                "dimension": dimension,
                "identities": snapshot.identity_count(),
                "embeddings": snapshot.embedding_count(),
            })
        );
    } else {
        println!("Store: {}", store_dir.display());
        println!("Dimension: {}", dimension);
        println!("Identities: {}", snapshot.identity_count());
        println!("Embeddings: {}", snapshot.embedding_count());
    }
    Ok(())
}
