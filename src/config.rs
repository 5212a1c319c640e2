//! Engine configuration with TOML persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::matcher::DEFAULT_MATCH_THRESHOLD;
use crate::scan::{ScanOptions, DEFAULT_DOWNSCALE, DEFAULT_SCAN_THRESHOLD};
use crate::types::error::{FaceError, FaceResult};

/// Recognized configuration surface.
///
/// `match_threshold` and `scan_threshold` are two distinct knobs that happen
/// to share a default: classification acceptance and video-match acceptance
/// are independently settable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where identity records live.
    pub embeddings_dir: PathBuf,

    /// The video corpus directory subject to scanning.
    pub corpus_dir: PathBuf,

    /// Classification acceptance threshold (Euclidean distance).
    pub match_threshold: f32,

    /// Video-match acceptance threshold (Euclidean distance).
    pub scan_threshold: f32,

    /// Linear downscale factor applied to frames before extraction.
    pub downscale: f32,

    /// Approximate frame samples per second of video.
    pub sample_rate: f32,

    /// Worker threads for parallel corpus scanning.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            embeddings_dir: PathBuf::from("data/embeddings"),
            corpus_dir: PathBuf::from("data/recordings"),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            scan_threshold: DEFAULT_SCAN_THRESHOLD,
            downscale: DEFAULT_DOWNSCALE,
            sample_rate: 1.0,
            workers: 4,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file. Missing fields fall back to
    /// their defaults.
    pub fn load(path: &Path) -> FaceResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| FaceError::Config(e.to_string()))
    }

    /// Persist the configuration as TOML.
    pub fn save(&self, path: &Path) -> FaceResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| FaceError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// The scan options this configuration describes.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            threshold: self.scan_threshold,
            match_threshold: self.match_threshold,
            downscale: self.downscale,
            sample_rate: self.sample_rate,
            workers: self.workers,
        }
    }
}
