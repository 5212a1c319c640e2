//! Request-level contract for the external web layer.
//!
//! Upload parsing and HTTP proper live outside the core; these functions
//! take an already-decoded image frame and return serializable responses.
//! `ApiError::status` gives the HTTP status the web layer should answer
//! with.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::extract::{FaceExtractor, Frame};
use crate::matcher::classify;
use crate::scan::{CancelToken, MatchResult, ScanOptions, VideoScanner};
use crate::types::{FaceError, StoreSnapshot, UNKNOWN_LABEL};

/// Errors surfaced to web-layer callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request carried no image.
    #[error("no file supplied")]
    MissingFile,

    /// The query image contained no detectable face.
    #[error("no face found in the uploaded image")]
    NoFaceFound,

    /// An engine failure unrelated to the caller's input.
    #[error(transparent)]
    Engine(#[from] FaceError),
}

impl ApiError {
    /// HTTP status the web layer should respond with.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MissingFile | ApiError::NoFaceFound => 400,
            ApiError::Engine(_) => 500,
        }
    }
}

/// Response for `POST /recognize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizeResponse {
    /// One label per detected face, in detection order; `"unknown"` where
    /// unmatched.
    pub recognized_names: Vec<String>,
}

/// One serialized match for `POST /search_by_photo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub video_file: String,
    /// Rounded to two decimals for the wire.
    pub timestamp_seconds: f64,
    pub recognized_as: String,
}

impl From<MatchResult> for SearchMatch {
    fn from(m: MatchResult) -> Self {
        Self {
            video_file: m.video_file,
            timestamp_seconds: (m.timestamp_seconds * 100.0).round() / 100.0,
            recognized_as: m.recognized_as.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        }
    }
}

/// Response for `POST /search_by_photo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<SearchMatch>,
}

/// Classify every face in the uploaded image against the current store.
pub fn recognize(
    image: Option<&Frame>,
    extractor: &dyn FaceExtractor,
    snapshot: &StoreSnapshot,
    threshold: f32,
) -> Result<RecognizeResponse, ApiError> {
    let frame = image.ok_or(ApiError::MissingFile)?;
    let faces = extractor.detect(frame)?;

    let mut recognized_names = Vec::with_capacity(faces.len());
    for face in faces {
        let classification = classify(&face.embedding, snapshot, threshold)?;
        recognized_names.push(classification.display_label().to_string());
    }
    Ok(RecognizeResponse { recognized_names })
}

/// Search the video corpus for the first face found in the uploaded image.
///
/// No detectable face is a client error and no scan is performed.
pub fn search_by_photo(
    image: Option<&Frame>,
    scanner: &VideoScanner<'_>,
    corpus_dir: &Path,
    snapshot: &StoreSnapshot,
    options: &ScanOptions,
    cancel: &CancelToken,
) -> Result<SearchResponse, ApiError> {
    let frame = image.ok_or(ApiError::MissingFile)?;
    let mut faces = scanner.extractor().detect(frame)?;
    if faces.is_empty() {
        return Err(ApiError::NoFaceFound);
    }
    // First detected face is the query target.
    let target = faces.remove(0).embedding;

    let matches = scanner.scan(&target, corpus_dir, snapshot, options, cancel)?;
    Ok(SearchResponse {
        matches: matches.into_iter().map(SearchMatch::from).collect(),
    })
}
