//! faceseek — face enrollment, recognition, and video temporal search.
//!
//! Enrolls individuals as sets of face embeddings, classifies newly observed
//! faces against enrolled identities by nearest-neighbor distance, and scans
//! a corpus of video files for every timestamped occurrence of a query face.

pub mod api;
pub mod cli;
pub mod config;
pub mod extract;
pub mod matcher;
pub mod scan;
pub mod store;
pub mod types;
pub mod video;

// Re-export commonly used types at the crate root
pub use api::{ApiError, RecognizeResponse, SearchMatch, SearchResponse};
pub use config::EngineConfig;
pub use extract::{BoundingBox, DetectedFace, FaceExtractor, Frame};
pub use matcher::{classify, Classification, DEFAULT_MATCH_THRESHOLD};
pub use scan::{
    CancelToken, MatchResult, ScanOptions, VideoScanner, DEFAULT_DOWNSCALE,
    DEFAULT_SCAN_THRESHOLD,
};
pub use store::{record::IdentityRecord, IdentityStore};
pub use types::{
    euclidean_distance, now_micros, Embedding, FaceError, FaceResult, Identity, StoreSnapshot,
    DEFAULT_DIMENSION, UNKNOWN_LABEL,
};
pub use video::{is_video_file, FrameStream, VideoDecoder, VIDEO_EXTENSIONS};
