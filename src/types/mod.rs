//! All data types for the faceseek library.

pub mod embedding;
pub mod error;
pub mod identity;

pub use embedding::{euclidean_distance, Embedding};
pub use error::{FaceError, FaceResult};
pub use identity::{Identity, StoreSnapshot};

/// Default embedding dimensionality (fixed by the external extractor).
pub const DEFAULT_DIMENSION: usize = 128;

/// Label reported for a face that matches no enrolled identity.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
