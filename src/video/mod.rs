//! Video decoding capability traits and corpus file eligibility.
//!
//! Decoding is an external collaborator; the scanner only depends on these
//! traits, never on a concrete codec or capture device.

use std::path::Path;

use crate::extract::Frame;
use crate::types::error::FaceResult;

/// Recognized video file extensions, matched case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Whether a corpus entry is eligible for scanning by extension.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == lower)
        })
        .unwrap_or(false)
}

/// An open, decodable stream of frames from one video file.
///
/// Dropped deterministically when a file's scan ends, whether by exhaustion
/// or by error, so a failure mid-file never leaks the decode resource.
pub trait FrameStream: Send {
    /// The stream's reported frame rate. May be zero, negative, or NaN when
    /// the container does not report one.
    fn frame_rate(&self) -> f64;

    /// Decode the next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> FaceResult<Option<Frame>>;
}

/// External video decoding capability.
pub trait VideoDecoder: Send + Sync {
    /// Open a decodable stream for the file at `path`.
    fn open(&self, path: &Path) -> FaceResult<Box<dyn FrameStream>>;
}
