//! Frames and the external face-extraction boundary.
//!
//! Face detection and embedding extraction are external collaborators; the
//! core only sees the `FaceExtractor` capability. Given an image it returns
//! zero or more embeddings with their bounding regions.

use crate::types::error::{FaceError, FaceResult};
use crate::types::Embedding;

/// An owned RGB24 pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Build a frame from raw RGB24 pixels. The buffer must hold exactly
    /// `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> FaceResult<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(FaceError::Decode(format!(
                "frame buffer holds {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGB24 buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Downscale by a linear factor using nearest-neighbor sampling.
    ///
    /// Used to shrink frames before extraction; a throughput/quality
    /// trade-off, not a correctness requirement. Factors outside (0, 1)
    /// and zero-sized frames return the frame unchanged.
    pub fn downscale(&self, factor: f32) -> Frame {
        if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 {
            return self.clone();
        }
        let out_width = ((self.width as f32 * factor).round() as u32).max(1);
        let out_height = ((self.height as f32 * factor).round() as u32).max(1);

        let mut pixels = Vec::with_capacity(out_width as usize * out_height as usize * 3);
        for y in 0..out_height {
            let src_y = ((y as f32 / factor) as u32).min(self.height - 1);
            for x in 0..out_width {
                let src_x = ((x as f32 / factor) as u32).min(self.width - 1);
                let idx = (src_y as usize * self.width as usize + src_x as usize) * 3;
                pixels.extend_from_slice(&self.pixels[idx..idx + 3]);
            }
        }
        Frame {
            width: out_width,
            height: out_height,
            pixels,
        }
    }
}

/// Pixel region of a detected face within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One face found in a frame: its embedding and where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    /// The extracted embedding.
    pub embedding: Embedding,
    /// Where the face sits in the source frame.
    pub region: BoundingBox,
}

/// External face-detection/embedding extraction capability.
pub trait FaceExtractor: Send + Sync {
    /// Detect faces in a frame and extract one embedding per face.
    /// Zero detections is a normal outcome, not an error.
    fn detect(&self, frame: &Frame) -> FaceResult<Vec<DetectedFace>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0]);
            }
        }
        Frame::new(width, height, pixels).unwrap()
    }

    #[test]
    fn frame_buffer_length_checked() {
        assert!(Frame::new(2, 2, vec![0; 12]).is_ok());
        assert!(matches!(
            Frame::new(2, 2, vec![0; 11]),
            Err(FaceError::Decode(_))
        ));
    }

    #[test]
    fn downscale_quarter() {
        let frame = gradient_frame(8, 8);
        let small = frame.downscale(0.25);
        assert_eq!(small.width(), 2);
        assert_eq!(small.height(), 2);
        // Nearest-neighbor keeps the top-left pixel intact.
        assert_eq!(&small.pixels()[0..3], &frame.pixels()[0..3]);
    }

    #[test]
    fn downscale_never_collapses_to_zero() {
        let frame = gradient_frame(3, 3);
        let small = frame.downscale(0.1);
        assert_eq!(small.width(), 1);
        assert_eq!(small.height(), 1);
    }

    #[test]
    fn downscale_zero_sized_frame_is_identity() {
        let empty = Frame::new(0, 0, Vec::new()).unwrap();
        assert_eq!(empty.downscale(0.25), empty);

        let row = Frame::new(4, 0, Vec::new()).unwrap();
        assert_eq!(row.downscale(0.5), row);
    }

    #[test]
    fn downscale_out_of_range_is_identity() {
        let frame = gradient_frame(4, 4);
        assert_eq!(frame.downscale(1.0), frame);
        assert_eq!(frame.downscale(0.0), frame);
        assert_eq!(frame.downscale(f32::NAN), frame);
    }
}
