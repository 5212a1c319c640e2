//! Synthetic decode/extraction implementations shared by integration tests.
//!
//! Frames carry a one-byte marker in the top-left red channel; nearest-
//! neighbor downscaling preserves that pixel, so the fake extractor can key
//! its canned detections off the marker regardless of the downscale factor.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use faceseek::{
    BoundingBox, DetectedFace, Embedding, FaceError, FaceExtractor, FaceResult, Frame,
    FrameStream, VideoDecoder,
};

/// An 8x8 frame whose pixel (0,0) red channel is `marker`.
pub fn marker_frame(marker: u8) -> Frame {
    let mut pixels = vec![0u8; 8 * 8 * 3];
    pixels[0] = marker;
    Frame::new(8, 8, pixels).unwrap()
}

/// An embedding with `value` in the first component and zeros elsewhere.
pub fn unit_embedding(dimension: usize, value: f32) -> Embedding {
    let mut values = vec![0.0; dimension];
    values[0] = value;
    Embedding::new(values).unwrap()
}

/// One scripted video: a frame rate and the marker byte of each frame.
pub struct FakeVideo {
    pub fps: f64,
    pub markers: Vec<u8>,
    pub corrupt: bool,
}

impl FakeVideo {
    pub fn new(fps: f64, markers: Vec<u8>) -> Self {
        Self {
            fps,
            markers,
            corrupt: false,
        }
    }

    pub fn corrupt(fps: f64) -> Self {
        Self {
            fps,
            markers: Vec::new(),
            corrupt: true,
        }
    }
}

/// Decoder that serves scripted videos keyed by file name.
#[derive(Default)]
pub struct FakeDecoder {
    videos: HashMap<String, FakeVideo>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: &str, video: FakeVideo) {
        self.videos.insert(file_name.to_string(), video);
    }
}

impl VideoDecoder for FakeDecoder {
    fn open(&self, path: &Path) -> FaceResult<Box<dyn FrameStream>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let video = self
            .videos
            .get(name)
            .ok_or_else(|| FaceError::Decode(format!("no stream for {}", name)))?;
        if video.corrupt {
            return Err(FaceError::Decode(format!("corrupt container: {}", name)));
        }
        Ok(Box::new(FakeStream {
            fps: video.fps,
            markers: video.markers.clone().into_iter(),
        }))
    }
}

struct FakeStream {
    fps: f64,
    markers: std::vec::IntoIter<u8>,
}

impl FrameStream for FakeStream {
    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn next_frame(&mut self) -> FaceResult<Option<Frame>> {
        Ok(self.markers.next().map(marker_frame))
    }
}

/// Extractor that maps marker bytes to canned detections.
#[derive(Default)]
pub struct FakeExtractor {
    faces: HashMap<u8, Vec<Embedding>>,
    failing: Vec<u8>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames carrying `marker` yield these embeddings.
    pub fn with_faces(mut self, marker: u8, embeddings: Vec<Embedding>) -> Self {
        self.faces.insert(marker, embeddings);
        self
    }

    /// Frames carrying `marker` make the extractor fail.
    pub fn with_failure(mut self, marker: u8) -> Self {
        self.failing.push(marker);
        self
    }
}

impl FaceExtractor for FakeExtractor {
    fn detect(&self, frame: &Frame) -> FaceResult<Vec<DetectedFace>> {
        let marker = frame.pixels()[0];
        if self.failing.contains(&marker) {
            return Err(FaceError::Extract("model failure".to_string()));
        }
        Ok(self
            .faces
            .get(&marker)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|embedding| DetectedFace {
                embedding,
                region: BoundingBox {
                    x: 0,
                    y: 0,
                    width: 4,
                    height: 4,
                },
            })
            .collect())
    }
}

/// Create an empty placeholder file so directory enumeration sees it.
pub fn touch(dir: &Path, file_name: &str) {
    std::fs::write(dir.join(file_name), b"").unwrap();
}
