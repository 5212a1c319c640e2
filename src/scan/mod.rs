//! Video corpus scanning: find every temporal occurrence of a query face.

pub mod cancel;

pub use cancel::CancelToken;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use log::{debug, info, warn};
use serde::Serialize;

use crate::extract::FaceExtractor;
use crate::matcher::classify;
use crate::types::error::{FaceError, FaceResult};
use crate::types::{euclidean_distance, Embedding, StoreSnapshot};
use crate::video::{is_video_file, VideoDecoder};

/// Default acceptance threshold for video matches. Shares the classifier's
/// default but is an independent knob.
pub const DEFAULT_SCAN_THRESHOLD: f32 = 0.6;

/// Default linear downscale factor applied to frames before extraction.
pub const DEFAULT_DOWNSCALE: f32 = 0.25;

/// Tuning knobs for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum distance at which a frame face counts as the target.
    pub threshold: f32,
    /// Threshold forwarded to `classify` for the recognized-identity label.
    pub match_threshold: f32,
    /// Linear downscale factor applied to sampled frames before extraction.
    pub downscale: f32,
    /// Approximate samples per second of video.
    pub sample_rate: f32,
    /// Worker threads scanning files in parallel. Clamped to at least 1.
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCAN_THRESHOLD,
            match_threshold: crate::matcher::DEFAULT_MATCH_THRESHOLD,
            downscale: DEFAULT_DOWNSCALE,
            sample_rate: 1.0,
            workers: 4,
        }
    }
}

/// One timestamped occurrence of the target face in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// File name of the source video within the corpus directory.
    pub video_file: String,
    /// 1-based index of the sampled frame that matched.
    pub frame_index: u64,
    /// Seconds from the start of the video; 0.0 when the frame rate is
    /// unavailable.
    pub timestamp_seconds: f64,
    /// Enrolled identity the face also corresponds to, if any.
    pub recognized_as: Option<String>,
}

/// Scans a directory of video files for a target embedding.
pub struct VideoScanner<'a> {
    decoder: &'a dyn VideoDecoder,
    extractor: &'a dyn FaceExtractor,
}

impl<'a> VideoScanner<'a> {
    /// Build a scanner over the given decode and extraction capabilities.
    pub fn new(decoder: &'a dyn VideoDecoder, extractor: &'a dyn FaceExtractor) -> Self {
        Self { decoder, extractor }
    }

    /// The extraction capability, shared with callers that need to embed
    /// query images through the same model.
    pub fn extractor(&self) -> &dyn FaceExtractor {
        self.extractor
    }

    /// Scan every eligible file under `corpus_dir` for `target`.
    ///
    /// Files are independent units of work: a corrupt or unopenable file is
    /// skipped with a warning and never aborts the batch. Results are sorted
    /// by (file enumeration order, frame index) before returning, so the
    /// output is deterministic regardless of worker scheduling. An empty or
    /// missing corpus yields an empty result, never an error.
    ///
    /// Cancellation is checked once per file and once per sampled frame;
    /// results collected up to that point are returned. The token is only
    /// ever read, so callers may share one token across scans.
    pub fn scan(
        &self,
        target: &Embedding,
        corpus_dir: &Path,
        snapshot: &StoreSnapshot,
        options: &ScanOptions,
        cancel: &CancelToken,
    ) -> FaceResult<Vec<MatchResult>> {
        let entries = match std::fs::read_dir(corpus_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("corpus directory {} not readable: {}", corpus_dir.display(), e);
                return Ok(Vec::new());
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| is_video_file(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Ok(Vec::new());
        }

        let workers = options.workers.max(1).min(files.len());
        let next_file = AtomicUsize::new(0);
        let collected: Mutex<Vec<(usize, Vec<MatchResult>)>> = Mutex::new(Vec::new());
        let fatal: Mutex<Option<FaceError>> = Mutex::new(None);
        // Internal stop flag for fatal-error shutdown. The caller's token is
        // only ever read; a failing scan must not cancel a token the caller
        // may share across scans.
        let stop = CancelToken::new();

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if cancel.is_cancelled() || stop.is_cancelled() {
                        break;
                    }
                    let index = next_file.fetch_add(1, Ordering::SeqCst);
                    if index >= files.len() {
                        break;
                    }
                    match self.scan_file(&files[index], target, snapshot, options, cancel, &stop)
                    {
                        Ok(results) => {
                            collected.lock().unwrap().push((index, results));
                        }
                        Err(e) => {
                            // Only call-fatal errors (dimension mismatch)
                            // escape scan_file; stop the other workers too.
                            let mut slot = fatal.lock().unwrap();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            stop.cancel();
                            break;
                        }
                    }
                });
            }
        });

        if let Some(e) = fatal.into_inner().unwrap() {
            return Err(e);
        }

        let mut collected = collected.into_inner().unwrap();
        collected.sort_by_key(|(index, _)| *index);
        let results: Vec<MatchResult> = collected
            .into_iter()
            .flat_map(|(_, results)| results)
            .collect();
        info!(
            "scan of {} found {} matches across {} files",
            corpus_dir.display(),
            results.len(),
            files.len()
        );
        Ok(results)
    }

    /// Scan one file. Per-file failures (unopenable stream, mid-stream
    /// decode error, extractor failure on a frame) are contained here;
    /// only dimension mismatches propagate.
    fn scan_file(
        &self,
        path: &Path,
        target: &Embedding,
        snapshot: &StoreSnapshot,
        options: &ScanOptions,
        cancel: &CancelToken,
        stop: &CancelToken,
    ) -> FaceResult<Vec<MatchResult>> {
        let video_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // Stream drops at the end of this function, success or failure,
        // before the worker moves to the next file.
        let mut stream = match self.decoder.open(path) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("could not open video file {}: {}", path.display(), e);
                return Ok(Vec::new());
            }
        };

        let fps = stream.frame_rate();
        let interval = sample_interval(fps, options.sample_rate);
        debug!(
            "scanning {} (fps {}, sampling every {} frames)",
            video_file, fps, interval
        );

        let mut results = Vec::new();
        let mut frame_count: u64 = 0;
        loop {
            if cancel.is_cancelled() || stop.is_cancelled() {
                break;
            }
            let frame = match stream.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    warn!("decode failed in {} after frame {}: {}", video_file, frame_count, e);
                    break;
                }
            };
            frame_count += 1;
            if frame_count % interval != 0 {
                continue;
            }

            let small = frame.downscale(options.downscale);
            let faces = match self.extractor.detect(&small) {
                Ok(faces) => faces,
                Err(e) => {
                    warn!("extraction failed in {} at frame {}: {}", video_file, frame_count, e);
                    continue;
                }
            };

            for face in faces {
                let distance = euclidean_distance(target, &face.embedding)?;
                if distance < options.threshold {
                    let classification =
                        classify(&face.embedding, snapshot, options.match_threshold)?;
                    let timestamp = if fps.is_finite() && fps > 0.0 {
                        frame_count as f64 / fps
                    } else {
                        0.0
                    };
                    debug!(
                        "match in {} at {:.2}s (distance {:.3})",
                        video_file, timestamp, distance
                    );
                    results.push(MatchResult {
                        video_file: video_file.clone(),
                        frame_index: frame_count,
                        timestamp_seconds: timestamp,
                        recognized_as: classification.label,
                    });
                }
            }
        }

        Ok(results)
    }
}

/// Frames between samples: approximately `sample_rate` samples per second,
/// minimum 1 when the reported rate is unavailable or non-positive.
fn sample_interval(fps: f64, sample_rate: f32) -> u64 {
    if !fps.is_finite() || fps <= 0.0 {
        return 1;
    }
    let rate = if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate as f64
    } else {
        1.0
    };
    ((fps / rate).round() as u64).max(1)
}
