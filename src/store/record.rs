//! On-disk `.fvec` identity records.
//!
//! One record per identity, holding that identity's full ordered embedding
//! sequence. Layout (little-endian):
//!
//! ```text
//! [0..4)   magic "FVEC"
//! [4..8)   format version (u32)
//! [8..12)  embedding dimension (u32)
//! [12..16) embedding count (u32)
//! [16..24) updated_at, Unix epoch micros (u64)
//! [24..28) compressed payload length (u32)
//! [28.. )  LZ4 size-prepended block of count * dimension f32 values
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::types::error::{FaceError, FaceResult};
use crate::types::{now_micros, Embedding};

/// Magic bytes at the start of every .fvec record.
pub const FVEC_MAGIC: [u8; 4] = *b"FVEC";

/// Current record format version.
pub const FORMAT_VERSION: u32 = 1;

/// Fixed header size in bytes, excluding the payload length field.
const HEADER_SIZE: usize = 24;

/// One identity's durable record.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    /// Embedding dimension for every vector in the record.
    pub dimension: u32,
    /// When the record was last rewritten (Unix epoch micros).
    pub updated_at: u64,
    /// The identity's full embedding sequence, in enrollment order.
    pub embeddings: Vec<Embedding>,
}

impl IdentityRecord {
    /// Build a record for the given sequence, stamped with the current time.
    pub fn new(dimension: usize, embeddings: Vec<Embedding>) -> Self {
        Self {
            dimension: dimension as u32,
            updated_at: now_micros(),
            embeddings,
        }
    }

    /// Serialize the record to any writer.
    pub fn write_to(&self, writer: &mut impl Write) -> FaceResult<()> {
        writer.write_all(&FVEC_MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        writer.write_all(&self.dimension.to_le_bytes())?;
        writer.write_all(&(self.embeddings.len() as u32).to_le_bytes())?;
        writer.write_all(&self.updated_at.to_le_bytes())?;

        let mut raw =
            Vec::with_capacity(self.embeddings.len() * self.dimension as usize * 4);
        for embedding in &self.embeddings {
            for value in embedding.iter() {
                raw.extend_from_slice(&value.to_le_bytes());
            }
        }
        let compressed = lz4_flex::compress_prepend_size(&raw);
        writer.write_all(&(compressed.len() as u32).to_le_bytes())?;
        writer.write_all(&compressed)?;
        Ok(())
    }

    /// Atomically replace the record at `path`.
    ///
    /// Writes to a sibling temp file, syncs, then renames over the target so
    /// a crash never leaves a partially written record behind.
    pub fn write_to_file(&self, path: &Path) -> FaceResult<()> {
        let tmp = tmp_path(path);
        let file = std::fs::File::create(&tmp)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Parse a record from any reader.
    pub fn read_from(reader: &mut impl Read) -> FaceResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Read a record from a file.
    pub fn read_from_file(path: &Path) -> FaceResult<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    fn parse(data: &[u8]) -> FaceResult<Self> {
        if data.len() < HEADER_SIZE + 4 {
            return Err(FaceError::Truncated);
        }
        if data[0..4] != FVEC_MAGIC {
            return Err(FaceError::InvalidMagic);
        }
        let version = u32::from_le_bytes(data[4..8].try_into().unwrap());
        if version != FORMAT_VERSION {
            return Err(FaceError::UnsupportedVersion(version));
        }
        let dimension = u32::from_le_bytes(data[8..12].try_into().unwrap());
        let count = u32::from_le_bytes(data[12..16].try_into().unwrap());
        let updated_at = u64::from_le_bytes(data[16..24].try_into().unwrap());
        let payload_len = u32::from_le_bytes(data[24..28].try_into().unwrap()) as usize;

        let payload_start = HEADER_SIZE + 4;
        if data.len() < payload_start + payload_len {
            return Err(FaceError::Truncated);
        }
        let raw = lz4_flex::decompress_size_prepended(
            &data[payload_start..payload_start + payload_len],
        )
        .map_err(|e| FaceError::Compression(e.to_string()))?;

        let expected = count as usize * dimension as usize * 4;
        if raw.len() != expected {
            return Err(FaceError::Corrupt(format!(
                "payload holds {} bytes, expected {}",
                raw.len(),
                expected
            )));
        }
        if count > 0 && dimension == 0 {
            return Err(FaceError::Corrupt("zero dimension".to_string()));
        }

        let mut embeddings = Vec::with_capacity(count as usize);
        for chunk in raw.chunks_exact(dimension as usize * 4) {
            let values: Vec<f32> = chunk
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes(b.try_into().unwrap()))
                .collect();
            embeddings.push(Embedding::new(values)?);
        }

        Ok(Self {
            dimension,
            updated_at,
            embeddings,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
