//! Raw image access: an immutable byte view with bounds-checked reads.

use crate::error::{Result, VolumeError};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// Immutable byte view of a whole disk image.
///
/// Owns the backing storage (a read-only mapping or an owned buffer) for the
/// lifetime of the volume session. Every read is validated against the image
/// length; nothing is ever written back.
pub struct RawVolume {
    backing: Backing,
}

impl RawVolume {
    /// Map an image file read-only.
    pub fn map<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        // Safety: read-only private mapping; the image file is treated as
        // immutable for the whole session.
        let map = unsafe { Mmap::map(&file)? };
        Ok(RawVolume {
            backing: Backing::Mapped(map),
        })
    }

    /// Wrap an in-memory image.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        RawVolume {
            backing: Backing::Owned(bytes),
        }
    }

    /// Total image length in bytes.
    pub fn len(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(map) => map,
            Backing::Owned(bytes) => bytes,
        }
    }

    /// Bounds-checked fixed-size read at an arbitrary byte offset.
    pub fn read_at(&self, offset: u64, len: usize) -> Result<&[u8]> {
        let bytes = self.as_bytes();
        let end = offset
            .checked_add(len as u64)
            .filter(|&end| end <= bytes.len() as u64)
            .ok_or(VolumeError::OutOfBounds {
                offset,
                len,
                image_len: bytes.len() as u64,
            })?;
        Ok(&bytes[offset as usize..end as usize])
    }

    pub fn read_u16_le(&self, offset: u64) -> Result<u16> {
        let b = self.read_at(offset, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32_le(&self, offset: u64) -> Result<u32> {
        let b = self.read_at(offset, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
