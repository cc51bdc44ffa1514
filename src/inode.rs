//! Inode records and the fixed-stride on-disk inode table.

use crate::error::{Result, VolumeError};
use crate::image::RawVolume;
use crate::superblock::BLOCK_SIZE;

/// Size of an on-disk inode record.
pub const INODE_SIZE: u64 = 64;
/// Inode number of the root directory.
pub const ROOT_INO: u16 = 2;
/// Number of 3-byte block-address slots per inode.
pub const NADDR: usize = 13;

const IFMT: u16 = 0o170000;
const IFDIR: u16 = 0o040000;
const IFREG: u16 = 0o100000;

/// File kind derived from the format bits of the mode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    /// Device nodes, fifos and anything else the format can host; carries
    /// the raw format bits.
    Other(u16),
}

impl FileKind {
    pub fn from_mode(mode: u16) -> Self {
        match mode & IFMT {
            IFREG => FileKind::Regular,
            IFDIR => FileKind::Directory,
            other => FileKind::Other(other),
        }
    }
}

/// Decoded on-disk inode record. A read-only view: nothing here is ever
/// written back to the image.
#[derive(Debug, Clone)]
pub struct Inode {
    /// Inode number this record was read from (1-based).
    pub ino: u16,
    /// Raw mode word: format bits plus permission bits.
    pub mode: u16,
    pub nlink: i16,
    pub uid: u16,
    pub gid: u16,
    /// File size in bytes.
    pub size: u64,
    /// 13 three-byte little-endian block-address slots.
    pub addr: [u8; 3 * NADDR],
    pub generation: u8,
    pub atime: u32,
    pub mtime: u32,
    pub ctime: u32,
}

impl Inode {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mode(self.mode)
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == FileKind::Directory
    }

    pub fn is_regular(&self) -> bool {
        self.kind() == FileKind::Regular
    }

    /// Block address stored in address slot `slot` (3-byte little-endian).
    pub fn addr_slot(&self, slot: usize) -> u32 {
        let i = slot * 3;
        u32::from(self.addr[i]) | u32::from(self.addr[i + 1]) << 8 | u32::from(self.addr[i + 2]) << 16
    }
}

/// Absolute offset of inode record `ino` within the image.
///
/// Records form a contiguous array starting two blocks past the volume base.
fn table_offset(base: u64, ino: u16) -> u64 {
    base + 2 * BLOCK_SIZE + (u64::from(ino) - 1) * INODE_SIZE
}

/// Read and decode inode `ino`. Inode numbers are 1-based; 0 is never valid.
pub fn inode_at(image: &RawVolume, base: u64, ino: u16) -> Result<Inode> {
    if ino == 0 {
        return Err(VolumeError::NotFound("inode 0".to_string()));
    }
    let record = image.read_at(table_offset(base, ino), INODE_SIZE as usize)?;

    let word = |off: usize| u16::from_le_bytes([record[off], record[off + 1]]);
    let long = |off: usize| {
        u32::from_le_bytes([record[off], record[off + 1], record[off + 2], record[off + 3]])
    };

    let size = long(8) as i32;
    let mut addr = [0u8; 3 * NADDR];
    addr.copy_from_slice(&record[12..12 + 3 * NADDR]);

    Ok(Inode {
        ino,
        mode: word(0),
        nlink: word(2) as i16,
        uid: word(4),
        gid: word(6),
        size: size.max(0) as u64,
        addr,
        generation: record[51],
        atime: long(52),
        mtime: long(56),
        ctime: long(60),
    })
}
