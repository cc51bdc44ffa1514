//! Directory entry enumeration.

use crate::blockmap::block_offset;
use crate::error::{Result, VolumeError};
use crate::image::RawVolume;
use crate::inode::Inode;
use crate::superblock::BLOCK_SIZE;

/// Size of one on-disk directory entry: 2-byte inode number, 14-byte name.
pub const DIRENT_SIZE: u64 = 16;
/// Maximum name width in a directory entry.
pub const NAME_MAX: usize = 14;

/// One live (inode number, name) pair from a directory block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub ino: u16,
    pub name: String,
}

/// Lazy iterator over the live entries of a directory inode, in on-disk
/// order. Re-creating the iterator re-reads the immutable image, so the
/// sequence is restartable.
pub struct DirEntries<'a> {
    image: &'a RawVolume,
    base: u64,
    inode: Inode,
    block_count: u64,
    last_block_bytes: u64,
    block: u64,
    block_start: Option<u64>,
    slot: u64,
}

/// Enumerate `inode`'s entries; fails if it is not a directory.
pub fn entries<'a>(image: &'a RawVolume, base: u64, inode: &Inode) -> Result<DirEntries<'a>> {
    if !inode.is_directory() {
        return Err(VolumeError::NotADirectory(inode.ino));
    }
    Ok(DirEntries {
        image,
        base,
        inode: inode.clone(),
        block_count: (inode.size + BLOCK_SIZE - 1) / BLOCK_SIZE,
        last_block_bytes: inode.size % BLOCK_SIZE,
        block: 0,
        block_start: None,
        slot: 0,
    })
}

impl DirEntries<'_> {
    /// Entries to read from the current block; the final block is read only
    /// up to the directory size's remainder.
    fn slot_limit(&self) -> u64 {
        if self.block == self.block_count - 1 {
            self.last_block_bytes / DIRENT_SIZE
        } else {
            BLOCK_SIZE / DIRENT_SIZE
        }
    }

    fn fail(&mut self, err: VolumeError) -> Option<Result<DirEntry>> {
        self.block = self.block_count;
        Some(Err(err))
    }
}

impl Iterator for DirEntries<'_> {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.block >= self.block_count {
                return None;
            }
            if self.slot >= self.slot_limit() {
                self.block += 1;
                self.slot = 0;
                self.block_start = None;
                continue;
            }
            let start = match self.block_start {
                Some(start) => start,
                None => match block_offset(self.image, self.base, &self.inode, self.block) {
                    Ok(start) => *self.block_start.insert(start),
                    Err(err) => return self.fail(err),
                },
            };
            let slot = self.slot;
            self.slot += 1;
            let raw = match self.image.read_at(start + slot * DIRENT_SIZE, DIRENT_SIZE as usize) {
                Ok(raw) => raw,
                Err(err) => return self.fail(err),
            };
            let ino = u16::from_le_bytes([raw[0], raw[1]]);
            // inode 0 marks a freed slot; a NUL first name byte marks a
            // padded-out entry
            if ino == 0 || raw[2] == 0 {
                continue;
            }
            let name = trim_name(&raw[2..]);
            if name.is_empty() {
                continue;
            }
            return Some(Ok(DirEntry { ino, name }));
        }
    }
}

/// Trim a raw name field: truncate to the declared width, cut at the first
/// NUL, strip leading and trailing whitespace padding.
fn trim_name(raw: &[u8]) -> String {
    let raw = &raw[..raw.len().min(NAME_MAX)];
    let raw = match raw.iter().position(|&b| b == 0) {
        Some(n) => &raw[..n],
        None => raw,
    };
    String::from_utf8_lossy(raw).trim_matches(PADDING).to_string()
}

// matches the historical trim set, vertical tab included
const PADDING: &[char] = &[' ', '\t', '\n', '\r', '\x0c', '\x0b'];
