//! Logical-to-absolute block address translation.
//!
//! A file's logical block index goes through up to two levels of
//! indirection: slots 0-9 of the inode address array are direct, slot 10
//! names a single-indirect block of 4-byte addresses, slot 11 a
//! double-indirect block of addresses of such blocks. Slot 12 exists on
//! disk for a third tier the format variant never used; indices that would
//! need it fail rather than guess.

use crate::error::{Result, VolumeError};
use crate::image::RawVolume;
use crate::inode::Inode;
use crate::superblock::BLOCK_SIZE;

/// 4-byte data-block pointers per indirect block.
pub const PTRS_PER_BLOCK: u64 = BLOCK_SIZE / 4;
/// Address slots resolved directly from the inode.
const DIRECT_SLOTS: u64 = 10;
const SINGLE_SLOT: usize = 10;
const DOUBLE_SLOT: usize = 11;

/// Highest addressable logical block index, exclusive.
pub const MAX_LOGICAL_BLOCKS: u64 = DIRECT_SLOTS + PTRS_PER_BLOCK + PTRS_PER_BLOCK * PTRS_PER_BLOCK;

fn absolute(base: u64, block: u32) -> u64 {
    base + u64::from(block) * BLOCK_SIZE
}

/// Translate logical block `n` of `inode` into an absolute image offset.
///
/// The address chain is recomputed on every call; nothing is cached.
pub fn block_offset(image: &RawVolume, base: u64, inode: &Inode, n: u64) -> Result<u64> {
    if n < DIRECT_SLOTS {
        return Ok(absolute(base, inode.addr_slot(n as usize)));
    }

    if n < DIRECT_SLOTS + PTRS_PER_BLOCK {
        let index = n - DIRECT_SLOTS;
        let indirect = absolute(base, inode.addr_slot(SINGLE_SLOT));
        let addr = image.read_u32_le(indirect + 4 * index)?;
        return Ok(absolute(base, addr));
    }

    if n < MAX_LOGICAL_BLOCKS {
        let index = n - DIRECT_SLOTS - PTRS_PER_BLOCK;
        let top = absolute(base, inode.addr_slot(DOUBLE_SLOT));
        let mid = image.read_u32_le(top + 4 * (index / PTRS_PER_BLOCK))?;
        let addr = image.read_u32_le(absolute(base, mid) + 4 * (index % PTRS_PER_BLOCK))?;
        return Ok(absolute(base, addr));
    }

    Err(VolumeError::BlockOutOfRange(n))
}
