//! Ranged file reads assembled across block boundaries.

use crate::blockmap::block_offset;
use crate::error::{Result, VolumeError};
use crate::image::RawVolume;
use crate::inode::Inode;
use crate::superblock::BLOCK_SIZE;

/// Read up to `len` bytes of `inode` starting at byte `offset`.
///
/// The request is clamped to the file size, so reads past the end return
/// the available suffix (possibly empty). The returned bytes reproduce the
/// on-disk byte run exactly, however many block boundaries it crosses.
pub fn read(
    image: &RawVolume,
    base: u64,
    inode: &Inode,
    offset: u64,
    len: u64,
) -> Result<Vec<u8>> {
    if inode.is_directory() {
        return Err(VolumeError::IsADirectory(inode.ino));
    }

    let mut remaining = len.min(inode.size.saturating_sub(offset));
    let mut out = Vec::with_capacity(remaining as usize);
    let mut block = offset / BLOCK_SIZE;
    let mut intra = offset % BLOCK_SIZE;

    while remaining > 0 {
        let start = block_offset(image, base, inode, block)?;
        let take = (BLOCK_SIZE - intra).min(remaining);
        out.extend_from_slice(image.read_at(start + intra, take as usize)?);
        remaining -= take;
        intra = 0;
        block += 1;
    }

    Ok(out)
}
