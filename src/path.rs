//! Slash-separated path resolution over directory enumeration.

use crate::dir;
use crate::error::{Result, VolumeError};
use crate::image::RawVolume;
use crate::inode::{self, Inode, ROOT_INO};

/// Lexically normalize `path` into its component segments: the leading
/// separator and empty or `.` segments drop out, `..` pops its parent.
fn segments(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            segment => out.push(segment),
        }
    }
    out
}

/// Resolve `path` to its inode, walking from the root directory.
///
/// The empty or root path yields the root inode without any directory scan.
/// Resolution stops at the first segment with no match; later segments are
/// never consulted.
pub fn resolve(image: &RawVolume, base: u64, path: &str) -> Result<Inode> {
    let mut node = inode::inode_at(image, base, ROOT_INO)?;
    for segment in segments(path) {
        node = descend(image, base, &node, segment, path)?;
    }
    Ok(node)
}

/// Linear scan of one directory for a trimmed name equal to `segment`.
fn descend(
    image: &RawVolume,
    base: u64,
    node: &Inode,
    segment: &str,
    full_path: &str,
) -> Result<Inode> {
    if !node.is_directory() {
        return Err(VolumeError::NotFound(full_path.to_string()));
    }
    for entry in dir::entries(image, base, node)? {
        let entry = entry?;
        if entry.name == segment {
            return inode::inode_at(image, base, entry.ino);
        }
    }
    Err(VolumeError::NotFound(full_path.to_string()))
}
