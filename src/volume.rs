//! The volume session: open an image once, query it from any number of
//! callers.
//!
//! Every query takes `&self` and is a pure function over the immutable
//! image plus the base offset established at open, so a `Volume` can be
//! shared freely across threads by a dispatch layer.

use std::path::Path;
use tracing::{debug, info};

use crate::dir::{self, DirEntries};
use crate::error::{Result, VolumeError};
use crate::file;
use crate::image::RawVolume;
use crate::inode::{self, FileKind, Inode, ROOT_INO};
use crate::path;
use crate::superblock::{self, Superblock};

/// An opened, read-only S5 volume.
pub struct Volume {
    image: RawVolume,
    base: u64,
    superblock: Superblock,
}

/// Attribute projection of an inode. Timestamps are epoch seconds with no
/// fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub kind: FileKind,
    /// Raw mode word: format bits plus permission bits.
    pub mode: u16,
    pub nlink: i16,
    pub uid: u16,
    pub gid: u16,
    pub size: u64,
    pub atime: u32,
    pub mtime: u32,
    pub ctime: u32,
    pub generation: u8,
}

impl Attributes {
    fn from_inode(node: &Inode) -> Attributes {
        Attributes {
            kind: node.kind(),
            mode: node.mode,
            nlink: node.nlink,
            uid: node.uid,
            gid: node.gid,
            size: node.size,
            atime: node.atime,
            mtime: node.mtime,
            ctime: node.ctime,
            generation: node.generation,
        }
    }
}

/// A directory listing row: trimmed entry name plus the target's attributes.
#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub ino: u16,
    pub name: String,
    pub attributes: Attributes,
}

impl Volume {
    /// Open an image file: map it read-only and locate the superblock.
    ///
    /// Fails if the file cannot be opened or no valid signature exists. The
    /// mapping is released on every exit path, open failure included.
    pub fn open<P: AsRef<Path>>(image_path: P) -> Result<Volume> {
        Volume::with_image(RawVolume::map(image_path)?)
    }

    /// Open over an in-memory image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Volume> {
        Volume::with_image(RawVolume::from_bytes(bytes))
    }

    fn with_image(image: RawVolume) -> Result<Volume> {
        let (base, superblock) = superblock::locate(&image)?;
        info!(
            "found volume '{}' pack '{}' at {:#x}",
            superblock.volume_name, superblock.pack_name, base
        );
        Ok(Volume {
            image,
            base,
            superblock,
        })
    }

    /// The decoded superblock located at open.
    pub fn superblock(&self) -> &Superblock {
        &self.superblock
    }

    /// Byte offset of block 0 within the image.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Inode lookup by number (handle-based access).
    pub fn inode(&self, ino: u16) -> Result<Inode> {
        inode::inode_at(&self.image, self.base, ino)
    }

    /// The root directory inode.
    pub fn root(&self) -> Result<Inode> {
        self.inode(ROOT_INO)
    }

    /// Resolve a slash-separated path to its inode.
    pub fn lookup(&self, file_path: &str) -> Result<Inode> {
        debug!("resolving {}", file_path);
        path::resolve(&self.image, self.base, file_path)
    }

    /// Attributes of inode `ino`.
    pub fn attributes(&self, ino: u16) -> Result<Attributes> {
        Ok(Attributes::from_inode(&self.inode(ino)?))
    }

    /// Lazy (inode number, name) sequence over a directory's live entries.
    pub fn read_dir(&self, node: &Inode) -> Result<DirEntries<'_>> {
        dir::entries(&self.image, self.base, node)
    }

    /// Directory listing with attributes, in on-disk order.
    pub fn list_directory(&self, node: &Inode) -> Result<Vec<DirEntryInfo>> {
        debug!("listing directory inode {}", node.ino);
        let mut rows = Vec::new();
        for entry in self.read_dir(node)? {
            let entry = entry?;
            let target = self.inode(entry.ino)?;
            rows.push(DirEntryInfo {
                ino: entry.ino,
                name: entry.name,
                attributes: Attributes::from_inode(&target),
            });
        }
        Ok(rows)
    }

    /// Read up to `len` bytes of a file starting at `offset`, clamped to the
    /// file size.
    pub fn read_file(&self, node: &Inode, offset: u64, len: u64) -> Result<Vec<u8>> {
        debug!("reading inode {} offset {} len {}", node.ino, offset, len);
        file::read(&self.image, self.base, node, offset, len)
    }

    /// Mutation is unsupported; the volume is read-only for its lifetime.
    pub fn write_file(&self, _node: &Inode, _offset: u64, _data: &[u8]) -> Result<usize> {
        Err(VolumeError::ReadOnlyVolume)
    }

    /// Mutation is unsupported; the volume is read-only for its lifetime.
    pub fn create(&self, _parent: &Inode, _name: &str) -> Result<Inode> {
        Err(VolumeError::ReadOnlyVolume)
    }

    /// Mutation is unsupported; the volume is read-only for its lifetime.
    pub fn rename(&self, _from: &str, _to: &str) -> Result<()> {
        Err(VolumeError::ReadOnlyVolume)
    }

    /// Mutation is unsupported; the volume is read-only for its lifetime.
    pub fn remove(&self, _file_path: &str) -> Result<()> {
        Err(VolumeError::ReadOnlyVolume)
    }
}
