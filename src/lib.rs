//! Read-only access to SystemV "S5"-family 2KB-block filesystem images.
//!
//! An image is opened once (memory-mapped or from owned bytes) and its
//! superblock located by signature scan. From then on every query is a pure
//! function over the immutable bytes: inode lookup, directory enumeration,
//! slash-separated path resolution, and ranged file reads through the
//! direct / single-indirect / double-indirect block address scheme.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use s5fs::{Volume, Result};
//!
//! # fn main() -> Result<()> {
//! let vol = Volume::open("disk.img")?;
//! let node = vol.lookup("/etc/passwd")?;
//! let bytes = vol.read_file(&node, 0, node.size)?;
//!
//! let root = vol.root()?;
//! for row in vol.list_directory(&root)? {
//!     println!("{} {} bytes", row.name, row.attributes.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The volume is read-only by design: there is no allocation, write or
//! repair path, and every mutation request fails uniformly.

pub mod blockmap;
pub mod dir;
pub mod error;
pub mod file;
pub mod image;
pub mod inode;
pub mod path;
pub mod superblock;
pub mod volume;

pub use dir::{DirEntries, DirEntry, DIRENT_SIZE, NAME_MAX};
pub use error::{Result, VolumeError};
pub use image::RawVolume;
pub use inode::{FileKind, Inode, INODE_SIZE, NADDR, ROOT_INO};
pub use superblock::{Superblock, BLOCK_SIZE, MAGIC, SUPERBLOCK_SIZE};
pub use volume::{Attributes, DirEntryInfo, Volume};
