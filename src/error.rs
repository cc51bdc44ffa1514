use thiserror::Error;

#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid superblock signature found in image")]
    NoSuperblock,

    #[error("read of {len} bytes at offset {offset} exceeds image length {image_len}")]
    OutOfBounds {
        offset: u64,
        len: usize,
        image_len: u64,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("logical block {0} is beyond the double-indirect address range")]
    BlockOutOfRange(u64),

    #[error("inode {0} is not a directory")]
    NotADirectory(u16),

    #[error("inode {0} is a directory")]
    IsADirectory(u16),

    #[error("volume is read-only")]
    ReadOnlyVolume,
}

pub type Result<T> = std::result::Result<T, VolumeError>;
