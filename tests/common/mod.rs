//! Shared synthetic-image builder for integration tests.
//!
//! Lays volumes out the way the on-disk format expects: the 512-byte
//! superblock region opens block 0, the inode table starts two blocks past
//! the base, and data blocks are handed out from block 3 so nothing
//! collides with the metadata area.

#![allow(dead_code)]

use s5fs::{BLOCK_SIZE, INODE_SIZE, MAGIC};

pub const IFDIR: u16 = 0o040000;
pub const IFREG: u16 = 0o100000;
pub const IFCHR: u16 = 0o020000;

pub const UID: u16 = 1000;
pub const GID: u16 = 100;
pub const ATIME: u32 = 1_111_111;
pub const MTIME: u32 = 2_222_222;
pub const CTIME: u32 = 3_333_333;

const BS: usize = BLOCK_SIZE as usize;
const IS: usize = INODE_SIZE as usize;

pub struct ImageBuilder {
    data: Vec<u8>,
    base: usize,
    next_block: u32,
}

impl ImageBuilder {
    /// Image whose superblock region starts at byte `base`; anything before
    /// it is junk the locator must scan over.
    pub fn new(base: usize) -> Self {
        let mut builder = ImageBuilder {
            data: vec![0u8; base + 4 * BS],
            base,
            next_block: 3,
        };
        builder.write_superblock();
        builder
    }

    fn write_superblock(&mut self) {
        let sb = self.base;
        self.put_u16(sb, 1); // inode list blocks
        self.put_u32(sb + 2, 64); // volume blocks
        self.put_u32(sb + 414, 4_444_444); // update time
        self.put_u32(sb + 426, 12); // total free blocks
        self.put_u16(sb + 430, 5); // total free inodes
        self.data[sb + 432..sb + 438].copy_from_slice(b"tstvol");
        self.data[sb + 438..sb + 443].copy_from_slice(b"tpack");
        self.put_u32(sb + 504, MAGIC);
        self.put_u32(sb + 508, 1); // fstype
    }

    fn ensure(&mut self, end: usize) {
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
    }

    fn put_u16(&mut self, off: usize, value: u16) {
        self.ensure(off + 2);
        self.data[off..off + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(&mut self, off: usize, value: u32) {
        self.ensure(off + 4);
        self.data[off..off + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn put_addr3(&mut self, off: usize, block: u32) {
        self.ensure(off + 3);
        self.data[off] = block as u8;
        self.data[off + 1] = (block >> 8) as u8;
        self.data[off + 2] = (block >> 16) as u8;
    }

    /// Append a data block holding `content` (at most one block), returning
    /// its block number.
    pub fn add_block(&mut self, content: &[u8]) -> u32 {
        assert!(content.len() <= BS);
        let block = self.next_block;
        self.next_block += 1;
        let off = self.base + block as usize * BS;
        self.ensure(off + BS);
        self.data[off..off + content.len()].copy_from_slice(content);
        block
    }

    /// Append one data block per chunk of `content`, returning the block
    /// numbers in order.
    pub fn add_blocks(&mut self, content: &[u8]) -> Vec<u32> {
        let mut blocks = Vec::new();
        for chunk in content.chunks(BS) {
            blocks.push(self.add_block(chunk));
        }
        blocks
    }

    fn inode_offset(&self, ino: u16) -> usize {
        assert!((1..32).contains(&ino), "builder keeps the table in block 2");
        self.base + 2 * BS + (ino as usize - 1) * IS
    }

    /// Write inode record `ino` with fixed test identity fields and block
    /// addresses filling slots 0 upward.
    pub fn put_inode(&mut self, ino: u16, mode: u16, size: u32, addrs: &[u32]) {
        assert!(addrs.len() <= 13);
        let off = self.inode_offset(ino);
        self.ensure(off + IS);
        self.put_u16(off, mode);
        self.put_u16(off + 2, 1); // nlink
        self.put_u16(off + 4, UID);
        self.put_u16(off + 6, GID);
        self.put_u32(off + 8, size);
        for (slot, &block) in addrs.iter().enumerate() {
            self.put_addr3(off + 12 + slot * 3, block);
        }
        self.data[off + 51] = 9; // generation
        self.put_u32(off + 52, ATIME);
        self.put_u32(off + 56, MTIME);
        self.put_u32(off + 60, CTIME);
    }

    /// Point one address slot of an existing inode at `block` (slots 10 and
    /// 11 carry the indirect chain roots).
    pub fn set_addr_slot(&mut self, ino: u16, slot: usize, block: u32) {
        assert!(slot < 13);
        let off = self.inode_offset(ino);
        self.put_addr3(off + 12 + slot * 3, block);
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Pack (inode number, name) pairs into 16-byte directory records.
pub fn dir_block(entries: &[(u16, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(ino, name) in entries {
        assert!(name.len() <= 14);
        out.extend_from_slice(&ino.to_le_bytes());
        let mut field = [0u8; 14];
        field[..name.len()].copy_from_slice(name.as_bytes());
        out.extend_from_slice(&field);
    }
    out
}

/// Pack 4-byte little-endian block pointers into indirect-block content.
pub fn ptr_block(ptrs: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    for &ptr in ptrs {
        out.extend_from_slice(&ptr.to_le_bytes());
    }
    out
}

/// Deterministic content pattern for read checks.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u32).wrapping_mul(31).wrapping_add(seed as u32) as u8)
        .collect()
}
