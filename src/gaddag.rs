// Copyright (C) 2020-2026 Andy Kurnia.

use super::{build, error};

// A node is 32 bits, little-endian on disk:
// bits 0-21 = arc index, bit 22 = last sibling, bit 23 = accepts, bits 24-31 = tile.
#[derive(Clone, Copy)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & 0x800000 != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & 0x400000 != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> i32 {
        (self.0 & 0x3fffff) as i32
    }
}

/// Bidirectional word automaton. Node 0 is the DAWG root pseudo-node
/// (words read start to end), node 1 the GADDAG root pseudo-node (words
/// read outward from a split point: reversed prefix, marker, suffix).
/// Immutable once built; share freely across threads.
pub struct Gaddag(pub Box<[Node]>);

pub const DAWG_ROOT: i32 = 0;
pub const GADDAG_ROOT: i32 = 1;

/// The direction-switch marker tile.
pub const MARKER: u8 = 0;

impl std::ops::Index<i32> for Gaddag {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: i32) -> &Node {
        &self.0[i as usize]
    }
}

impl Gaddag {
    pub fn from_bytes_alloc(buf: &[u8]) -> Gaddag {
        let num_nodes = buf.len() / 4;
        let mut elts = Vec::with_capacity(num_nodes);
        let mut r = 0;
        for _ in 0..num_nodes {
            elts.push(Node(u32::from_le_bytes([
                buf[r],
                buf[r + 1],
                buf[r + 2],
                buf[r + 3],
            ])));
            r += 4;
        }
        Gaddag(elts.into_boxed_slice())
    }

    /// Build from an in-memory word list. Fails only on malformed input.
    pub fn from_word_list<'a, I: IntoIterator<Item = &'a str>>(words: I) -> error::Returns<Gaddag> {
        Ok(Self::from_bytes_alloc(&build::build_gaddag_bytes(
            &build::read_machine_words(words)?,
        )?))
    }

    /// Follow the edge labeled `tile` out of the node `p` points past.
    /// Negative return means no such transition: a dead search branch,
    /// not an error.
    #[inline(always)]
    pub fn seek(&self, mut p: i32, tile: u8) -> i32 {
        if p >= 0 {
            p = self[p].arc_index();
            if p > 0 {
                loop {
                    let node = self[p];
                    if node.tile() == tile {
                        return p;
                    }
                    if node.is_end() {
                        return -1;
                    }
                    p += 1;
                }
            }
        }
        -1
    }

    /// Whole-word membership via the DAWG root.
    pub fn accepts_word(&self, word: &[u8]) -> bool {
        let mut p = DAWG_ROOT;
        for &tile in word {
            p = self.seek(p, tile & 0x7f);
            if p <= 0 {
                return false;
            }
        }
        p > 0 && self[p].accepts()
    }
}
