// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, fash};
use error::Error;

// An arc whose child set is not yet final.
struct PendingArc {
    tile: u8,
    accepts: bool,
    arc_index: u32, // Refers to interned nodes.
}

struct ArcStack<'a> {
    arcs: &'a mut Vec<PendingArc>,
    indexes: &'a mut Vec<usize>,
}

impl ArcStack<'_> {
    fn push(&mut self, tile: u8) {
        self.arcs.push(PendingArc {
            tile,
            accepts: false,
            arc_index: 0, // Filled up later.
        });
        self.indexes.push(self.arcs.len());
    }

    fn pop(&mut self, interner: &mut NodeInterner) {
        let start_of_batch = self.indexes.pop().unwrap();
        let new_arc_index = interner.intern(&self.arcs[start_of_batch..]);
        self.arcs[start_of_batch - 1].arc_index = new_arc_index;
        self.arcs.truncate(start_of_batch);
    }
}

// Interned nodes. Siblings are chained through next_index.
#[derive(Clone, Eq, Hash, PartialEq)]
struct InternedNode {
    tile: u8,
    accepts: bool,
    arc_index: u32,  // Refers to interned nodes.
    next_index: u32, // Refers to interned nodes.
}

struct NodeInterner<'a> {
    nodes: &'a mut Vec<InternedNode>,
    finder: &'a mut fash::MyHashMap<InternedNode, u32>,
}

impl NodeInterner<'_> {
    fn intern(&mut self, pending_arcs: &[PendingArc]) -> u32 {
        let mut ret = 0;
        for pending_arc in pending_arcs.iter().rev() {
            let node = InternedNode {
                tile: pending_arc.tile,
                accepts: pending_arc.accepts,
                arc_index: pending_arc.arc_index,
                next_index: ret,
            };
            use std::collections::hash_map::Entry::{Occupied, Vacant};
            match self.finder.entry(node) {
                Occupied(entry) => {
                    ret = *entry.get();
                }
                Vacant(entry) => {
                    ret = self.nodes.len() as u32;
                    self.nodes.push(entry.key().clone());
                    entry.insert(ret);
                }
            }
        }
        ret
    }

    // Entries must be sorted and deduplicated. In the second phase each
    // marker-terminated entry's marker arc is pointed into the first
    // phase's structure, at the node reached by reading the prefix
    // forward, so the two directions share one suffix structure.
    fn make_dawg(
        &mut self,
        sorted_entries: &[Box<[u8]>],
        dawg_start_node: u32,
        is_gaddag_phase: bool,
    ) -> u32 {
        let mut arc_stack = ArcStack {
            arcs: &mut Vec::new(),
            indexes: &mut Vec::new(),
        };
        for entry_index in 0..sorted_entries.len() {
            let this_entry = &sorted_entries[entry_index];
            let this_entry_len = this_entry.len();
            let mut prefix_len = 0;
            if entry_index > 0 {
                let prev_entry = &sorted_entries[entry_index - 1];
                // this can be one less than prev_entry.len() for a
                // marker-terminated entry
                let prev_entry_len = arc_stack.indexes.len();
                let min_entry_len = std::cmp::min(this_entry_len, prev_entry_len);
                while prefix_len < min_entry_len && prev_entry[prefix_len] == this_entry[prefix_len]
                {
                    prefix_len += 1;
                }
                for _ in prefix_len..prev_entry_len {
                    arc_stack.pop(self);
                }
            }
            for &tile in &this_entry[prefix_len..this_entry_len] {
                arc_stack.push(tile);
            }
            let arcs_len = arc_stack.arcs.len();
            if is_gaddag_phase && this_entry[this_entry_len - 1] == 0 {
                arc_stack.indexes.pop().unwrap();
                // "AC@" points at the node "CA" reaches forward
                let mut p = dawg_start_node;
                for &sought_tile in this_entry[0..this_entry_len - 1].iter().rev() {
                    loop {
                        if self.nodes[p as usize].tile == sought_tile {
                            p = self.nodes[p as usize].arc_index;
                            break;
                        }
                        p = self.nodes[p as usize].next_index;
                    }
                }
                arc_stack.arcs[arcs_len - 1].arc_index = p;
            } else {
                arc_stack.arcs[arcs_len - 1].accepts = true;
            }
        }
        for _ in 0..arc_stack.indexes.len() {
            arc_stack.pop(self);
        }
        self.intern(&arc_stack.arcs[..])
    }
}

// CARE = ERAC, RAC@, AC@, C@
fn gen_split_entries(machine_words: &[Box<[u8]>]) -> Box<[Box<[u8]>]> {
    let mut split_entry_set = fash::MyHashSet::<Box<[u8]>>::default();
    let mut reverse_buffer = Vec::new();
    for this_word in machine_words {
        reverse_buffer.clear();
        reverse_buffer.extend_from_slice(this_word);
        reverse_buffer.reverse();
        split_entry_set.insert(reverse_buffer.clone().into_boxed_slice());
        reverse_buffer.push(0); // the '@'
        for drow_prefix_len in 1..this_word.len() {
            split_entry_set.insert(reverse_buffer[drow_prefix_len..].into());
        }
    }
    drop(reverse_buffer);
    let mut split_entries = split_entry_set.into_iter().collect::<Box<_>>();
    split_entries.sort();
    split_entries
}

// zero-cost type-safety
struct IsEnd(bool);
struct Accepts(bool);

struct NodeDefragger<'a> {
    nodes: &'a [InternedNode],
    prev_indexes: &'a [u32],
    destination: &'a mut Vec<u32>,
    num_written: u32,
}

impl NodeDefragger<'_> {
    fn defrag(&mut self, mut p: u32) {
        loop {
            let prev = self.prev_indexes[p as usize];
            if prev == 0 {
                break;
            }
            p = prev;
        }
        if self.destination[p as usize] != 0 {
            return;
        }
        // temp value to break self-cycles.
        self.destination[p as usize] = !0;
        let mut write_p = p;
        let mut num = 0u32;
        loop {
            num += 1;
            let a = self.nodes[p as usize].arc_index;
            if a != 0 {
                self.defrag(a);
            }
            p = self.nodes[p as usize].next_index;
            if p == 0 {
                break;
            }
        }
        for ofs in 0..num {
            self.destination[write_p as usize] = self.num_written + ofs;
            write_p = self.nodes[write_p as usize].next_index;
        }
        // Always += num even if some nodes are necessarily duplicated
        // due to sharing by different prev_nodes.
        self.num_written += num;
    }

    // encoding: little endian of
    // bits 0-21 = arc index
    // bit 22 = last sibling
    // bit 23 = accepts
    // bits 24-31 = tile
    fn write_node(&self, out: &mut [u8], arc_index: u32, is_end: IsEnd, accepts: Accepts, tile: u8) {
        let defragged_arc_index = self.destination[arc_index as usize];
        out[0] = defragged_arc_index as u8;
        out[1] = (defragged_arc_index >> 8) as u8;
        out[2] = ((defragged_arc_index >> 16) & 0x3f
            | if is_end.0 { 0x40 } else { 0 }
            | if accepts.0 { 0x80 } else { 0 }) as u8;
        out[3] = tile;
    }

    fn to_vec(&self, dawg_start_node: u32, gaddag_start_node: u32) -> Vec<u8> {
        let mut ret = vec![0; (self.num_written as usize) << 2];
        self.write_node(&mut ret[0..], dawg_start_node, IsEnd(true), Accepts(false), 0);
        self.write_node(
            &mut ret[4..],
            gaddag_start_node,
            IsEnd(true),
            Accepts(false),
            0,
        );
        for mut p in 1..self.nodes.len() {
            if self.prev_indexes[p] != 0 {
                continue;
            }
            let mut dp = self.destination[p] as usize;
            if dp == 0 {
                continue;
            }
            dp <<= 2;
            loop {
                let np = self.nodes[p].next_index;
                self.write_node(
                    &mut ret[dp..],
                    self.nodes[p].arc_index,
                    IsEnd(np == 0),
                    Accepts(self.nodes[p].accepts),
                    self.nodes[p].tile,
                );
                if np == 0 {
                    break;
                }
                p = np as usize;
                dp += 4;
            }
        }
        ret
    }
}

fn gen_prev_indexes(nodes: &[InternedNode]) -> Vec<u32> {
    let nodes_len = nodes.len();
    let mut prev_indexes = vec![0u32; nodes_len];
    for p in (1..nodes_len).rev() {
        prev_indexes[nodes[p].next_index as usize] = p as u32;
    }
    // prev_indexes[0] is garbage, does not matter.

    prev_indexes
}

/// Validate and encode a word list into sorted, deduplicated machine
/// words (1..=26 per letter). Case-insensitive; anything outside A-Z,
/// or an empty word, is an error.
pub fn read_machine_words<'a, I: IntoIterator<Item = &'a str>>(
    words: I,
) -> error::Returns<Box<[Box<[u8]>]>> {
    let mut machine_words = Vec::new();
    let mut v = Vec::new();
    for word in words {
        v.clear();
        for c in word.chars() {
            if c.is_ascii_alphabetic() {
                v.push((c as u8) & 0x1f);
            } else {
                return Err(Error::Build(format!("invalid character in word: {word:?}")));
            }
        }
        if v.is_empty() {
            return Err(Error::Build("empty word in word list".into()));
        }
        machine_words.push(v[..].into());
    }
    machine_words.sort_unstable();
    machine_words.dedup();
    Ok(machine_words.into_boxed_slice())
}

/// Compile sorted machine words into the node image: a forward
/// structure rooted at node 0 and a split-entry structure rooted at
/// node 1 sharing its suffixes.
pub fn build_gaddag_bytes(machine_words: &[Box<[u8]>]) -> error::Returns<Vec<u8>> {
    // The sink node always exists.
    let mut nodes = vec![InternedNode {
        tile: 0,
        accepts: false,
        arc_index: 0,
        next_index: 0,
    }];

    let mut finder = fash::MyHashMap::default();
    finder.insert(nodes[0].clone(), 0);

    let mut interner = NodeInterner {
        nodes: &mut nodes,
        finder: &mut finder,
    };
    let dawg_start_node = interner.make_dawg(machine_words, 0, false);
    let gaddag_start_node =
        interner.make_dawg(&gen_split_entries(machine_words), dawg_start_node, true);

    let mut defragger = NodeDefragger {
        nodes: &nodes,
        prev_indexes: &gen_prev_indexes(&nodes),
        destination: &mut vec![0u32; nodes.len()],
        num_written: 2, // Convention: [0] points to dawg, [1] to gaddag.
    };
    defragger.destination[0] = !0; // useful for empty lexicon
    defragger.defrag(dawg_start_node);
    defragger.defrag(gaddag_start_node);
    defragger.destination[0] = 0; // useful for empty lexicon

    if defragger.num_written > 0x400000 {
        // the format can only have 0x400000 nodes, each has 4 bytes
        return Err(Error::Build(format!(
            "this format cannot have {} nodes",
            defragger.num_written
        )));
    }

    Ok(defragger.to_vec(dawg_start_node, gaddag_start_node))
}
