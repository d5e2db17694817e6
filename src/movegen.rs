// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, fash, gaddag, matrix};

pub const RACK_SIZE: usize = 7;
pub const BINGO_BONUS: i16 = 50;

/// Perpendicular constraint for one cell. bits == 0 means the cell has
/// no perpendicular neighbor (any letter goes, no hook score). Otherwise
/// bit 0 is set and bits 1..=26 mark the letters forming valid
/// perpendicular words; bits == 1 is an unplayable cell. score is the
/// face value of the perpendicular neighbors, blanks counting zero.
#[derive(Clone)]
pub struct CrossSet {
    pub bits: u64,
    pub score: i16,
}

pub struct BoardSnapshot<'a> {
    pub board_tiles: &'a [u8],
    pub alphabet: &'a alphabet::Alphabet<'a>,
    pub board_layout: &'a board_layout::BoardLayout<'a>,
    pub gaddag: &'a gaddag::Gaddag,
}

struct WorkingBuffer {
    rack_tally: Box<[u8]>,                       // 27 for ?A-Z
    word_buffer: Box<[u8]>,                      // max(r, c)
    cross_set_for_across_plays: Box<[CrossSet]>, // r*c
    cross_set_for_down_plays: Box<[CrossSet]>,   // c*r
    lane_anchors: Vec<i8>,
}

impl WorkingBuffer {
    fn new(board_snapshot: &BoardSnapshot<'_>) -> Self {
        let dim = board_snapshot.board_layout.dim();
        Self {
            rack_tally: vec![0u8; board_snapshot.alphabet.len() as usize].into_boxed_slice(),
            word_buffer: vec![0u8; std::cmp::max(dim.rows, dim.cols) as usize].into_boxed_slice(),
            cross_set_for_across_plays: vec![CrossSet { bits: 0, score: 0 }; dim.area()]
                .into_boxed_slice(),
            cross_set_for_down_plays: vec![CrossSet { bits: 0, score: 0 }; dim.area()]
                .into_boxed_slice(),
            lane_anchors: Vec::new(),
        }
    }
}

// One sweep computes the cross sets of every empty cell next to a tile
// run in this lane. The traversal accumulates the run bottom-up from
// the root, so reaching the cell above a run costs nothing extra.
fn gen_cross_set<'a>(
    board_snapshot: &'a BoardSnapshot<'a>,
    strider: matrix::Strider,
    cross_sets: &'a mut [CrossSet],
    output_strider: matrix::Strider,
) {
    let len = strider.len();
    for i in 0..output_strider.len() {
        cross_sets[output_strider.at(i)] = CrossSet { bits: 0, score: 0 };
    }

    let alphabet = board_snapshot.alphabet;
    let gdg = board_snapshot.gaddag;
    let mut p = gaddag::GADDAG_ROOT;
    let mut score = 0i16;
    let mut k = len;
    for j in (0..len).rev() {
        let b = board_snapshot.board_tiles[strider.at(j)];
        if b != 0 {
            // board has tile
            if p >= 0 {
                // include current tile
                p = gdg.seek(p, b & 0x7f);
            }
            score += alphabet.score(b) as i16;
            if j == 0 || board_snapshot.board_tiles[strider.at(j - 1)] == 0 {
                // there is a sequence of tiles from j inclusive to k exclusive
                if k < len && !(k + 1 < len && board_snapshot.board_tiles[strider.at(k + 1)] != 0) {
                    // board[k + 1] is empty, compute cross_set[k].
                    let mut bits = 1u64;
                    if p > 0 {
                        // p = DCBA
                        let q = gdg.seek(p, gaddag::MARKER);
                        if q > 0 {
                            // q = DCBA@
                            let mut q = gdg[q].arc_index();
                            if q > 0 {
                                loop {
                                    if gdg[q].accepts() {
                                        bits |= 1 << gdg[q].tile();
                                    }
                                    if gdg[q].is_end() {
                                        break;
                                    }
                                    q += 1;
                                }
                            }
                        }
                    }
                    cross_sets[output_strider.at(k)] = CrossSet { bits, score };
                }
                if j > 0 {
                    // board[j - 1] is known to be empty
                    let mut bits = 1u64;
                    if p > 0 {
                        // p = DCBA
                        p = gdg[p].arc_index(); // p = after DCBA
                        if p > 0 {
                            loop {
                                let tile = gdg[p].tile();
                                if tile != 0 {
                                    // not the direction marker
                                    let mut q = p;
                                    // board[j - 2] may or may not be empty.
                                    for k in (0..j - 1).rev() {
                                        let b = board_snapshot.board_tiles[strider.at(k)];
                                        if b == 0 {
                                            break;
                                        }
                                        q = gdg.seek(q, b & 0x7f);
                                        if q <= 0 {
                                            break;
                                        }
                                    }
                                    // the candidate letter is this arc's
                                    // tile, not wherever q stopped
                                    if q > 0 && gdg[q].accepts() {
                                        bits |= 1 << tile;
                                    }
                                }
                                if gdg[p].is_end() {
                                    break;
                                }
                                p += 1;
                            }
                        }
                    }
                    // score hasn't included the next batch.
                    for k in (0i8..j - 1).rev() {
                        let b = board_snapshot.board_tiles[strider.at(k)];
                        if b == 0 {
                            break;
                        }
                        score += alphabet.score(b) as i16;
                    }
                    cross_sets[output_strider.at(j - 1)] = CrossSet { bits, score };
                }
            }
        } else {
            // empty square, reset
            p = gaddag::GADDAG_ROOT; // cumulative traversal results
            score = 0; // cumulative face-value score
            k = j; // last seen empty square
        }
    }
}

/// Direct recomputation of one cell's cross set by dictionary lookup of
/// every candidate letter. Slower than the lane sweep but obviously
/// correct; the sweep is checked against it.
pub fn cross_constraint(board_snapshot: &BoardSnapshot<'_>, down: bool, lane: i8, idx: i8) -> CrossSet {
    let dim = board_snapshot.board_layout.dim();
    // perpendicular to the play direction
    let (perp_strider, perp_idx) = if down {
        (dim.across(idx), lane)
    } else {
        (dim.down(idx), lane)
    };
    if board_snapshot.board_tiles[perp_strider.at(perp_idx)] != 0 {
        return CrossSet { bits: 0, score: 0 };
    }
    let mut before = perp_idx;
    while before > 0 && board_snapshot.board_tiles[perp_strider.at(before - 1)] != 0 {
        before -= 1;
    }
    let mut after = perp_idx + 1;
    while after < perp_strider.len() && board_snapshot.board_tiles[perp_strider.at(after)] != 0 {
        after += 1;
    }
    if before == perp_idx && after == perp_idx + 1 {
        return CrossSet { bits: 0, score: 0 };
    }
    let mut word = Vec::with_capacity((after - before) as usize);
    let mut score = 0i16;
    for i in before..after {
        if i == perp_idx {
            word.push(0);
        } else {
            let b = board_snapshot.board_tiles[perp_strider.at(i)];
            word.push(b & 0x7f);
            score += board_snapshot.alphabet.score(b) as i16;
        }
    }
    let hole = (perp_idx - before) as usize;
    let mut bits = 1u64;
    for letter in 1..board_snapshot.alphabet.len() {
        word[hole] = letter;
        if board_snapshot.gaddag.accepts_word(&word) {
            bits |= 1 << letter;
        }
    }
    CrossSet { bits, score }
}

// word_buffer must have at least strider.len() length.
// anchors must be ascending; each play is found only from the leftmost
// anchor it covers, because extending left past the previous anchor is
// cut off.
fn gen_place_moves<'a, CallbackType: FnMut(i8, &[u8], i16)>(
    board_snapshot: &'a BoardSnapshot<'a>,
    cross_set_slice: &'a [CrossSet],
    rack_tally: &'a mut [u8],
    strider: matrix::Strider,
    word_buffer: &'a mut [u8],
    anchors: &[i8],
    single_tile_plays: bool,
    callback: CallbackType,
) {
    let len = strider.len();
    word_buffer
        .iter_mut()
        .take(len as usize)
        .for_each(|m| *m = 0);

    struct Env<'a, CallbackType: FnMut(i8, &[u8], i16)> {
        board_snapshot: &'a BoardSnapshot<'a>,
        cross_set_slice: &'a [CrossSet],
        rack_tally: &'a mut [u8],
        strider: matrix::Strider,
        callback: CallbackType,
        word_buffer: &'a mut [u8],
        anchor: i8,
        leftmost: i8,
        rightmost: i8,
        num_played: i8,
        idx_left: i8,
    }

    let mut env = Env {
        board_snapshot,
        cross_set_slice,
        rack_tally,
        strider,
        callback,
        word_buffer,
        anchor: 0,
        leftmost: 0,
        rightmost: len,
        num_played: 0,
        idx_left: 0,
    };

    fn record<CallbackType: FnMut(i8, &[u8], i16)>(
        env: &mut Env<CallbackType>,
        idx_left: i8,
        idx_right: i8,
        main_score: i16,
        perpendicular_score: i16,
        word_multiplier: i8,
    ) {
        let score = main_score * (word_multiplier as i16)
            + perpendicular_score
            + if env.num_played >= RACK_SIZE as i8 {
                BINGO_BONUS
            } else {
                0
            };
        (env.callback)(
            idx_left,
            &env.word_buffer[(idx_left as usize)..(idx_right as usize)],
            score,
        );
    }

    fn play_right<CallbackType: FnMut(i8, &[u8], i16)>(
        env: &mut Env<CallbackType>,
        mut idx: i8,
        mut p: i32,
        mut main_score: i16,
        perpendicular_score: i16,
        word_multiplier: i8,
        mut is_unique: bool,
    ) {
        // tail-recurse placing current sequence of tiles
        while idx < env.rightmost {
            let b = env.board_snapshot.board_tiles[env.strider.at(idx)];
            if b == 0 {
                break;
            }
            p = env.board_snapshot.gaddag.seek(p, b & 0x7f);
            if p <= 0 {
                return;
            }
            main_score += env.board_snapshot.alphabet.score(b) as i16;
            idx += 1;
        }
        if idx > env.anchor + 1
            && (env.num_played + is_unique as i8) >= 2
            && idx - env.idx_left >= 2
            && env.board_snapshot.gaddag[p].accepts()
        {
            record(
                env,
                env.idx_left,
                idx,
                main_score,
                perpendicular_score,
                word_multiplier,
            );
        }
        if idx >= env.rightmost {
            return;
        }

        p = env.board_snapshot.gaddag[p].arc_index();
        if p <= 0 {
            return;
        }
        let this_premium = env.board_snapshot.board_layout.premiums()[env.strider.at(idx)];
        let this_cross_set = env.cross_set_slice[idx as usize].clone();
        if this_cross_set.bits == 1 {
            // unplayable cell
            return;
        }
        let new_word_multiplier = word_multiplier * this_premium.word_multiplier;
        let this_cross_bits = if this_cross_set.bits != 0 {
            this_cross_set.bits
        } else {
            is_unique = true;
            !1
        };
        loop {
            let tile = env.board_snapshot.gaddag[p].tile();
            if tile != 0 && this_cross_bits & (1 << tile) != 0 {
                if env.rack_tally[tile as usize] > 0 {
                    env.rack_tally[tile as usize] -= 1;
                    env.num_played += 1;
                    let tile_value = (env.board_snapshot.alphabet.score(tile) as i16)
                        * (this_premium.tile_multiplier as i16);
                    env.word_buffer[idx as usize] = tile;
                    play_right(
                        env,
                        idx + 1,
                        p,
                        main_score + tile_value,
                        if this_cross_set.bits != 0 {
                            perpendicular_score
                                + (this_cross_set.score + tile_value)
                                    * (this_premium.word_multiplier as i16)
                        } else {
                            perpendicular_score
                        },
                        new_word_multiplier,
                        is_unique,
                    );
                    env.num_played -= 1;
                    env.rack_tally[tile as usize] += 1;
                }
                if env.rack_tally[0] > 0 {
                    env.rack_tally[0] -= 1;
                    env.num_played += 1;
                    // intentional to not hardcode blank tile value as zero
                    let tile_value = (env.board_snapshot.alphabet.score(0) as i16)
                        * (this_premium.tile_multiplier as i16);
                    env.word_buffer[idx as usize] = tile | 0x80;
                    play_right(
                        env,
                        idx + 1,
                        p,
                        main_score + tile_value,
                        if this_cross_set.bits != 0 {
                            perpendicular_score
                                + (this_cross_set.score + tile_value)
                                    * (this_premium.word_multiplier as i16)
                        } else {
                            perpendicular_score
                        },
                        new_word_multiplier,
                        is_unique,
                    );
                    env.num_played -= 1;
                    env.rack_tally[0] += 1;
                }
            }
            if env.board_snapshot.gaddag[p].is_end() {
                break;
            }
            p += 1;
        }
    }

    fn play_left<CallbackType: FnMut(i8, &[u8], i16)>(
        env: &mut Env<CallbackType>,
        mut idx: i8,
        mut p: i32,
        mut main_score: i16,
        perpendicular_score: i16,
        word_multiplier: i8,
        mut is_unique: bool,
    ) {
        // tail-recurse placing current sequence of tiles
        while idx >= env.leftmost {
            let b = env.board_snapshot.board_tiles[env.strider.at(idx)];
            if b == 0 {
                break;
            }
            p = env.board_snapshot.gaddag.seek(p, b & 0x7f);
            if p <= 0 {
                return;
            }
            main_score += env.board_snapshot.alphabet.score(b) as i16;
            idx -= 1;
        }
        if (env.num_played + is_unique as i8) >= 2
            && env.anchor - idx >= 2
            && env.board_snapshot.gaddag[p].accepts()
        {
            record(
                env,
                idx + 1,
                env.anchor + 1,
                main_score,
                perpendicular_score,
                word_multiplier,
            );
        }

        p = env.board_snapshot.gaddag[p].arc_index();
        if p <= 0 {
            return;
        }
        let mut this_premium = board_layout::Premium {
            word_multiplier: 0,
            tile_multiplier: 0,
        };
        let mut this_cross_set = CrossSet { bits: 0, score: 0 };
        if idx >= env.leftmost {
            this_premium = env.board_snapshot.board_layout.premiums()[env.strider.at(idx)];
            this_cross_set = env.cross_set_slice[idx as usize].clone();
        }
        let new_word_multiplier = word_multiplier * this_premium.word_multiplier;
        let this_cross_bits = if this_cross_set.bits != 0 {
            this_cross_set.bits
        } else {
            is_unique = true;
            !1
        };
        loop {
            let tile = env.board_snapshot.gaddag[p].tile();
            if tile == 0 {
                // direction marker: the word starts here, continue
                // rightward from just past the anchor
                env.idx_left = idx + 1;
                play_right(
                    env,
                    env.anchor + 1,
                    p,
                    main_score,
                    perpendicular_score,
                    word_multiplier,
                    is_unique,
                );
            } else if idx >= env.leftmost && this_cross_bits & (1 << tile) != 0 {
                if env.rack_tally[tile as usize] > 0 {
                    env.rack_tally[tile as usize] -= 1;
                    env.num_played += 1;
                    let tile_value = (env.board_snapshot.alphabet.score(tile) as i16)
                        * (this_premium.tile_multiplier as i16);
                    env.word_buffer[idx as usize] = tile;
                    play_left(
                        env,
                        idx - 1,
                        p,
                        main_score + tile_value,
                        if this_cross_set.bits != 0 {
                            perpendicular_score
                                + (this_cross_set.score + tile_value)
                                    * (this_premium.word_multiplier as i16)
                        } else {
                            perpendicular_score
                        },
                        new_word_multiplier,
                        is_unique,
                    );
                    env.num_played -= 1;
                    env.rack_tally[tile as usize] += 1;
                }
                if env.rack_tally[0] > 0 {
                    env.rack_tally[0] -= 1;
                    env.num_played += 1;
                    // intentional to not hardcode blank tile value as zero
                    let tile_value = (env.board_snapshot.alphabet.score(0) as i16)
                        * (this_premium.tile_multiplier as i16);
                    env.word_buffer[idx as usize] = tile | 0x80;
                    play_left(
                        env,
                        idx - 1,
                        p,
                        main_score + tile_value,
                        if this_cross_set.bits != 0 {
                            perpendicular_score
                                + (this_cross_set.score + tile_value)
                                    * (this_premium.word_multiplier as i16)
                        } else {
                            perpendicular_score
                        },
                        new_word_multiplier,
                        is_unique,
                    );
                    env.num_played -= 1;
                    env.rack_tally[0] += 1;
                }
            }
            if env.board_snapshot.gaddag[p].is_end() {
                break;
            }
            p += 1;
        }
    }

    let mut left_bound = 0;
    for &anchor in anchors {
        if cross_set_slice[anchor as usize].bits != 1 {
            env.anchor = anchor;
            env.leftmost = left_bound;
            env.rightmost = len;
            env.num_played = 0;
            play_left(
                &mut env,
                anchor,
                gaddag::GADDAG_ROOT,
                0,
                0,
                1,
                single_tile_plays,
            );
        }
        left_bound = anchor + 1;
    }
}

/// One placement. `word` spans the full main word; 0 marks a
/// played-through board tile, 0x80 flags a blank.
#[derive(Clone, Eq, PartialEq)]
pub struct Play {
    pub down: bool,
    pub lane: i8,
    pub idx: i8,
    pub word: Box<[u8]>,
    pub score: i16,
}

/// Reusable generator. `plays` holds the ranked top plays after a call
/// to gen_moves_alloc; `total_plays` counts everything found before
/// truncation.
#[derive(Default)]
pub struct MoveGenerator {
    pub plays: Vec<Play>,
    pub total_plays: usize,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gen_moves_alloc(
        &mut self,
        board_snapshot: &BoardSnapshot<'_>,
        rack: &[u8],
        max_gen: usize,
    ) {
        self.plays.clear();
        let board_layout = board_snapshot.board_layout;
        let dim = board_layout.dim();
        let mut working_buffer = WorkingBuffer::new(board_snapshot);
        for &tile in rack {
            working_buffer.rack_tally[tile as usize] += 1;
        }
        let board_is_empty = board::is_empty(board_snapshot.board_tiles);

        // Two placements landing the same letters on the same cells are
        // the same play even when a blank stands in for a letter
        // elsewhere in the word; keep the higher-scoring one. Natural
        // tiles are tried before the blank, so ties keep the natural
        // placement.
        let mut dedup =
            fash::MyHashMap::<(bool, i8, i8, Box<[u8]>), usize>::default();
        let mut plays = std::mem::take(&mut self.plays);
        {
            let mut found_place_move = |down: bool, lane: i8, idx: i8, word: &[u8], score: i16| {
                let key = (
                    down,
                    lane,
                    idx,
                    word.iter().map(|&t| t & 0x7f).collect::<Box<[u8]>>(),
                );
                use std::collections::hash_map::Entry::{Occupied, Vacant};
                match dedup.entry(key) {
                    Occupied(entry) => {
                        let found = &mut plays[*entry.get()];
                        if score > found.score {
                            *found = Play {
                                down,
                                lane,
                                idx,
                                word: word.into(),
                                score,
                            };
                        }
                    }
                    Vacant(entry) => {
                        entry.insert(plays.len());
                        plays.push(Play {
                            down,
                            lane,
                            idx,
                            word: word.into(),
                            score,
                        });
                    }
                }
            };

            // striped by row
            for col in 0..dim.cols {
                gen_cross_set(
                    board_snapshot,
                    dim.down(col),
                    &mut working_buffer.cross_set_for_across_plays,
                    matrix::Strider {
                        base: col as i16,
                        step: dim.cols,
                        len: dim.rows,
                    },
                );
            }
            for row in 0..dim.rows {
                if board_is_empty {
                    // the opening play is horizontal through the star
                    if row != board_layout.star_row() {
                        continue;
                    }
                    working_buffer.lane_anchors.clear();
                    working_buffer.lane_anchors.push(board_layout.star_col());
                } else {
                    board::lane_anchors(
                        board_snapshot.board_tiles,
                        dim,
                        false,
                        row,
                        &mut working_buffer.lane_anchors,
                    );
                }
                let cross_set_start = ((row as isize) * (dim.cols as isize)) as usize;
                gen_place_moves(
                    board_snapshot,
                    &working_buffer.cross_set_for_across_plays
                        [cross_set_start..cross_set_start + (dim.cols as usize)],
                    &mut working_buffer.rack_tally,
                    dim.across(row),
                    &mut working_buffer.word_buffer,
                    &working_buffer.lane_anchors,
                    true,
                    |idx: i8, word: &[u8], score: i16| {
                        found_place_move(false, row, idx, word, score)
                    },
                );
            }
            if !board_is_empty {
                // striped by columns for better cache locality
                for row in 0..dim.rows {
                    gen_cross_set(
                        board_snapshot,
                        dim.across(row),
                        &mut working_buffer.cross_set_for_down_plays,
                        matrix::Strider {
                            base: row as i16,
                            step: dim.rows,
                            len: dim.cols,
                        },
                    );
                }
                for col in 0..dim.cols {
                    board::lane_anchors(
                        board_snapshot.board_tiles,
                        dim,
                        true,
                        col,
                        &mut working_buffer.lane_anchors,
                    );
                    let cross_set_start = ((col as isize) * (dim.rows as isize)) as usize;
                    gen_place_moves(
                        board_snapshot,
                        &working_buffer.cross_set_for_down_plays
                            [cross_set_start..cross_set_start + (dim.rows as usize)],
                        &mut working_buffer.rack_tally,
                        dim.down(col),
                        &mut working_buffer.word_buffer,
                        &working_buffer.lane_anchors,
                        false,
                        |idx: i8, word: &[u8], score: i16| {
                            found_place_move(true, col, idx, word, score)
                        },
                    );
                }
            }
        }

        self.total_plays = plays.len();
        plays.sort_unstable_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.word.cmp(&b.word))
                .then_with(|| a.down.cmp(&b.down))
                .then_with(|| a.lane.cmp(&b.lane))
                .then_with(|| a.idx.cmp(&b.idx))
        });
        plays.truncate(max_gen);
        self.plays = plays;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet::ENGLISH_ALPHABET, board_layout::COMMON_BOARD_LAYOUT};

    fn snapshot_board(words: &[&str], rows: &[(i8, i8, &str, bool)]) -> (gaddag::Gaddag, Vec<u8>) {
        let gdg = gaddag::Gaddag::from_word_list(words.iter().copied()).unwrap();
        let dim = COMMON_BOARD_LAYOUT.dim();
        let mut board_tiles = vec![0u8; dim.area()];
        for &(row, col, word, down) in rows {
            for (i, c) in word.chars().enumerate() {
                let tile = ENGLISH_ALPHABET.board_tile(c).unwrap();
                let at = if down {
                    dim.at_row_col(row + i as i8, col)
                } else {
                    dim.at_row_col(row, col + i as i8)
                };
                board_tiles[at] = tile;
            }
        }
        (gdg, board_tiles)
    }

    fn rack(s: &str) -> Vec<u8> {
        s.chars()
            .map(|c| ENGLISH_ALPHABET.rack_tile(c).unwrap())
            .collect()
    }

    #[test]
    fn sweep_matches_single_cell_recomputation() {
        let (gdg, board_tiles) = snapshot_board(
            &["HELLO", "SHE", "HE", "EH", "OH", "HOE", "LO"],
            &[(7, 5, "HELLO", false), (4, 7, "LO", true)],
        );
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let dim = COMMON_BOARD_LAYOUT.dim();
        let mut cross_sets = vec![CrossSet { bits: 0, score: 0 }; dim.area()];
        for col in 0..dim.cols {
            gen_cross_set(
                board_snapshot,
                dim.down(col),
                &mut cross_sets,
                matrix::Strider {
                    base: col as i16,
                    step: dim.cols,
                    len: dim.rows,
                },
            );
        }
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                if board_tiles[dim.at_row_col(row, col)] != 0 {
                    continue;
                }
                let direct = cross_constraint(board_snapshot, false, row, col);
                let swept = &cross_sets[dim.at_row_col(row, col)];
                assert_eq!(
                    swept.bits, direct.bits,
                    "bits mismatch at ({row}, {col})"
                );
                assert_eq!(
                    swept.score, direct.score,
                    "score mismatch at ({row}, {col})"
                );
            }
        }
    }

    // A cell with tile runs on both sides must only admit letters that
    // make the whole sandwiched word.
    #[test]
    fn sandwiched_cell_checks_the_joined_word() {
        let (gdg, board_tiles) = snapshot_board(
            &["HELLO", "LOT", "TOT", "HELLOTLOT"],
            &[(5, 7, "HELLO", true), (11, 7, "LOT", true)],
        );
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let cs = cross_constraint(board_snapshot, false, 10, 7);
        // only T joins HELLO and LOT into a word
        assert_eq!(cs.bits, 1 | (1 << 20));
        // H4 E1 L1 L1 O1 + L1 O1 T1
        assert_eq!(cs.score, 11);
        let dim = COMMON_BOARD_LAYOUT.dim();
        let mut cross_sets = vec![CrossSet { bits: 0, score: 0 }; dim.area()];
        gen_cross_set(
            board_snapshot,
            dim.down(7),
            &mut cross_sets,
            matrix::Strider {
                base: 7,
                step: dim.cols,
                len: dim.rows,
            },
        );
        let swept = &cross_sets[dim.at_row_col(10, 7)];
        assert_eq!(swept.bits, cs.bits);
        assert_eq!(swept.score, cs.score);
    }

    #[test]
    fn unconstrained_and_unplayable_cells() {
        let (gdg, board_tiles) =
            snapshot_board(&["QI"], &[(7, 7, "Q", false)]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        // far away: no neighbor at all
        let free = cross_constraint(board_snapshot, false, 0, 0);
        assert_eq!(free.bits, 0);
        assert_eq!(free.score, 0);
        // directly below the Q (for across plays): only I hooks
        let below = cross_constraint(board_snapshot, false, 8, 7);
        assert_eq!(below.bits, 1 | (1 << 9));
        assert_eq!(below.score, 10);
        // directly above the Q: nothing makes a word ending in Q
        let above = cross_constraint(board_snapshot, false, 6, 7);
        assert_eq!(above.bits, 1);
    }

    // A cell whose cross set is the bare sentinel admits no letter;
    // no returned play may put a new tile there.
    #[test]
    fn new_tiles_avoid_unplayable_cells() {
        let (gdg, board_tiles) = snapshot_board(&["QI"], &[(7, 7, "Q", false)]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let dim = COMMON_BOARD_LAYOUT.dim();
        assert_eq!(cross_constraint(board_snapshot, false, 6, 7).bits, 1);
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("AI"), 1000);
        assert!(!move_generator.plays.is_empty());
        for play in &move_generator.plays {
            let strider = dim.lane(play.down, play.lane);
            for (i, &tile) in (play.idx..).zip(play.word.iter()) {
                if tile != 0 {
                    let cs = cross_constraint(board_snapshot, play.down, play.lane, i);
                    assert_ne!(cs.bits, 1, "new tile on an unplayable cell");
                    // nothing ends in Q, so the cell above it stays bare
                    assert_ne!(strider.at(i), dim.at_row_col(6, 7));
                }
            }
        }
    }

    #[test]
    fn opening_play_is_across_through_the_star() {
        let (gdg, board_tiles) = snapshot_board(&["CAT", "AT", "TA"], &[]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("CAT"), 100);
        assert!(!move_generator.plays.is_empty());
        for play in &move_generator.plays {
            assert!(!play.down);
            assert_eq!(play.lane, 7);
            // covers the star
            assert!(play.idx <= 7 && play.idx + play.word.len() as i8 > 7);
            // no play-through tiles on an empty board
            assert!(play.word.iter().all(|&t| t != 0));
        }
        // CAT through the star doubles: 3+1+1 = 5, x2 = 10
        let best = &move_generator.plays[0];
        assert_eq!(best.score, 10);
        assert_eq!(move_generator.plays.iter().filter(|p| p.score == 10).count(), 3);
        // AT and TA score 2x2 = 4
        assert!(move_generator.plays.iter().any(|p| p.score == 4));
    }

    #[test]
    fn extends_board_words_in_both_directions() {
        let (gdg, board_tiles) = snapshot_board(
            &["CAT", "CATS", "SCAT", "SCATS"],
            &[(7, 6, "CAT", false)],
        );
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("SS"), 100);
        let words: Vec<String> = move_generator
            .plays
            .iter()
            .map(|p| spelled(board_snapshot, p))
            .collect();
        assert!(words.contains(&"CATS".to_string()), "{words:?}");
        assert!(words.contains(&"SCAT".to_string()), "{words:?}");
        assert!(words.contains(&"SCATS".to_string()), "{words:?}");
        // the bare board word is not a play
        assert!(!words.contains(&"CAT".to_string()), "{words:?}");
    }

    fn spelled(board_snapshot: &BoardSnapshot<'_>, play: &Play) -> String {
        let dim = board_snapshot.board_layout.dim();
        let strider = dim.lane(play.down, play.lane);
        let mut s = String::new();
        for (i, &t) in play.word.iter().enumerate() {
            let t = if t == 0 {
                board_snapshot.board_tiles[strider.at(play.idx + i as i8)]
            } else {
                t
            };
            s.push_str(board_snapshot.alphabet.from_board(t).unwrap());
        }
        s.to_ascii_uppercase()
    }

    #[test]
    fn no_duplicate_plays() {
        let (gdg, board_tiles) = snapshot_board(
            &["ERS", "ER", "RE", "RES", "SER"],
            &[(7, 6, "ER", false)],
        );
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("S?"), 1000);
        let mut seen = std::collections::HashSet::new();
        for play in &move_generator.plays {
            let key = (
                play.down,
                play.lane,
                play.idx,
                play.word.iter().map(|&t| t & 0x7f).collect::<Vec<_>>(),
            );
            assert!(seen.insert(key), "duplicate placement");
        }
        assert_eq!(move_generator.total_plays, move_generator.plays.len());
    }

    #[test]
    fn blank_duplicate_keeps_the_natural_tile_score() {
        // rack has both a real S and a blank; ERS must score with the
        // real S (the blank-as-S version of the same cells is a
        // duplicate that scores less)
        let (gdg, board_tiles) =
            snapshot_board(&["ERS"], &[(7, 6, "ER", false)]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("S?"), 1000);
        let ers: Vec<&Play> = move_generator
            .plays
            .iter()
            .filter(|p| !p.down && p.lane == 7 && p.idx == 6)
            .collect();
        assert_eq!(ers.len(), 1);
        assert_eq!(ers[0].word[2], 19); // natural S, not 0x80 | 19
    }

    #[test]
    fn bingo_bonus_applies_at_seven_tiles() {
        let (gdg, board_tiles) =
            snapshot_board(&["RETAINS", "IN"], &[(6, 10, "I", false)]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet: &ENGLISH_ALPHABET,
            board_layout: &COMMON_BOARD_LAYOUT,
            gaddag: &gdg,
        };
        let mut move_generator = MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack("RETAINS"), 1000);
        let bingo = move_generator
            .plays
            .iter()
            .find(|p| p.word.len() == 7)
            .expect("seven-tile play");
        assert!(bingo.score >= BINGO_BONUS);
    }
}
