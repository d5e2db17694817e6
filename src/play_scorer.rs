// Copyright (C) 2020-2026 Andy Kurnia.

use super::movegen;

/// Recounts plays from scratch, independently of the search's
/// incremental bookkeeping.
#[derive(Default)]
pub struct PlayScorer {
    word_buffer: Vec<u8>,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self::default()
    }

    // Assume play is well-formed for this board.
    pub fn compute_score(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
    ) -> i16 {
        let alphabet = board_snapshot.alphabet;
        let premiums = board_snapshot.board_layout.premiums();
        let dim = board_snapshot.board_layout.dim();
        let strider = dim.lane(play.down, play.lane);
        let mut num_played = 0;
        let mut recounted_score = 0;

        {
            let mut word_multiplier = 1;
            let mut word_score = 0i16;
            for (i, &tile) in (play.idx..).zip(play.word.iter()) {
                let strider_at_i = strider.at(i);
                let premium = premiums[strider_at_i];
                let tile_multiplier;
                let placed_tile = if tile != 0 {
                    num_played += 1;
                    word_multiplier *= premium.word_multiplier;
                    tile_multiplier = premium.tile_multiplier;
                    tile
                } else {
                    tile_multiplier = 1;
                    board_snapshot.board_tiles[strider_at_i]
                };
                word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
            }
            recounted_score += word_score * word_multiplier as i16;
        }

        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            if tile != 0 {
                let perpendicular_strider = dim.lane(!play.down, i);
                let mut j = play.lane;
                while j > 0 && board_snapshot.board_tiles[perpendicular_strider.at(j - 1)] != 0 {
                    j -= 1;
                }
                let perpendicular_strider_len = perpendicular_strider.len();
                if j == play.lane
                    && if j + 1 < perpendicular_strider_len {
                        board_snapshot.board_tiles[perpendicular_strider.at(j + 1)] == 0
                    } else {
                        true
                    }
                {
                    // no perpendicular tile
                    continue;
                }
                let mut word_multiplier = 1;
                let mut word_score = 0i16;
                for j in j..perpendicular_strider_len {
                    let perpendicular_strider_at_j = perpendicular_strider.at(j);
                    let premium = premiums[perpendicular_strider_at_j];
                    let tile_multiplier;
                    let placed_tile = if j == play.lane {
                        word_multiplier *= premium.word_multiplier;
                        tile_multiplier = premium.tile_multiplier;
                        tile
                    } else {
                        tile_multiplier = 1;
                        board_snapshot.board_tiles[perpendicular_strider_at_j]
                    };
                    if placed_tile == 0 {
                        break;
                    }
                    word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
                }
                recounted_score += word_score * word_multiplier as i16;
            }
        }

        if num_played >= movegen::RACK_SIZE as i16 {
            recounted_score += movegen::BINGO_BONUS;
        }
        recounted_score
    }

    /// Check the main word and every perpendicular word against the
    /// dictionary.
    pub fn words_are_valid(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
    ) -> bool {
        let dim = board_snapshot.board_layout.dim();
        let strider = dim.lane(play.down, play.lane);

        self.word_buffer.clear();
        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            self.word_buffer.push(if tile != 0 {
                tile & 0x7f
            } else {
                board_snapshot.board_tiles[strider.at(i)] & 0x7f
            });
        }
        if !board_snapshot.gaddag.accepts_word(&self.word_buffer) {
            return false;
        }

        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            if tile != 0 {
                let perpendicular_strider = dim.lane(!play.down, i);
                let mut j = play.lane;
                while j > 0 && board_snapshot.board_tiles[perpendicular_strider.at(j - 1)] != 0 {
                    j -= 1;
                }
                self.word_buffer.clear();
                for j in j..perpendicular_strider.len() {
                    let b = if j == play.lane {
                        tile
                    } else {
                        board_snapshot.board_tiles[perpendicular_strider.at(j)]
                    };
                    if b == 0 {
                        break;
                    }
                    self.word_buffer.push(b & 0x7f);
                }
                if self.word_buffer.len() > 1
                    && !board_snapshot.gaddag.accepts_word(&self.word_buffer)
                {
                    return false;
                }
            }
        }
        true
    }
}
