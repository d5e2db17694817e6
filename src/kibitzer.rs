// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, error, gaddag, movegen};
use error::Error;

// rack: string, '?' for the blank.
// board: 15x15 grid of cell strings. "" for empty, "A" for a natural
// tile, "a" for a blank playing as A.
// topN: maximum number of moves returned; anything below 1 means 10.
// (note: equal moves tie-break on word, then axis, lane, index.)
#[derive(serde::Deserialize, Debug)]
pub struct MoveRequest {
    pub rack: String,
    pub board: Vec<Vec<String>>,
    #[serde(rename = "topN", default)]
    pub top_n: i32,
}

pub const DEFAULT_TOP_N: usize = 10;

#[derive(serde::Serialize, Debug)]
pub struct PlacedTile {
    pub row: i8,
    pub col: i8,
    pub letter: String,
    #[serde(rename = "isNew")]
    pub is_new: bool,
    #[serde(rename = "isBlank")]
    pub is_blank: bool,
}

#[derive(serde::Serialize, Debug)]
pub struct JsonMove {
    pub position: String,
    pub word: String,
    pub score: i16,
    pub leave: String,
    pub tiles: Vec<PlacedTile>,
}

#[derive(serde::Serialize, Debug)]
pub struct MoveReply {
    pub moves: Vec<JsonMove>,
    pub total: usize,
}

/// "8d" for across row 8 starting at column d, "d8" for down column d
/// starting at row 8.
pub fn coordinate(down: bool, lane: i8, idx: i8) -> String {
    if down {
        format!("{}{}", ((lane as u8) + 0x61) as char, idx + 1)
    } else {
        format!("{}{}", lane + 1, ((idx as u8) + 0x61) as char)
    }
}

pub fn parse_rack(alphabet: &alphabet::Alphabet<'_>, rack: &str) -> error::Returns<Vec<u8>> {
    let mut tiles = Vec::with_capacity(rack.len());
    for c in rack.chars() {
        match alphabet.rack_tile(c.to_ascii_uppercase()) {
            Some(tile) => tiles.push(tile),
            None => {
                return Err(Error::Input(format!("rack has invalid tile {c:?}")));
            }
        }
    }
    Ok(tiles)
}

// You cannot hold three blanks; the rack and the board together cannot
// exceed the tile distribution.
fn validate_distribution(
    alphabet: &alphabet::Alphabet<'_>,
    rack: &[u8],
    board_tiles: &[u8],
) -> error::Returns<()> {
    let mut available_tally = (0..alphabet.len())
        .map(|tile| alphabet.freq(tile))
        .collect::<Box<_>>();
    let mut use_tile = |tile: u8| -> error::Returns<()> {
        if available_tally[tile as usize] > 0 {
            available_tally[tile as usize] -= 1;
            Ok(())
        } else {
            Err(Error::Input(format!(
                "too many tile {} (distribution has only {})",
                alphabet.from_rack(tile).unwrap_or("?"),
                alphabet.freq(tile),
            )))
        }
    };
    for &tile in rack {
        use_tile(tile)?;
    }
    for &tile in board_tiles {
        if tile != 0 {
            use_tile(if tile & 0x80 != 0 { 0 } else { tile })?;
        }
    }
    Ok(())
}

fn leave_string(alphabet: &alphabet::Alphabet<'_>, rack: &[u8], play: &movegen::Play) -> String {
    let mut rack_tally = vec![0u8; alphabet.len() as usize];
    for &tile in rack {
        rack_tally[tile as usize] += 1;
    }
    for &tile in play.word.iter() {
        if tile & 0x80 != 0 {
            rack_tally[0] -= 1;
        } else if tile != 0 {
            rack_tally[tile as usize] -= 1;
        }
    }
    let mut s = String::new();
    for (tile, &count) in (0u8..).zip(rack_tally.iter()) {
        for _ in 0..count {
            s.push_str(alphabet.from_rack(tile).unwrap());
        }
    }
    s
}

/// A loaded dictionary plus the fixed English board, ready to answer
/// move requests. Cheap to share by reference; the automaton is
/// immutable.
pub struct Engine {
    gaddag: gaddag::Gaddag,
}

impl Engine {
    pub fn from_gaddag(gaddag: gaddag::Gaddag) -> Self {
        Self { gaddag }
    }

    pub fn from_word_list<'a, I: IntoIterator<Item = &'a str>>(words: I) -> error::Returns<Self> {
        Ok(Self::from_gaddag(gaddag::Gaddag::from_word_list(words)?))
    }

    #[inline(always)]
    pub fn gaddag(&self) -> &gaddag::Gaddag {
        &self.gaddag
    }

    pub fn generate(&self, request: &MoveRequest) -> error::Returns<MoveReply> {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let board_layout = &board_layout::COMMON_BOARD_LAYOUT;
        let dim = board_layout.dim();

        let rack = parse_rack(alphabet, &request.rack)?;
        if rack.len() > movegen::RACK_SIZE {
            return Err(Error::Input(format!(
                "rack has {} tiles, maximum is {}",
                rack.len(),
                movegen::RACK_SIZE
            )));
        }
        let board_tiles = board::from_cells(alphabet, dim, &request.board)?;
        validate_distribution(alphabet, &rack, &board_tiles)?;

        let max_gen = if request.top_n < 1 {
            DEFAULT_TOP_N
        } else {
            request.top_n as usize
        };

        let board_snapshot = &movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet,
            board_layout,
            gaddag: &self.gaddag,
        };
        let mut move_generator = movegen::MoveGenerator::new();
        move_generator.gen_moves_alloc(board_snapshot, &rack, max_gen);

        let moves = move_generator
            .plays
            .iter()
            .map(|play| {
                let strider = dim.lane(play.down, play.lane);
                let mut word = String::with_capacity(play.word.len());
                let mut tiles = Vec::with_capacity(play.word.len());
                for (i, &tile) in (play.idx..).zip(play.word.iter()) {
                    let is_new = tile != 0;
                    let shown = if is_new {
                        tile
                    } else {
                        board_snapshot.board_tiles[strider.at(i)]
                    };
                    let letter = alphabet.from_board(shown).unwrap();
                    word.push_str(letter);
                    let (row, col) = if play.down {
                        (i, play.lane)
                    } else {
                        (play.lane, i)
                    };
                    tiles.push(PlacedTile {
                        row,
                        col,
                        letter: letter.into(),
                        is_new,
                        is_blank: shown & 0x80 != 0,
                    });
                }
                JsonMove {
                    position: coordinate(play.down, play.lane, play.idx),
                    word,
                    score: play.score,
                    leave: leave_string(alphabet, &rack, play),
                    tiles,
                }
            })
            .collect();

        Ok(MoveReply {
            moves,
            total: move_generator.total_plays,
        })
    }
}
