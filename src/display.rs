// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout<'_>, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premiums()[board_layout.dim().at_row_col(row, col)];
    match premium.word_multiplier {
        3 => "=",
        2 => "-",
        1 => match premium.tile_multiplier {
            3 => "\"",
            2 => "\'",
            1 => " ",
            _ => panic!(),
        },
        _ => panic!(),
    }
}

#[inline(always)]
pub fn board_label<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &board_layout::BoardLayout<'_>,
    board_tiles: &'a [u8],
    row: i8,
    col: i8,
) -> &'a str {
    alphabet
        .from_board(board_tiles[board_layout.dim().at_row_col(row, col)])
        .unwrap_or_else(|| empty_label(board_layout, row, col))
}

pub fn board_to_string(
    alphabet: &alphabet::Alphabet<'_>,
    board_layout: &board_layout::BoardLayout<'_>,
    board_tiles: &[u8],
) -> String {
    let dim = board_layout.dim();
    let mut s = String::new();
    s.push_str("  ");
    for c in 0..dim.cols {
        let _ = write!(s, " {}", ((c as u8) + 0x61) as char);
    }
    s.push('\n');
    s.push_str("  +");
    for _ in 1..dim.cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
    for r in 0..dim.rows {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push_str(board_label(alphabet, board_layout, board_tiles, r, c));
        }
        let _ = writeln!(s, "|{}", r + 1);
    }
    s.push_str("  +");
    for _ in 1..dim.cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
    s.push_str("  ");
    for c in 0..dim.cols {
        let _ = write!(s, " {}", ((c as u8) + 0x61) as char);
    }
    s.push('\n');
    s
}

pub fn print_board(
    alphabet: &alphabet::Alphabet<'_>,
    board_layout: &board_layout::BoardLayout<'_>,
    board_tiles: &[u8],
) {
    print!(
        "{}",
        board_to_string(alphabet, board_layout, board_tiles)
    );
}
