// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error, matrix};
use error::Error;

/// Decode a cell grid into flat row-major board tiles. Each cell is ""
/// (empty), an uppercase letter (natural tile), or a lowercase letter
/// (blank-origin tile). The grid must match `dim` exactly.
pub fn from_cells(
    alphabet: &alphabet::Alphabet<'_>,
    dim: matrix::Dim,
    cells: &[Vec<String>],
) -> error::Returns<Vec<u8>> {
    if cells.len() != dim.rows as usize || cells.iter().any(|row| row.len() != dim.cols as usize) {
        return Err(Error::BoardShape {
            rows: cells.len(),
            cols: cells.first().map_or(0, |row| row.len()),
        });
    }
    let mut board_tiles = Vec::with_capacity(dim.area());
    for row in cells {
        for cell in row {
            let mut chars = cell.chars();
            match chars.next() {
                None => board_tiles.push(0),
                Some(c) if chars.next().is_none() => match alphabet.board_tile(c) {
                    Some(tile) => board_tiles.push(tile),
                    None => {
                        return Err(Error::Input(format!("invalid board cell: {cell:?}")));
                    }
                },
                Some(_) => {
                    return Err(Error::Input(format!("invalid board cell: {cell:?}")));
                }
            }
        }
    }
    Ok(board_tiles)
}

#[inline(always)]
pub fn is_occupied(board_tiles: &[u8], dim: matrix::Dim, row: i8, col: i8) -> bool {
    row >= 0
        && row < dim.rows
        && col >= 0
        && col < dim.cols
        && board_tiles[dim.at_row_col(row, col)] != 0
}

/// An anchor is an empty cell with at least one occupied cell among its
/// eight neighbors. Diagonal contact counts.
pub fn is_anchor(board_tiles: &[u8], dim: matrix::Dim, row: i8, col: i8) -> bool {
    if board_tiles[dim.at_row_col(row, col)] != 0 {
        return false;
    }
    for dr in -1..=1i8 {
        for dc in -1..=1i8 {
            if (dr != 0 || dc != 0) && is_occupied(board_tiles, dim, row + dr, col + dc) {
                return true;
            }
        }
    }
    false
}

/// Anchor indexes along one lane, ascending.
pub fn lane_anchors(
    board_tiles: &[u8],
    dim: matrix::Dim,
    down: bool,
    lane: i8,
    anchors: &mut Vec<i8>,
) {
    anchors.clear();
    let strider = dim.lane(down, lane);
    for idx in 0..strider.len() {
        let (row, col) = if down { (idx, lane) } else { (lane, idx) };
        if is_anchor(board_tiles, dim, row, col) {
            anchors.push(idx);
        }
    }
}

#[inline(always)]
pub fn is_empty(board_tiles: &[u8]) -> bool {
    board_tiles.iter().all(|&t| t == 0)
}
