// Copyright (C) 2020-2026 Andy Kurnia.

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod build;
pub mod display;
pub mod error;
pub mod fash;
pub mod gaddag;
pub mod kibitzer;
pub mod matrix;
pub mod movegen;
pub mod play_scorer;
