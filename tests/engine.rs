// Copyright (C) 2020-2026 Andy Kurnia.

use rackgen::kibitzer::{Engine, MoveRequest};

fn empty_board() -> Vec<Vec<String>> {
    vec![vec![String::new(); 15]; 15]
}

fn request(rack: &str, board: Vec<Vec<String>>, top_n: i32) -> MoveRequest {
    MoveRequest {
        rack: rack.into(),
        board,
        top_n,
    }
}

fn place(board: &mut [Vec<String>], row: usize, col: usize, word: &str, down: bool) {
    for (i, c) in word.chars().enumerate() {
        if down {
            board[row + i][col] = c.to_string();
        } else {
            board[row][col + i] = c.to_string();
        }
    }
}

#[test]
fn opening_moves_cover_the_center() {
    let engine = Engine::from_word_list(["CAT", "AT", "TA", "ACT"]).unwrap();
    let reply = engine.generate(&request("CAT", empty_board(), 100)).unwrap();
    assert!(!reply.moves.is_empty());
    for m in &reply.moves {
        assert!(m.position.starts_with('8'), "opening move is across row 8");
        assert!(
            m.tiles.iter().any(|t| t.row == 7 && t.col == 7),
            "every opening move covers h8"
        );
        assert!(m.tiles.iter().all(|t| t.is_new));
    }
    // best plays are the three CATs and ACTs through the double word
    assert_eq!(reply.moves[0].score, 10);
    assert_eq!(reply.moves[0].leave, "");
}

#[test]
fn hooks_through_an_existing_tile() {
    let engine = Engine::from_word_list(["HELLO", "SHE", "HE"]).unwrap();
    let mut board = empty_board();
    place(&mut board, 7, 5, "HELLO", false);
    let reply = engine.generate(&request("SHE", board, 100)).unwrap();
    let she = reply
        .moves
        .iter()
        .find(|m| m.word == "SHE" && m.position == "f7")
        .expect("SHE down through the H of HELLO");
    // S1 + H4 + E1, no premiums in column f rows 7-9
    assert_eq!(she.score, 6);
    assert_eq!(she.leave, "");
    // the H is played through, not placed
    let h = she.tiles.iter().find(|t| t.letter == "H").unwrap();
    assert!(!h.is_new);
    assert_eq!((h.row, h.col), (7, 5));
    assert_eq!(she.tiles.iter().filter(|t| t.is_new).count(), 2);
}

#[test]
fn opening_bingo_with_a_blank() {
    let engine = Engine::from_word_list(["RETAINS", "RETAIN", "RETINA"]).unwrap();
    let reply = engine.generate(&request("RETAIN?", empty_board(), 5)).unwrap();
    let best = &reply.moves[0];
    // blank S scores zero; a one-point letter on the double letter
    // square makes 7, doubled through the star, plus the 50 bonus
    assert_eq!(best.word.to_ascii_uppercase(), "RETAINS");
    assert_eq!(best.score, 64);
    assert_eq!(best.tiles.iter().filter(|t| t.is_blank).count(), 1);
    let blank = best.tiles.iter().find(|t| t.is_blank).unwrap();
    assert_eq!(blank.letter, blank.letter.to_ascii_lowercase());
}

#[test]
fn every_prefix_word_is_emitted() {
    let engine = Engine::from_word_list(["CAT", "CATS"]).unwrap();
    let reply = engine.generate(&request("CATS", empty_board(), 1000)).unwrap();
    let words: std::collections::HashSet<&str> =
        reply.moves.iter().map(|m| m.word.as_str()).collect();
    assert!(words.contains("CAT"));
    assert!(words.contains("CATS"));
}

#[test]
fn replies_are_deterministic() {
    let engine = Engine::from_word_list([
        "HELLO", "SHE", "HE", "EH", "OH", "HOE", "LO", "HELL", "ELL", "SELL", "HOSE", "SHELL",
        "HEEL", "HOLE", "HOLES",
    ])
    .unwrap();
    let mut board = empty_board();
    place(&mut board, 7, 5, "HELLO", false);
    place(&mut board, 4, 7, "LO", true);
    let a = engine
        .generate(&request("SHEL?OE", board.clone(), 50))
        .unwrap();
    let b = engine.generate(&request("SHEL?OE", board, 50)).unwrap();
    assert_eq!(a.total, b.total);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    // ranked by score, best first
    for pair in a.moves.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn new_tiles_only_land_on_empty_cells() {
    let engine = Engine::from_word_list([
        "HELLO", "SHE", "HE", "EH", "OH", "HOE", "LO", "HELL", "ELL", "SELL", "HOSE", "SHELL",
    ])
    .unwrap();
    let mut board = empty_board();
    place(&mut board, 7, 5, "HELLO", false);
    place(&mut board, 4, 7, "LO", true);
    let reply = engine
        .generate(&request("SHELOE?", board.clone(), 1000))
        .unwrap();
    assert!(!reply.moves.is_empty());
    for m in &reply.moves {
        for t in &m.tiles {
            let cell = &board[t.row as usize][t.col as usize];
            if t.is_new {
                assert!(cell.is_empty(), "{} overwrites {cell:?}", m.position);
            } else {
                assert_eq!(cell, &t.letter, "{} misreads the board", m.position);
            }
        }
    }
}

#[test]
fn blank_on_the_board_hooks_normally() {
    let engine = Engine::from_word_list(["CAT", "CATS"]).unwrap();
    let mut board = empty_board();
    place(&mut board, 7, 6, "C", false);
    board[7][7] = "a".into(); // blank playing as A
    place(&mut board, 7, 8, "T", false);
    let reply = engine.generate(&request("S", board, 100)).unwrap();
    let cats = reply
        .moves
        .iter()
        .find(|m| m.position == "8g" && m.word == "CaTS")
        .expect("S hooks onto the blank-through CaT");
    // C3 + blank 0 + T1 + S1, no premiums multiply play-through words
    assert_eq!(cats.score, 5);
    let a = cats.tiles.iter().find(|t| t.letter == "a").unwrap();
    assert!(a.is_blank);
    assert!(!a.is_new);
    assert_eq!(cats.tiles.iter().filter(|t| t.is_new).count(), 1);
}

#[test]
fn word_lists_are_case_insensitive() {
    let lower = Engine::from_word_list(["cat", "at", "ta"]).unwrap();
    let upper = Engine::from_word_list(["CAT", "AT", "TA"]).unwrap();
    let a = lower.generate(&request("CAT", empty_board(), 100)).unwrap();
    let b = upper.generate(&request("CAT", empty_board(), 100)).unwrap();
    assert_eq!(a.total, 7);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn blank_leaves_keep_the_blank() {
    let engine = Engine::from_word_list(["AT"]).unwrap();
    let reply = engine.generate(&request("AT?", empty_board(), 10)).unwrap();
    let at = reply.moves.iter().find(|m| m.word == "AT").unwrap();
    assert_eq!(at.leave, "?");
}

#[test]
fn total_counts_everything_found() {
    let engine = Engine::from_word_list(["CAT", "AT", "TA"]).unwrap();
    let reply = engine.generate(&request("CAT", empty_board(), 2)).unwrap();
    assert_eq!(reply.moves.len(), 2);
    assert_eq!(reply.total, 7);
}

#[test]
fn reply_serializes_with_the_wire_field_names() {
    let engine = Engine::from_word_list(["CAT"]).unwrap();
    let reply = engine.generate(&request("CAT", empty_board(), 1)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&reply).unwrap()).unwrap();
    assert!(value["total"].is_u64());
    let m = &value["moves"][0];
    assert!(m["position"].is_string());
    assert!(m["word"].is_string());
    assert!(m["score"].is_i64());
    assert!(m["leave"].is_string());
    let t = &m["tiles"][0];
    assert!(t["row"].is_i64());
    assert!(t["col"].is_i64());
    assert!(t["letter"].is_string());
    assert!(t["isNew"].is_boolean());
    assert!(t["isBlank"].is_boolean());
}

#[test]
fn rejects_malformed_requests() {
    let engine = Engine::from_word_list(["CAT"]).unwrap();
    assert!(engine.generate(&request("CA7", empty_board(), 0)).is_err());
    let mut bad = empty_board();
    bad[0][0] = "CA".into();
    assert!(engine.generate(&request("CAT", bad, 0)).is_err());
    let mut ragged = empty_board();
    ragged[3].pop();
    assert!(engine.generate(&request("CAT", ragged, 0)).is_err());
}

#[test]
fn rejects_malformed_word_lists() {
    assert!(Engine::from_word_list(["CAT", ""]).is_err());
    assert!(Engine::from_word_list(["CA T"]).is_err());
    assert!(Engine::from_word_list(["CAT'S"]).is_err());
}
