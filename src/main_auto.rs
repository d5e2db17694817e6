// Copyright (C) 2020-2026 Andy Kurnia.

use rackgen::{alphabet, bag, board_layout, kibitzer, matrix, movegen, play_scorer};
use rand::prelude::*;

fn apply_play(board_tiles: &mut [u8], dim: matrix::Dim, play: &movegen::Play) {
    let strider = dim.lane(play.down, play.lane);
    for (i, &tile) in (play.idx..).zip(play.word.iter()) {
        if tile != 0 {
            board_tiles[strider.at(i)] = tile;
        }
    }
}

fn remove_played_tiles(rack: &mut Vec<u8>, play: &movegen::Play) {
    for &tile in play.word.iter() {
        if tile != 0 {
            let rack_tile = if tile & 0x80 != 0 { 0 } else { tile };
            let pos = rack
                .iter()
                .position(|&t| t == rack_tile)
                .expect("play uses a tile that is not on the rack");
            rack.swap_remove(pos);
        }
    }
}

// Self-play with greedy move selection. Every chosen play is recounted
// and dictionary-checked independently of the search; any disagreement
// is a bug, so it panics.
fn play_one_game(engine: &kibitzer::Engine, rng: &mut rand_chacha::ChaCha20Rng) -> (i16, i16, u32) {
    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let board_layout = &board_layout::COMMON_BOARD_LAYOUT;
    let dim = board_layout.dim();

    let mut board_tiles = vec![0u8; dim.area()];
    let mut bag = bag::Bag::new(alphabet);
    bag.shuffle(rng);
    let mut racks = [Vec::new(), Vec::new()];
    for rack in racks.iter_mut() {
        bag.replenish(rack, movegen::RACK_SIZE);
    }
    let mut scores = [0i16; 2];
    let mut turn = 0;
    let mut num_moves = 0u32;
    let mut consecutive_passes = 0;

    let mut move_generator = movegen::MoveGenerator::new();
    let mut play_scorer = play_scorer::PlayScorer::new();
    loop {
        let rack = &mut racks[turn];
        let board_snapshot = &movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            alphabet,
            board_layout,
            gaddag: engine.gaddag(),
        };
        move_generator.gen_moves_alloc(board_snapshot, rack, 1);
        match move_generator.plays.first() {
            Some(play) => {
                let recounted = play_scorer.compute_score(board_snapshot, play);
                assert_eq!(recounted, play.score, "score recount mismatch");
                assert!(
                    play_scorer.words_are_valid(board_snapshot, play),
                    "search produced an invalid word"
                );
                scores[turn] += play.score;
                num_moves += 1;
                consecutive_passes = 0;
                let play = play.clone();
                apply_play(&mut board_tiles, dim, &play);
                remove_played_tiles(rack, &play);
                bag.replenish(rack, movegen::RACK_SIZE);
                if rack.is_empty() {
                    break;
                }
            }
            None => {
                consecutive_passes += 1;
                if consecutive_passes >= 2 {
                    break;
                }
            }
        }
        turn ^= 1;
    }
    (scores[0], scores[1], num_moves)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let this_exe = args.next().unwrap_or_else(|| "auto".into());
    let word_list_filename = match args.next() {
        Some(x) => x,
        None => {
            eprintln!("usage: {this_exe} wordlist.txt [games_per_thread]");
            std::process::exit(2);
        }
    };
    let games_per_thread = match args.next() {
        Some(x) => x.parse::<u64>()?,
        None => u64::MAX,
    };
    let word_list = std::fs::read_to_string(&word_list_filename)?;
    let engine = kibitzer::Engine::from_word_list(
        word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )?;

    let num_threads = num_cpus::get();
    println!("playing self on {num_threads} threads");
    std::thread::scope(|scope| {
        for thread_id in 0..num_threads {
            let engine = &engine;
            scope.spawn(move || {
                let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
                for game in 0..games_per_thread {
                    let (p1, p2, num_moves) = play_one_game(engine, &mut rng);
                    println!("t{thread_id} g{game}: {p1} - {p2} in {num_moves} moves");
                }
            });
        }
    });
    Ok(())
}
