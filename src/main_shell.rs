// Copyright (C) 2020-2026 Andy Kurnia.

use rackgen::{alphabet, board_layout, display, kibitzer, matrix, movegen};

struct ShellState {
    engine: Option<kibitzer::Engine>,
    board_tiles: Vec<u8>,
    rack: Vec<u8>,
}

// "8d" = across, row 8, starting column d. "d8" = down, column d,
// starting row 8.
fn parse_coordinate(dim: matrix::Dim, s: &str) -> Option<(bool, i8, i8)> {
    let s = s.to_ascii_lowercase();
    let (down, letter, number) = if s.starts_with(|c: char| c.is_ascii_lowercase()) {
        (true, s.chars().next()?, s[1..].parse::<i16>().ok()?)
    } else {
        let split = s.find(|c: char| c.is_ascii_lowercase())?;
        (
            false,
            s[split..].chars().next()?,
            s[..split].parse::<i16>().ok()?,
        )
    };
    let letter_idx = (letter as u8).wrapping_sub(b'a') as i16;
    let number_idx = number - 1;
    let (lane, idx, lanes, cells) = if down {
        (letter_idx, number_idx, dim.cols as i16, dim.rows as i16)
    } else {
        (number_idx, letter_idx, dim.rows as i16, dim.cols as i16)
    };
    if (0..lanes).contains(&lane) && (0..cells).contains(&idx) {
        Some((down, lane as i8, idx as i8))
    } else {
        None
    }
}

fn print_moves(state: &ShellState, max_gen: usize) {
    let engine = match &state.engine {
        Some(engine) => engine,
        None => {
            println!("no word list loaded, try: load wordlist.txt");
            return;
        }
    };
    if state.rack.is_empty() {
        println!("no rack, try: rack LETTERS");
        return;
    }
    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let board_layout = &board_layout::COMMON_BOARD_LAYOUT;
    let board_snapshot = &movegen::BoardSnapshot {
        board_tiles: &state.board_tiles,
        alphabet,
        board_layout,
        gaddag: engine.gaddag(),
    };
    let mut move_generator = movegen::MoveGenerator::new();
    move_generator.gen_moves_alloc(board_snapshot, &state.rack, max_gen);
    let dim = board_layout.dim();
    for play in &move_generator.plays {
        let strider = dim.lane(play.down, play.lane);
        print!("{} ", kibitzer::coordinate(play.down, play.lane, play.idx));
        let mut inside = false;
        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            if tile == 0 {
                if !inside {
                    print!("(");
                    inside = true;
                }
                print!(
                    "{}",
                    alphabet
                        .from_board(board_snapshot.board_tiles[strider.at(i)])
                        .unwrap()
                );
            } else {
                if inside {
                    print!(")");
                    inside = false;
                }
                print!("{}", alphabet.from_board(tile).unwrap());
            }
        }
        if inside {
            print!(")");
        }
        println!(" {}", play.score);
    }
    println!(
        "{} of {} moves",
        move_generator.plays.len(),
        move_generator.total_plays
    );
}

fn run_command(state: &mut ShellState, strings: &[String]) -> bool {
    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let board_layout = &board_layout::COMMON_BOARD_LAYOUT;
    let dim = board_layout.dim();
    match strings[0].as_str() {
        "help" => {
            println!("load F   load word list from file F (one word per line)");
            println!("rack S   set the rack, ? for blank, e.g. rack AEINST?");
            println!("set P W  put word W at P, e.g. set 8d HELLO or set d8 hEllo");
            println!("unset P L  remove L tiles at P, e.g. unset 8d 5");
            println!("board    show the board");
            println!("moves N  show the top N moves (default 10)");
            println!("clear    empty the board and the rack");
            println!("exit     exit");
        }
        "exit" => {
            return false;
        }
        "load" => {
            if strings.len() > 1 {
                match std::fs::read_to_string(&strings[1]) {
                    Ok(whole_file) => {
                        match kibitzer::Engine::from_word_list(
                            whole_file
                                .lines()
                                .map(str::trim)
                                .filter(|line| !line.is_empty()),
                        ) {
                            Ok(engine) => {
                                state.engine = Some(engine);
                                println!("loaded {}", strings[1]);
                            }
                            Err(err) => {
                                println!("{err}");
                            }
                        }
                    }
                    Err(err) => {
                        println!("cannot open file: {err:?}");
                    }
                }
            } else {
                println!("need another arg");
            }
        }
        "rack" => {
            if strings.len() > 1 {
                match kibitzer::parse_rack(alphabet, &strings[1]) {
                    Ok(rack) if rack.len() <= movegen::RACK_SIZE => {
                        state.rack = rack;
                        println!("rack: {}", alphabet.fmt_rack(&state.rack));
                    }
                    Ok(_) => {
                        println!("rack cannot hold more than {} tiles", movegen::RACK_SIZE);
                    }
                    Err(err) => {
                        println!("{err}");
                    }
                }
            } else {
                state.rack.clear();
                println!("rack: (empty)");
            }
        }
        "set" => {
            if strings.len() > 2 {
                match parse_coordinate(dim, &strings[1]) {
                    Some((down, lane, idx)) => {
                        let strider = dim.lane(down, lane);
                        if strings[2].chars().count() > (strider.len() - idx) as usize {
                            println!("word does not fit");
                        } else if let Some(tiles) = strings[2]
                            .chars()
                            .map(|c| alphabet.board_tile(c))
                            .collect::<Option<Vec<u8>>>()
                        {
                            for (i, tile) in (idx..).zip(tiles) {
                                state.board_tiles[strider.at(i)] = tile;
                            }
                            display::print_board(alphabet, board_layout, &state.board_tiles);
                        } else {
                            println!("invalid word, use A-Z or a-z for blanks");
                        }
                    }
                    None => {
                        println!("invalid position, e.g. 8d (across) or d8 (down)");
                    }
                }
            } else {
                println!("need two more args");
            }
        }
        "unset" => {
            if strings.len() > 2 {
                match (
                    parse_coordinate(dim, &strings[1]),
                    strings[2].parse::<i8>(),
                ) {
                    (Some((down, lane, idx)), Ok(n)) if n >= 0 => {
                        let strider = dim.lane(down, lane);
                        for i in idx..std::cmp::min(idx.saturating_add(n), strider.len()) {
                            state.board_tiles[strider.at(i)] = 0;
                        }
                        display::print_board(alphabet, board_layout, &state.board_tiles);
                    }
                    _ => {
                        println!("invalid args, e.g. unset 8d 5");
                    }
                }
            } else {
                println!("need two more args");
            }
        }
        "board" => {
            display::print_board(alphabet, board_layout, &state.board_tiles);
            println!("rack: {}", alphabet.fmt_rack(&state.rack));
        }
        "moves" => {
            let max_gen = if strings.len() > 1 {
                strings[1].parse().unwrap_or(kibitzer::DEFAULT_TOP_N)
            } else {
                kibitzer::DEFAULT_TOP_N
            };
            print_moves(state, max_gen);
        }
        "clear" => {
            state.board_tiles.iter_mut().for_each(|m| *m = 0);
            state.rack.clear();
        }
        _ => {
            println!("invalid input, help for help");
        }
    }
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dim = board_layout::COMMON_BOARD_LAYOUT.dim();
    let mut state = ShellState {
        engine: None,
        board_tiles: vec![0u8; dim.area()],
        rack: Vec::new(),
    };
    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{filename}:{line_num}> {line}");
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        if strings[0] == "source" {
                            if strings.len() > 1 {
                                match std::fs::read_to_string(&strings[1]) {
                                    Ok(whole_file) => {
                                        let v = cmd_stack.len();
                                        for (line_num, line) in whole_file.lines().enumerate() {
                                            cmd_stack.push((
                                                line.to_string(),
                                                Some((strings[1].clone(), line_num + 1)),
                                            ));
                                        }
                                        cmd_stack[v..].reverse();
                                    }
                                    Err(err) => {
                                        println!("cannot open file: {err:?}");
                                    }
                                }
                            } else {
                                println!("need another arg");
                            }
                        } else if !run_command(&mut state, &strings) {
                            break;
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {err:?}");
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {err:?}");
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_parse_both_axes() {
        let dim = board_layout::COMMON_BOARD_LAYOUT.dim();
        assert_eq!(parse_coordinate(dim, "8d"), Some((false, 7, 3)));
        assert_eq!(parse_coordinate(dim, "d8"), Some((true, 3, 7)));
        assert_eq!(parse_coordinate(dim, "15o"), Some((false, 14, 14)));
        assert_eq!(parse_coordinate(dim, "O15"), Some((true, 14, 14)));
        assert_eq!(parse_coordinate(dim, "16a"), None);
        assert_eq!(parse_coordinate(dim, "p1"), None);
        assert_eq!(parse_coordinate(dim, "8"), None);
        assert_eq!(parse_coordinate(dim, "dd"), None);
    }
}
