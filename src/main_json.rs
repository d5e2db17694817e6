// Copyright (C) 2020-2026 Andy Kurnia.

use rackgen::kibitzer;

// Reads one MoveRequest as json on stdin, writes one MoveReply as json
// on stdout. The word list is one word per line.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let this_exe = args.next().unwrap_or_else(|| "json".into());
    let word_list_filename = match args.next() {
        Some(x) => x,
        None => {
            eprintln!("usage: {this_exe} wordlist.txt < request.json");
            std::process::exit(2);
        }
    };
    let word_list = std::fs::read_to_string(&word_list_filename)?;
    let engine = kibitzer::Engine::from_word_list(
        word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )?;

    let mut data = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut data)?;
    let request = serde_json::from_str::<kibitzer::MoveRequest>(&data)?;
    let reply = engine.generate(&request)?;
    println!("{}", serde_json::to_string(&reply)?);
    Ok(())
}
