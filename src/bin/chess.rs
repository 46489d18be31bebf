// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use chess_engine::console::Console;
use chess_engine::{perft, perft_divide, GameState};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print node counts per root move")
                        .long("--divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves in a board position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position (default: starting position)")
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the moves as JSON")
                        .long("--json"),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game on the terminal using coordinate moves such as e2e4")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string for the starting position")
                        .value_name("FEN")
                        .long("--fen")
                        .takes_value(true),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("moves") {
        run_moves(matches);
    }

    let fen = matches
        .subcommand_matches("play")
        .and_then(|matches| matches.value_of("fen"));
    run_play(fen);
}

fn load_state(fen: Option<&str>) -> GameState {
    match fen {
        Some(fen) => match GameState::from_fen(fen) {
            Ok(state) => state,
            Err(err) => {
                println!("invalid fen: {}", err);
                process::exit(1);
            }
        },
        None => GameState::new(),
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN");
    let depth = value_t_or_exit!(matches, "depth", u32);
    let state = load_state(fen);

    println!("fen:   {}", state.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", state);
    println!();
    if matches.is_present("divide") {
        let mut total = 0;
        for (mov, count) in perft_divide(&state, depth) {
            println!("{}: {}", mov, count);
            total += count;
        }

        println!();
        println!("total: {}", total);
        process::exit(0);
    }

    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&state, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let mut state = load_state(matches.value_of("FEN"));
    let moves = state.valid_moves();
    if matches.is_present("json") {
        match serde_json::to_string_pretty(&moves) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                println!("failed to serialize moves: {}", err);
                process::exit(1);
            }
        }
    } else {
        for mov in &moves {
            println!("{}", mov);
        }

        if state.checkmate() {
            println!("checkmate");
        } else if state.stalemate() {
            println!("stalemate");
        }
    }

    process::exit(0);
}

fn run_play(fen: Option<&str>) {
    let mut console = Console::new(load_state(fen));
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = console.run(stdin.lock(), stdout.lock()) {
        println!("i/o error: {}", err);
        process::exit(1);
    }
}
