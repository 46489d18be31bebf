// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text front end for playing a game. It only reads the board, asks for legal
//! moves, submits moves and requests undos; all rules live in `GameState`.
use std::io::{self, BufRead, Write};

use crate::game_state::GameState;
use crate::types::Color;

pub struct Console {
    state: GameState,
}

impl Console {
    pub fn new(state: GameState) -> Console {
        Console { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        write!(&mut writer, "{}", self.state)?;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"quit", []) => break,
                (&"board", []) => write!(&mut writer, "{}", self.state)?,
                (&"fen", []) => writeln!(&mut writer, "{}", self.state.as_fen())?,
                (&"moves", []) => self.handle_moves(&mut writer)?,
                (&"undo", []) => self.handle_undo(&mut writer)?,
                (mov, []) => self.handle_move(&mut writer, mov)?,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        Ok(())
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let moves: Vec<_> = self
            .state
            .valid_moves()
            .iter()
            .map(|mov| mov.to_string())
            .collect();
        writeln!(w, "{}", moves.join(" "))
    }

    fn handle_undo<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        if self.state.move_log().is_empty() {
            return writeln!(w, "nothing to undo");
        }

        self.state.undo_move();
        write!(w, "{}", self.state)
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, notation: &str) -> io::Result<()> {
        let mov = match self.state.move_from_notation(notation) {
            Some(mov) => mov,
            None => return writeln!(w, "invalid move: {}", notation),
        };

        if let Err(err) = self.state.make_legal_move(mov) {
            return writeln!(w, "illegal move {}: {}", notation, err);
        }

        write!(w, "{}", self.state)?;
        self.report_status(w)
    }

    fn report_status<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let replies = self.state.valid_moves();
        if !replies.is_empty() {
            if self.state.in_check() {
                return writeln!(w, "check");
            }

            return Ok(());
        }

        if self.state.checkmate() {
            let winner = match self.state.side_to_move() {
                Color::White => "black",
                Color::Black => "white",
            };
            writeln!(w, "checkmate, {} wins", winner)
        } else {
            writeln!(w, "stalemate")
        }
    }
}
