// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod console;
mod game_state;
mod move_generator;
mod moves;
mod perft;
mod types;

pub use board::Board;
pub use game_state::{FenParseError, GameState, MoveError};
pub use move_generator::{check_move_validity, MoveGenerator, MoveVec};
pub use moves::Move;
pub use perft::{perft, perft_divide};
pub use types::{Color, Piece, PieceKind, Square, TableIndex, COLORS};
