// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game_state::GameState;
use crate::moves::Move;

/// Counts the leaf nodes of the legal move tree rooted at `state`, `depth` plies deep.
///
/// Subtrees are counted in parallel. Every worker gets its own copy of the state, since legality
/// testing mutates the board in place.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = state.clone();
    let moves = root.valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut child = root.clone();
            child.make_move(mov);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Like `perft`, but reports the node count under each legal root move separately.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(Move, u64)> {
    let mut root = state.clone();
    let moves = root.valid_moves();
    moves
        .par_iter()
        .map(|&mov| {
            let mut child = root.clone();
            child.make_move(mov);
            (mov, perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}
