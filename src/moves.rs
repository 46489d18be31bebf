// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::Board;
use crate::types::{Piece, PieceKind, Square};

/// A single ply. A move remembers the piece that stood on its start square and the piece that
/// stood on its end square at the time it was created, which is everything needed to take it
/// back later.
///
/// Two moves compare equal whenever their start and end squares match, regardless of the pieces
/// they recorded.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Move {
    start: Square,
    end: Square,
    piece_moved: Option<Piece>,
    piece_captured: Option<Piece>,
    is_promotion: bool,
}

impl Move {
    /// Creates a move from `start` to `end` on the given board, which must be the board as it
    /// stands before the move is made. No legality checking is done here.
    pub fn new(start: Square, end: Square, board: &Board) -> Move {
        let piece_moved = board.piece_at(start);
        let is_promotion = match piece_moved {
            Some(piece) => {
                piece.kind == PieceKind::Pawn && end.row() == piece.color.promotion_row()
            }
            None => false,
        };

        Move {
            start,
            end,
            piece_moved,
            piece_captured: board.piece_at(end),
            is_promotion,
        }
    }

    pub fn start(&self) -> Square {
        self.start
    }

    pub fn end(&self) -> Square {
        self.end
    }

    pub fn piece_moved(&self) -> Option<Piece> {
        self.piece_moved
    }

    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.is_promotion
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
