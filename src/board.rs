// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::{Color, Piece, PieceKind, Square};

static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 mailbox board. Each cell is either empty (`None`) or holds a piece. Rows are stored
/// top to bottom, so row 0 holds Black's back rank in the starting position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting position, Black at the top.
    pub fn starting() -> Board {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(kind, Color::Black));
            board.cells[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.cells[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.cells[7][col] = Some(Piece::new(kind, Color::White));
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row()][square.col()] = piece;
    }

    /// Rows of the board, top to bottom, for consumers that draw the board cell by cell.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.cells.iter()
    }

    /// Every occupied square with its piece, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|piece| (Square::new(row, col), piece)))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            for cell in cells {
                if let Some(piece) = cell {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
