// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square};

/// Fixed-capacity buffer for generated moves. With no more material than promotions allow, one
/// side has at most 321 pseudo-legal moves (nine queens, two each of the minor pieces and rooks,
/// and a king, all unobstructed).
pub type MoveVec = ArrayVec<[Move; 384]>;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns whether a piece of color `side` may land on (`row`, `col`): the square must be on the
/// board and either empty or occupied by the other side.
pub fn check_move_validity(board: &Board, side: Color, row: i32, col: i32) -> bool {
    match Square::checked(row, col) {
        Some(square) => match board.piece_at(square) {
            Some(piece) => piece.color != side,
            None => true,
        },
        None => false,
    }
}

/// Pseudo-legal move generator. Moves produced here obey each piece's movement rules and the
/// occupancy of the board, but may leave the mover's own king in check.
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every pseudo-legal move for `side`, scanning the board in row-major order.
    pub fn generate_moves(&self, board: &Board, side: Color, moves: &mut MoveVec) {
        for (square, piece) in board.occupied() {
            if piece.color != side {
                continue;
            }

            self.generate_piece_moves(board, square, piece, moves);
        }
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        square: Square,
        piece: Piece,
        moves: &mut MoveVec,
    ) {
        let side = piece.color;
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(board, square, side, moves),
            PieceKind::Knight => self.step_moves(board, square, side, &KNIGHT_OFFSETS, moves),
            PieceKind::Bishop => self.slide_moves(board, square, side, &DIAGONAL, moves),
            PieceKind::Rook => self.slide_moves(board, square, side, &ORTHOGONAL, moves),
            PieceKind::Queen => {
                self.slide_moves(board, square, side, &ORTHOGONAL, moves);
                self.slide_moves(board, square, side, &DIAGONAL, moves);
            }
            PieceKind::King => self.step_moves(board, square, side, &KING_OFFSETS, moves),
        }
    }

    fn pawn_moves(&self, board: &Board, square: Square, side: Color, moves: &mut MoveVec) {
        let dir = side.pawn_direction();

        // Pushes never capture, so they only need the target square to be empty.
        if let Some(single) = square.offset(dir, 0) {
            if board.is_empty(single) {
                moves.push(Move::new(square, single, board));
                if square.row() == side.pawn_start_row() {
                    if let Some(double) = single.offset(dir, 0) {
                        if board.is_empty(double) {
                            moves.push(Move::new(square, double, board));
                        }
                    }
                }
            }
        }

        // Diagonal captures. `offset` keeps the a- and h-file pawns from wrapping.
        for &dc in &[-1, 1] {
            if let Some(target) = square.offset(dir, dc) {
                match board.piece_at(target) {
                    Some(victim) if victim.color != side => {
                        moves.push(Move::new(square, target, board));
                    }
                    _ => {}
                }
            }
        }
    }

    fn step_moves(
        &self,
        board: &Board,
        square: Square,
        side: Color,
        offsets: &[(i32, i32)],
        moves: &mut MoveVec,
    ) {
        let (row, col) = (square.row() as i32, square.col() as i32);
        for &(dr, dc) in offsets {
            if check_move_validity(board, side, row + dr, col + dc) {
                let target = Square::new((row + dr) as usize, (col + dc) as usize);
                moves.push(Move::new(square, target, board));
            }
        }
    }

    fn slide_moves(
        &self,
        board: &Board,
        square: Square,
        side: Color,
        directions: &[(i32, i32)],
        moves: &mut MoveVec,
    ) {
        for &(dr, dc) in directions {
            let (mut row, mut col) = (square.row() as i32 + dr, square.col() as i32 + dc);

            // Off-board and friendly squares end the ray without a move.
            while check_move_validity(board, side, row, col) {
                let target = Square::new(row as usize, col as usize);
                moves.push(Move::new(square, target, board));

                // A capture ends the ray.
                if !board.is_empty(target) {
                    break;
                }

                row += dr;
                col += dc;
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{check_move_validity, MoveGenerator, MoveVec};
    use crate::board::Board;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn board_with(pieces: &[(usize, usize, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.set(Square::new(row, col), Some(piece));
        }

        board
    }

    fn destinations(board: &Board, side: Color) -> Vec<String> {
        let mut moves = MoveVec::default();
        MoveGenerator::new().generate_moves(board, side, &mut moves);
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn validity_predicate() {
        let board = board_with(&[
            (4, 4, Piece::new(PieceKind::Pawn, Color::White)),
            (3, 3, Piece::new(PieceKind::Pawn, Color::Black)),
        ]);

        assert!(check_move_validity(&board, Color::White, 0, 0));
        assert!(check_move_validity(&board, Color::White, 3, 3));
        assert!(!check_move_validity(&board, Color::White, 4, 4));
        assert!(!check_move_validity(&board, Color::White, -1, 4));
        assert!(!check_move_validity(&board, Color::White, 4, 8));
    }

    #[test]
    fn starting_position_counts() {
        let board = Board::starting();
        assert_eq!(20, destinations(&board, Color::White).len());
        assert_eq!(20, destinations(&board, Color::Black).len());
    }

    #[test]
    fn edge_pawn_captures_do_not_wrap() {
        // white pawn on a4, black pieces on b5 and h5
        let board = board_with(&[
            (4, 0, Piece::new(PieceKind::Pawn, Color::White)),
            (3, 1, Piece::new(PieceKind::Knight, Color::Black)),
            (3, 7, Piece::new(PieceKind::Knight, Color::Black)),
        ]);

        let moves = destinations(&board, Color::White);
        assert_eq!(vec!["a4a5", "a4b5"], moves);
    }

    #[test]
    fn blocked_double_push() {
        // black pawn on e7, white piece on e5
        let board = board_with(&[
            (1, 4, Piece::new(PieceKind::Pawn, Color::Black)),
            (3, 4, Piece::new(PieceKind::Bishop, Color::White)),
        ]);

        assert_eq!(vec!["e7e6"], destinations(&board, Color::Black));
    }

    #[test]
    fn king_never_stays_put() {
        let board = board_with(&[(4, 4, Piece::new(PieceKind::King, Color::White))]);
        let moves = destinations(&board, Color::White);
        assert_eq!(8, moves.len());
        assert!(!moves.contains(&"e4e4".to_owned()));
    }

    #[test]
    fn rook_ray_stops_at_first_capture() {
        // white rook on a4, black pawns on d4 and f4
        let board = board_with(&[
            (4, 0, Piece::new(PieceKind::Rook, Color::White)),
            (4, 3, Piece::new(PieceKind::Pawn, Color::Black)),
            (4, 5, Piece::new(PieceKind::Pawn, Color::Black)),
        ]);

        let moves = destinations(&board, Color::White);
        assert!(moves.contains(&"a4d4".to_owned()));
        assert!(!moves.contains(&"a4e4".to_owned()));
        assert!(!moves.contains(&"a4f4".to_owned()));
        assert_eq!(10, moves.len());
    }

    #[test]
    fn queen_ray_stops_before_friend() {
        // white queen on d1, white pawn on d3
        let board = board_with(&[
            (7, 3, Piece::new(PieceKind::Queen, Color::White)),
            (5, 3, Piece::new(PieceKind::Pawn, Color::White)),
        ]);

        let moves = destinations(&board, Color::White);
        assert!(moves.contains(&"d1d2".to_owned()));
        assert!(!moves.contains(&"d1d3".to_owned()));
        assert!(!moves.contains(&"d1d4".to_owned()));
    }
}
