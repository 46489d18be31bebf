// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use hashbrown::HashSet;

use crate::board::Board;
use crate::move_generator::{self, MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    TooManyKings,
    TooManyPieces,
    InvalidSideToMove,
    OpponentInCheck,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not span eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::TooManyKings => write!(f, "more than one king of a color"),
            FenParseError::TooManyPieces => {
                write!(f, "more pieces than a side's pawns could have promoted to")
            }
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::OpponentInCheck => {
                write!(f, "the side not to move is in check")
            }
        }
    }
}

impl Error for FenParseError {}

/// Reasons a move submitted through `GameState::make_legal_move` can be turned down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    EmptySquare,
    Illegal,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::EmptySquare => write!(f, "no piece on the start square"),
            MoveError::Illegal => write!(f, "not a legal move in this position"),
        }
    }
}

impl Error for MoveError {}

/// The state of a game in progress: the board, whose turn it is, and the log of moves that led
/// here.
///
/// The checkmate and stalemate flags describe the result of the most recent call to
/// `valid_moves` and are cleared whenever a move is taken back.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    move_log: Vec<Move>,
    king_squares: [Option<Square>; 2],
    checkmate: bool,
    stalemate: bool,
}

//
// Game state getters
//

impl GameState {
    /// A new game in the standard starting position, White to move.
    pub fn new() -> GameState {
        GameState::from_board(Board::starting(), Color::White)
    }

    fn from_board(board: Board, side_to_move: Color) -> GameState {
        let mut king_squares = [None; 2];
        for (square, piece) in board.occupied() {
            if piece.kind == PieceKind::King {
                king_squares[piece.color.as_index()] = Some(square);
            }
        }

        GameState {
            board,
            side_to_move,
            move_log: Vec::new(),
            king_squares,
            checkmate: false,
            stalemate: false,
        }
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Where the king of the given color stands, or `None` for hand-built positions that lack
    /// one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.as_index()]
    }

    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn stalemate(&self) -> bool {
        self.stalemate
    }
}

//
// Move application
//

impl GameState {
    /// Applies a move without checking it for legality. Callers should only submit moves taken
    /// from `valid_moves`; `make_legal_move` does that check for them. A move whose start square
    /// was empty when it was created is ignored.
    pub fn make_move(&mut self, mov: Move) {
        let moving_piece = match mov.piece_moved() {
            Some(piece) => piece,
            None => return,
        };

        trace!("make_move: {}", mov);
        self.board.set(mov.start(), None);
        let placed = if mov.is_promotion() {
            Piece::new(PieceKind::Queen, moving_piece.color)
        } else {
            moving_piece
        };

        self.board.set(mov.end(), Some(placed));
        self.move_log.push(mov);
        self.side_to_move = self.side_to_move.toggle();
        if moving_piece.kind == PieceKind::King {
            self.king_squares[moving_piece.color.as_index()] = Some(mov.end());
        }
    }

    /// Takes back the most recent move. Does nothing if no moves have been made.
    pub fn undo_move(&mut self) {
        let mov = match self.move_log.pop() {
            Some(mov) => mov,
            None => return,
        };

        trace!("undo_move: {}", mov);
        self.board.set(mov.start(), mov.piece_moved());
        self.board.set(mov.end(), mov.piece_captured());
        self.side_to_move = self.side_to_move.toggle();
        if let Some(piece) = mov.piece_moved() {
            if piece.kind == PieceKind::King {
                self.king_squares[piece.color.as_index()] = Some(mov.start());
            }
        }

        self.checkmate = false;
        self.stalemate = false;
    }

    /// Applies a move only if it belongs to the current set of legal moves.
    pub fn make_legal_move(&mut self, mov: Move) -> Result<(), MoveError> {
        if mov.piece_moved().is_none() {
            return Err(MoveError::EmptySquare);
        }

        if !self.valid_moves().contains(&mov) {
            return Err(MoveError::Illegal);
        }

        debug!("{:?} plays {}", self.side_to_move, mov);
        self.make_move(mov);
        Ok(())
    }
}

//
// Move generation and check detection
//

impl GameState {
    /// Returns whether a piece belonging to the side to move may land on (`row`, `col`).
    pub fn check_move_validity(&self, row: i32, col: i32) -> bool {
        move_generator::check_move_validity(&self.board, self.side_to_move, row, col)
    }

    /// Every pseudo-legal move for the side to move, in row-major order of the moving pieces.
    pub fn all_possible_moves(&self) -> MoveVec {
        self.moves_for(self.side_to_move)
    }

    fn moves_for(&self, side: Color) -> MoveVec {
        let mut moves = MoveVec::default();
        MoveGenerator::new().generate_moves(&self.board, side, &mut moves);
        moves
    }

    /// Returns whether the opponent of the side to move has a pseudo-legal move ending on
    /// `square`. Pawn pushes count and pawn captures only count onto occupied squares, so the
    /// answer is exact for squares holding a piece, such as the king's.
    pub fn square_under_attack(&self, square: Square) -> bool {
        self.moves_for(self.side_to_move.toggle())
            .iter()
            .any(|mov| mov.end() == square)
    }

    /// Returns whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        match self.king_square(self.side_to_move) {
            Some(king) => self.square_under_attack(king),
            None => false,
        }
    }

    /// Computes the legal moves for the side to move and records whether the position is
    /// checkmate or stalemate.
    ///
    /// Each candidate is played out on the board, tested for leaving the mover in check, and
    /// taken back before the next one is tried.
    pub fn valid_moves(&mut self) -> Vec<Move> {
        let was_in_check = self.in_check();
        let mut seen = HashSet::new();
        let mut legal = Vec::new();
        for mov in self.all_possible_moves() {
            if !seen.insert(mov) {
                continue;
            }

            self.make_move(mov);

            // make_move handed the turn to the opponent. Hand it back so in_check looks at the
            // mover's king.
            self.side_to_move = self.side_to_move.toggle();
            let exposes_king = self.in_check();
            self.side_to_move = self.side_to_move.toggle();
            self.undo_move();

            if exposes_king {
                trace!("rejecting {}: leaves king in check", mov);
            } else {
                legal.push(mov);
            }
        }

        self.checkmate = legal.is_empty() && was_in_check;
        self.stalemate = legal.is_empty() && !was_in_check;
        if self.checkmate {
            info!("checkmate, {:?} to move has no legal moves", self.side_to_move);
        } else if self.stalemate {
            info!("stalemate, {:?} to move has no legal moves", self.side_to_move);
        }

        legal
    }
}

//
// FEN and coordinate notation.
//
// Only the piece placement and side-to-move fields of FEN carry information here. Castling and
// en passant are not part of this game, so any fields after the side to move are accepted and
// ignored.
//

impl GameState {
    /// Constructs a game state from a FEN representation of a board position. The position has
    /// an empty move log.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            iter.next();
            match iter.peek() {
                None | Some(' ') => Ok(side),
                Some(_) => Err(FenParseError::InvalidSideToMove),
            }
        }

        let mut board = Board::empty();
        let mut kings = [0; 2];
        let iter = &mut fen.as_ref().chars().peekable();
        for row in 0..8 {
            let mut col = 0;
            while col < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    col += c as usize - '0' as usize;
                    if col > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                if piece.kind == PieceKind::King {
                    kings[piece.color.as_index()] += 1;
                    if kings[piece.color.as_index()] > 1 {
                        return Err(FenParseError::TooManyKings);
                    }
                }

                board.set(Square::new(row, col), Some(piece));
                iter.next();
                col += 1;
            }

            if row != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side_to_move = eat_side_to_move(iter)?;
        check_material(&board)?;
        let mut state = GameState::from_board(board, side_to_move);

        // The side that just moved can't have left its own king attacked.
        state.side_to_move = side_to_move.toggle();
        let opponent_in_check = state.in_check();
        state.side_to_move = side_to_move;
        if opponent_in_check {
            return Err(FenParseError::OpponentInCheck);
        }

        Ok(state)
    }

    /// The piece placement and side-to-move fields of this position's FEN.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for (row, cells) in self.board.rows().enumerate() {
            let mut empty_squares = 0;
            for cell in cells {
                if let Some(piece) = cell {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf.push(' ');
        write!(&mut buf, "{}", self.side_to_move).unwrap();
        buf
    }

    /// Builds a move from coordinate notation such as `e2e4`, using the current board to record
    /// the moving and captured pieces. Returns `None` if the string is not two squares.
    pub fn move_from_notation(&self, notation: &str) -> Option<Move> {
        if notation.len() != 4 || !notation.is_ascii() {
            return None;
        }

        let start = Square::try_from(&notation[0..2]).ok()?;
        let end = Square::try_from(&notation[2..4]).ok()?;
        Some(Move::new(start, end, &self.board))
    }
}

// Starting counts per piece kind, indexed by `PieceKind`.
static STARTING_COUNTS: [usize; 6] = [8, 2, 2, 2, 1, 1];

// Each piece beyond the starting set must be a promoted pawn, so pawns plus extras never exceed
// eight. This also caps the pseudo-legal move count well under the capacity of `MoveVec`.
fn check_material(board: &Board) -> Result<(), FenParseError> {
    let mut counts = [[0usize; 6]; 2];
    for (_, piece) in board.occupied() {
        counts[piece.color.as_index()][piece.kind.as_index()] += 1;
    }

    for side in &counts {
        let promoted: usize = side
            .iter()
            .zip(STARTING_COUNTS.iter())
            .skip(1)
            .map(|(&count, &start)| count.saturating_sub(start))
            .sum();
        if side[PieceKind::Pawn.as_index()] + promoted > 8 {
            return Err(FenParseError::TooManyPieces);
        }
    }

    Ok(())
}

//
// Trait implementations
//

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

// Used by tests that check a make/undo pair leaves no trace.
#[cfg(test)]
pub(crate) fn assert_same_position(expected: &GameState, actual: &GameState) {
    use crate::types::COLORS;

    assert_eq!(expected.board, actual.board);
    assert_eq!(expected.side_to_move, actual.side_to_move);
    for &color in &COLORS {
        assert_eq!(expected.king_square(color), actual.king_square(color));
    }
    assert_eq!(expected.move_log.len(), actual.move_log.len());
}
