// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chess_engine::{Board, Color, GameState, Piece, PieceKind, Square, COLORS};

fn snapshot(state: &GameState) -> (Board, Color, Vec<Option<Square>>) {
    let kings = COLORS.iter().map(|&c| state.king_square(c)).collect();
    (*state.board(), state.side_to_move(), kings)
}

#[test]
fn smoke_test_opening_pawn() {
    let mut state = GameState::new();

    // nothing fancy, move a pawn up one.
    let mov = state.move_from_notation("e2e3").unwrap();
    state.make_move(mov);

    // it should now be Black's turn to move.
    assert_eq!(Color::Black, state.side_to_move());

    // there should be a pawn on e3
    let pawn = state.piece_at(Square::new(5, 4)).unwrap();
    assert_eq!(PieceKind::Pawn, pawn.kind);
    assert_eq!(Color::White, pawn.color);

    // there should not be a pawn on e2
    assert!(state.piece_at(Square::new(6, 4)).is_none());
}

#[test]
fn basic_capture() {
    let mut state = GameState::from_fen("8/8/8/8/5p2/4P3/8/8 w - - 2 1").unwrap();
    let mov = state.move_from_notation("e3f4").unwrap();
    assert!(mov.is_capture());
    state.make_move(mov);

    // There should be a white pawn on F4
    let piece = state.piece_at(Square::new(4, 5)).unwrap();
    assert_eq!(PieceKind::Pawn, piece.kind);
    assert_eq!(Color::White, piece.color);

    // There should be no piece on E3
    assert!(state.piece_at(Square::new(5, 4)).is_none());
}

#[test]
fn basic_promotion() {
    let mut state = GameState::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mov = state.move_from_notation("e7e8").unwrap();
    assert!(mov.is_promotion());
    state.make_legal_move(mov).unwrap();

    // there should be a queen on e8
    let queen = state.piece_at(Square::new(0, 4)).unwrap();
    assert_eq!(Piece::new(PieceKind::Queen, Color::White), queen);

    // and taking it back gives the pawn back
    state.undo_move();
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        state.piece_at(Square::new(1, 4))
    );
    assert!(state.piece_at(Square::new(0, 4)).is_none());
}

#[test]
fn black_promote_capture() {
    let mut state = GameState::from_fen("7k/8/8/8/8/8/4p3/K2R4 b - - 0 1").unwrap();
    let mov = state.move_from_notation("e2d1").unwrap();
    assert!(mov.is_promotion());
    assert!(mov.is_capture());
    state.make_legal_move(mov).unwrap();

    let queen = state.piece_at(Square::new(7, 3)).unwrap();
    assert_eq!(Piece::new(PieceKind::Queen, Color::Black), queen);

    state.undo_move();
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        state.piece_at(Square::new(7, 3))
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        state.piece_at(Square::new(6, 4))
    );
}

#[test]
fn round_trip_every_legal_move() {
    // a middlegame position with captures, checks and promotions on offer.
    let fen = "r3k2r/pP1pqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PpPBBPPP/R3K2R w";
    let mut state = GameState::from_fen(fen).unwrap();
    for &side in &[Color::White, Color::Black] {
        if state.side_to_move() != side {
            let mov = state.move_from_notation("e1d1").unwrap();
            state.make_legal_move(mov).unwrap();
        }

        for mov in state.valid_moves() {
            let before = snapshot(&state);
            state.make_move(mov);
            assert_ne!(before, snapshot(&state));
            state.undo_move();
            assert_eq!(before, snapshot(&state), "round trip failed for {}", mov);
        }
    }
}

#[test]
fn nested_make_undo() {
    let mut state = GameState::new();
    let start = snapshot(&state);
    let mut depth = 0;
    for notation in &["d2d4", "e7e5", "d4e5", "e8e7", "e5e6"] {
        let mov = state.move_from_notation(notation).unwrap();
        state.make_legal_move(mov).unwrap();
        depth += 1;
    }

    assert_eq!(Some(Square::new(1, 4)), state.king_square(Color::Black));
    for _ in 0..depth {
        state.undo_move();
    }

    assert_eq!(start, snapshot(&state));
    assert!(state.move_log().is_empty());
}
