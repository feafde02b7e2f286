//! Board state and move application.

use crate::error::{IllegalMoveError, InvalidPositionError};
use crate::movegen::legal_moves;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingRights, Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// Full game state: board, side to move, castling rights, en passant
/// target, and the two move counters.
///
/// Positions are values. [`apply`](Position::apply) and
/// [`apply_unchecked`](Position::apply_unchecked) return a new position
/// and leave the receiver untouched, so search trees can hold many
/// positions without undo logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// `board[row][col]`, row 0 = Black's back rank.
    pub board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square a double-stepped pawn skipped over, capturable this ply only.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture. 100 triggers the
    /// fifty-move draw.
    pub halfmove_clock: u16,
    /// Starts at 1, increments after each Black move.
    pub fullmove_number: u16,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = [[None; 8]; 8];
        for (col, &kind) in back.iter().enumerate() {
            board[0][col] = Some(Piece::new(kind, Color::Black));
            board[7][col] = Some(Piece::new(kind, Color::White));
        }
        for col in 0..8 {
            board[1][col] = Some(Piece::new(Pawn, Color::Black));
            board[6][col] = Some(Piece::new(Pawn, Color::White));
        }
        Self {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// An empty board with no castling rights. Pieces are added with
    /// [`place`](Position::place); intended for composing test and
    /// study positions.
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Put a piece on a square, replacing whatever was there.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.board[sq.row as usize][sq.col as usize] = Some(piece);
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.row as usize][sq.col as usize]
    }

    /// Locate `color`'s king. `None` only on malformed boards; every
    /// position built through the public constructors and `apply` has
    /// both kings.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        for row in 0..8u8 {
            for col in 0..8u8 {
                if let Some(p) = self.board[row as usize][col as usize] {
                    if p.kind == PieceKind::King && p.color == color {
                        return Some(Square::new(row, col));
                    }
                }
            }
        }
        None
    }

    /// Structural sanity check for externally assembled positions:
    /// exactly one king per side, no pawns on either back rank.
    pub fn validate(&self) -> Result<(), InvalidPositionError> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .board
                .iter()
                .flatten()
                .filter(|p| **p == Some(Piece::new(PieceKind::King, color)))
                .count();
            match kings {
                0 => return Err(InvalidPositionError::MissingKing(color)),
                1 => {}
                _ => return Err(InvalidPositionError::TooManyKings(color)),
            }
        }
        for row in [0usize, 7] {
            for col in 0..8 {
                if let Some(p) = self.board[row][col] {
                    if p.kind == PieceKind::Pawn {
                        return Err(InvalidPositionError::PawnOnBackRank(p.color));
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply a caller-supplied move after checking it against the legal
    /// set. Matching is by from/to square plus promotion piece; a
    /// missing promotion piece on a promoting move defaults to Queen.
    pub fn apply(&self, mv: Move) -> Result<Position, IllegalMoveError> {
        let legal = legal_moves(self);
        let chosen = legal.into_iter().find(|m| {
            if m.from != mv.from || m.to != mv.to {
                return false;
            }
            match (m.promotion, mv.promotion) {
                (None, None) => true,
                (Some(have), Some(want)) => have == want,
                (Some(have), None) => have == PieceKind::Queen,
                (None, Some(_)) => false,
            }
        });
        match chosen {
            Some(m) => Ok(self.apply_unchecked(m)),
            None => Err(IllegalMoveError {
                mv,
                side: self.side_to_move,
            }),
        }
    }

    /// Apply a move that is known to be legal (it came out of
    /// [`legal_moves`]). Feeding it anything else leaves the position
    /// in an arbitrary but memory-safe state.
    pub fn apply_unchecked(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let us = self.side_to_move;
        let piece = self
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("no piece on {} to move", mv.from));

        let captured = match mv.kind {
            MoveKind::EnPassant => {
                // The captured pawn sits behind the destination square,
                // on the capturing side's pawn-advance axis.
                let back = match us {
                    Color::White => 1i8,
                    Color::Black => -1,
                };
                let victim = mv
                    .to
                    .offset(back, 0)
                    .expect("en passant victim square on the board");
                let taken = next.board[victim.row as usize][victim.col as usize].take();
                debug_assert_eq!(
                    taken.map(|p| p.kind),
                    Some(PieceKind::Pawn),
                    "en passant must capture a pawn"
                );
                taken
            }
            _ => self.piece_at(mv.to),
        };

        next.board[mv.from.row as usize][mv.from.col as usize] = None;
        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, us),
            None => {
                let last_rank = match us {
                    Color::White => 0,
                    Color::Black => 7,
                };
                if piece.kind == PieceKind::Pawn && mv.to.row == last_rank {
                    Piece::new(PieceKind::Queen, us)
                } else {
                    piece
                }
            }
        };
        next.board[mv.to.row as usize][mv.to.col as usize] = Some(placed);

        // Castling relocates the rook as well.
        match mv.kind {
            MoveKind::CastleKingside => {
                let row = mv.from.row as usize;
                let rook = next.board[row][7].take();
                next.board[row][5] = rook;
            }
            MoveKind::CastleQueenside => {
                let row = mv.from.row as usize;
                let rook = next.board[row][0].take();
                next.board[row][3] = rook;
            }
            _ => {}
        }

        // En passant target exists for exactly one reply.
        next.en_passant = None;
        if piece.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2 {
            let mid = (mv.from.row + mv.to.row) / 2;
            next.en_passant = Some(Square::new(mid, mv.from.col));
        }

        next.update_castling_rights(piece, mv, captured);

        if piece.kind == PieceKind::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = self.halfmove_clock + 1;
        }
        if us == Color::Black {
            next.fullmove_number = self.fullmove_number + 1;
        }
        next.side_to_move = us.opponent();
        next
    }

    fn update_castling_rights(&mut self, piece: Piece, mv: Move, captured: Option<Piece>) {
        let us = piece.color;
        match piece.kind {
            PieceKind::King => self.castling.revoke_all(us),
            PieceKind::Rook => {
                let home_row = match us {
                    Color::White => 7,
                    Color::Black => 0,
                };
                if mv.from.row == home_row {
                    if mv.from.col == 0 {
                        self.castling.revoke_queenside(us);
                    } else if mv.from.col == 7 {
                        self.castling.revoke_kingside(us);
                    }
                }
            }
            _ => {}
        }
        // Capturing a rook on its home square kills that side's right
        // even though the opponent never moved it.
        if captured.map(|p| p.kind) == Some(PieceKind::Rook) {
            let them = us.opponent();
            let their_home_row = match them {
                Color::White => 7,
                Color::Black => 0,
            };
            if mv.to.row == their_home_row {
                if mv.to.col == 0 {
                    self.castling.revoke_queenside(them);
                } else if mv.to.col == 7 {
                    self.castling.revoke_kingside(them);
                }
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_startpos_layout() {
        let pos = Position::startpos();
        assert_eq!(
            pos.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            pos.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            pos.piece_at(sq("a2")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert!(pos.piece_at(sq("e4")).is_none());
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.fullmove_number, 1);
        assert!(pos.validate().is_ok());
    }

    #[test]
    fn test_apply_pawn_double_step_sets_en_passant() {
        let pos = Position::startpos();
        let next = pos.apply(Move::quiet(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(next.en_passant, Some(sq("e3")));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.halfmove_clock, 0);
        // Single step does not.
        let next = pos.apply(Move::quiet(sq("e2"), sq("e3"))).unwrap();
        assert_eq!(next.en_passant, None);
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let pos = Position::startpos();
        let pos = pos.apply(Move::quiet(sq("e2"), sq("e4"))).unwrap();
        assert!(pos.en_passant.is_some());
        let pos = pos.apply(Move::quiet(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(pos.en_passant, None);
    }

    #[test]
    fn test_en_passant_capture_removes_victim() {
        let mut pos = Position::empty(Color::White);
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        pos.place(sq("e8"), Piece::new(PieceKind::King, Color::Black));
        pos.place(sq("e5"), Piece::new(PieceKind::Pawn, Color::White));
        pos.place(sq("d7"), Piece::new(PieceKind::Pawn, Color::Black));
        let pos = pos.side_to(Color::Black);
        let pos = pos.apply(Move::quiet(sq("d7"), sq("d5"))).unwrap();
        assert_eq!(pos.en_passant, Some(sq("d6")));

        let ep = Move {
            from: sq("e5"),
            to: sq("d6"),
            kind: MoveKind::EnPassant,
            promotion: None,
        };
        let after = pos.apply(ep).unwrap();
        assert!(after.piece_at(sq("d5")).is_none(), "victim pawn removed");
        assert_eq!(
            after.piece_at(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn test_apply_rejects_illegal_move() {
        let pos = Position::startpos();
        let err = pos.apply(Move::quiet(sq("e2"), sq("e5"))).unwrap_err();
        assert_eq!(err.side, Color::White);
        // Moving the opponent's piece is also illegal.
        assert!(pos.apply(Move::quiet(sq("e7"), sq("e5"))).is_err());
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut pos = Position::empty(Color::White);
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        pos.place(sq("h8"), Piece::new(PieceKind::King, Color::Black));
        pos.place(sq("a7"), Piece::new(PieceKind::Pawn, Color::White));

        let after = pos.apply(Move::quiet(sq("a7"), sq("a8"))).unwrap();
        assert_eq!(
            after.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );

        let mut under = Move::quiet(sq("a7"), sq("a8"));
        under.promotion = Some(PieceKind::Knight);
        let after = pos.apply(under).unwrap();
        assert_eq!(
            after.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut pos = Position::empty(Color::White);
        pos.castling = CastlingRights::all();
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        pos.place(sq("h1"), Piece::new(PieceKind::Rook, Color::White));
        pos.place(sq("a1"), Piece::new(PieceKind::Rook, Color::White));
        pos.place(sq("e8"), Piece::new(PieceKind::King, Color::Black));

        let after = pos.apply(Move::quiet(sq("e1"), sq("g1"))).unwrap();
        assert_eq!(
            after.piece_at(sq("g1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            after.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(after.piece_at(sq("h1")).is_none());
        assert!(!after.castling.kingside(Color::White));
        assert!(!after.castling.queenside(Color::White));
    }

    #[test]
    fn test_rook_move_revokes_one_side() {
        let pos = Position::startpos();
        let pos = pos.apply(Move::quiet(sq("a2"), sq("a4"))).unwrap();
        let pos = pos.apply(Move::quiet(sq("a7"), sq("a5"))).unwrap();
        let pos = pos.apply(Move::quiet(sq("a1"), sq("a3"))).unwrap();
        assert!(!pos.castling.queenside(Color::White));
        assert!(pos.castling.kingside(Color::White));
        assert!(pos.castling.queenside(Color::Black));
    }

    #[test]
    fn test_rook_captured_on_home_square_revokes_right() {
        let mut pos = Position::empty(Color::White);
        pos.castling = CastlingRights::all();
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        pos.place(sq("e8"), Piece::new(PieceKind::King, Color::Black));
        pos.place(sq("h8"), Piece::new(PieceKind::Rook, Color::Black));
        pos.place(sq("h1"), Piece::new(PieceKind::Rook, Color::White));
        pos.place(sq("g6"), Piece::new(PieceKind::Knight, Color::White));

        let after = pos.apply(Move::capture(sq("g6"), sq("h8"))).unwrap();
        assert!(!after.castling.kingside(Color::Black));
        assert!(after.castling.queenside(Color::Black));
        assert!(after.castling.kingside(Color::White));
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn test_move_counters() {
        let pos = Position::startpos();
        let pos = pos.apply(Move::quiet(sq("g1"), sq("f3"))).unwrap();
        assert_eq!(pos.halfmove_clock, 1);
        assert_eq!(pos.fullmove_number, 1);
        let pos = pos.apply(Move::quiet(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(pos.halfmove_clock, 2);
        assert_eq!(pos.fullmove_number, 2);
        let pos = pos.apply(Move::quiet(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(pos.halfmove_clock, 0, "pawn move resets the clock");
    }

    #[test]
    fn test_validate_catches_malformed_boards() {
        let mut pos = Position::empty(Color::White);
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        assert_eq!(
            pos.validate(),
            Err(InvalidPositionError::MissingKing(Color::Black))
        );

        pos.place(sq("e8"), Piece::new(PieceKind::King, Color::Black));
        assert!(pos.validate().is_ok());

        pos.place(sq("a8"), Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(
            pos.validate(),
            Err(InvalidPositionError::PawnOnBackRank(Color::White))
        );
    }

    impl Position {
        /// Test helper: same position with a different side to move.
        fn side_to(mut self, color: Color) -> Self {
            self.side_to_move = color;
            self
        }
    }
}
