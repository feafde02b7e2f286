//! Move generation and attack detection.
//!
//! Generation is two-phase: per-piece pseudo-legal candidates, then a
//! king-safety filter that applies each candidate to a scratch position.
//! Castling is the exception; its in/through/into-check conditions are
//! enforced at generation time because they involve squares other than
//! the king's destination.

use crate::moves::{Move, MoveKind};
use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Pawns advance toward row 0 for White, row 7 for Black.
#[inline]
fn forward(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// All legal moves for the side to move. Empty exactly when the game
/// is over by checkmate or stalemate.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move;
    pseudo_legal_moves(pos)
        .into_iter()
        .filter(|&mv| !is_in_check(&pos.apply_unchecked(mv), us))
        .collect()
}

/// Candidate moves before king-safety filtering.
fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move;
    let mut moves = Vec::with_capacity(48);
    for row in 0..8u8 {
        for col in 0..8u8 {
            let sq = Square::new(row, col);
            let Some(piece) = pos.piece_at(sq) else {
                continue;
            };
            if piece.color != us {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => pawn_moves(pos, sq, us, &mut moves),
                PieceKind::Knight => leaper_moves(pos, sq, us, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => slider_moves(pos, sq, us, &BISHOP_DIRS, &mut moves),
                PieceKind::Rook => slider_moves(pos, sq, us, &ROOK_DIRS, &mut moves),
                PieceKind::Queen => {
                    slider_moves(pos, sq, us, &BISHOP_DIRS, &mut moves);
                    slider_moves(pos, sq, us, &ROOK_DIRS, &mut moves);
                }
                PieceKind::King => {
                    leaper_moves(pos, sq, us, &KING_OFFSETS, &mut moves);
                    castling_moves(pos, sq, us, &mut moves);
                }
            }
        }
    }
    moves
}

fn push_pawn_advance(from: Square, to: Square, last_rank: u8, moves: &mut Vec<Move>) {
    if to.row == last_rank {
        for kind in PROMOTION_KINDS {
            moves.push(Move {
                from,
                to,
                kind: MoveKind::Quiet,
                promotion: Some(kind),
            });
        }
    } else {
        moves.push(Move::quiet(from, to));
    }
}

fn pawn_moves(pos: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    let fwd = forward(us);
    let (start_row, last_rank) = match us {
        Color::White => (6, 0),
        Color::Black => (1, 7),
    };

    if let Some(one) = from.offset(fwd, 0) {
        if pos.piece_at(one).is_none() {
            push_pawn_advance(from, one, last_rank, moves);
            if from.row == start_row {
                let two = from.offset(2 * fwd, 0).expect("double step from start row");
                if pos.piece_at(two).is_none() {
                    moves.push(Move::quiet(from, two));
                }
            }
        }
    }

    for dc in [-1i8, 1] {
        let Some(to) = from.offset(fwd, dc) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != us => {
                if to.row == last_rank {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move {
                            from,
                            to,
                            kind: MoveKind::Capture,
                            promotion: Some(kind),
                        });
                    }
                } else {
                    moves.push(Move::capture(from, to));
                }
            }
            Some(_) => {}
            None => {
                if pos.en_passant == Some(to) {
                    moves.push(Move {
                        from,
                        to,
                        kind: MoveKind::EnPassant,
                        promotion: None,
                    });
                }
            }
        }
    }
}

fn leaper_moves(
    pos: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match pos.piece_at(to) {
            None => moves.push(Move::quiet(from, to)),
            Some(p) if p.color != us => moves.push(Move::capture(from, to)),
            Some(_) => {}
        }
    }
}

fn slider_moves(
    pos: &Position,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match pos.piece_at(to) {
                None => {
                    moves.push(Move::quiet(from, to));
                    cur = to;
                }
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::capture(from, to));
                    }
                    break;
                }
            }
        }
    }
}

fn castling_moves(pos: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    let home_row = match us {
        Color::White => 7u8,
        Color::Black => 0,
    };
    // Castling only ever starts from the king's home square.
    if from != Square::new(home_row, 4) {
        return;
    }
    let them = us.opponent();
    let rook = Piece::new(PieceKind::Rook, us);
    let row = home_row;

    if pos.castling.kingside(us)
        && pos.piece_at(Square::new(row, 7)) == Some(rook)
        && pos.piece_at(Square::new(row, 5)).is_none()
        && pos.piece_at(Square::new(row, 6)).is_none()
        && !is_square_attacked(pos, Square::new(row, 4), them)
        && !is_square_attacked(pos, Square::new(row, 5), them)
        && !is_square_attacked(pos, Square::new(row, 6), them)
    {
        moves.push(Move {
            from,
            to: Square::new(row, 6),
            kind: MoveKind::CastleKingside,
            promotion: None,
        });
    }

    if pos.castling.queenside(us)
        && pos.piece_at(Square::new(row, 0)) == Some(rook)
        && pos.piece_at(Square::new(row, 1)).is_none()
        && pos.piece_at(Square::new(row, 2)).is_none()
        && pos.piece_at(Square::new(row, 3)).is_none()
        && !is_square_attacked(pos, Square::new(row, 4), them)
        && !is_square_attacked(pos, Square::new(row, 3), them)
        && !is_square_attacked(pos, Square::new(row, 2), them)
    {
        moves.push(Move {
            from,
            to: Square::new(row, 2),
            kind: MoveKind::CastleQueenside,
            promotion: None,
        });
    }
}

/// Whether any piece of `by` attacks `sq`. Pawns count only their
/// capture diagonals, never their push squares.
pub fn is_square_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    // A pawn of `by` on row sq.row - forward(by) attacks sq diagonally.
    let pawn_row = sq.row as i8 - forward(by);
    for dc in [-1i8, 1] {
        if let Some(origin) = Square::try_new(pawn_row, sq.col as i8 + dc) {
            if pos.piece_at(origin) == Some(Piece::new(PieceKind::Pawn, by)) {
                return true;
            }
        }
    }

    for &(dr, dc) in &KNIGHT_OFFSETS {
        if let Some(origin) = sq.offset(dr, dc) {
            if pos.piece_at(origin) == Some(Piece::new(PieceKind::Knight, by)) {
                return true;
            }
        }
    }

    for &(dr, dc) in &KING_OFFSETS {
        if let Some(origin) = sq.offset(dr, dc) {
            if pos.piece_at(origin) == Some(Piece::new(PieceKind::King, by)) {
                return true;
            }
        }
    }

    for &(dr, dc) in &BISHOP_DIRS {
        if let Some(p) = first_piece_along(pos, sq, dr, dc) {
            if p.color == by && matches!(p.kind, PieceKind::Bishop | PieceKind::Queen) {
                return true;
            }
        }
    }
    for &(dr, dc) in &ROOK_DIRS {
        if let Some(p) = first_piece_along(pos, sq, dr, dc) {
            if p.color == by && matches!(p.kind, PieceKind::Rook | PieceKind::Queen) {
                return true;
            }
        }
    }
    false
}

fn first_piece_along(pos: &Position, from: Square, dr: i8, dc: i8) -> Option<Piece> {
    let mut cur = from;
    while let Some(next) = cur.offset(dr, dc) {
        if let Some(p) = pos.piece_at(next) {
            return Some(p);
        }
        cur = next;
    }
    None
}

/// Whether `color`'s king is attacked. A missing king (only possible
/// on hand-built boards) reads as not in check.
pub fn is_in_check(pos: &Position, color: Color) -> bool {
    match pos.king_square(color) {
        Some(sq) => is_square_attacked(pos, sq, color.opponent()),
        None => false,
    }
}

/// Legal-move-tree leaf count to the given depth. A debugging and
/// regression tool for the generator, not a search primitive.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&pos.apply_unchecked(mv), depth - 1))
        .sum()
}
