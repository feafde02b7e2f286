//! Full-game scenarios exercising the rules pipeline end to end.

use chess_core::{
    classify, is_in_check, legal_moves, Color, GameOutcome, Move, Position, Square,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn mv(from: &str, to: &str) -> Move {
    Move::quiet(
        Square::from_algebraic(from).unwrap(),
        Square::from_algebraic(to).unwrap(),
    )
}

fn play(pos: Position, moves: &[(&str, &str)]) -> Position {
    moves.iter().fold(pos, |p, &(from, to)| {
        p.apply(mv(from, to))
            .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"))
    })
}

#[test]
fn scholars_mate_ends_in_checkmate() {
    let pos = play(
        Position::startpos(),
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
            ("h5", "f7"),
        ],
    );
    assert_eq!(
        classify(&pos),
        GameOutcome::Checkmate {
            winner: Color::White
        }
    );
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn fools_mate_is_the_fastest_loss() {
    let pos = play(
        Position::startpos(),
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
    assert_eq!(
        classify(&pos),
        GameOutcome::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn both_sides_can_castle_kingside_in_a_real_game() {
    let pos = play(
        Position::startpos(),
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("g8", "f6"),
            ("f1", "c4"),
            ("f8", "c5"),
            ("e1", "g1"),
            ("e8", "g8"),
        ],
    );
    // Kings on g1/g8, rooks on f1/f8, rights gone.
    assert_eq!(
        pos.king_square(Color::White),
        Some(Square::from_algebraic("g1").unwrap())
    );
    assert_eq!(
        pos.king_square(Color::Black),
        Some(Square::from_algebraic("g8").unwrap())
    );
    assert!(!pos.castling.kingside(Color::White));
    assert!(!pos.castling.queenside(Color::Black));
    assert_eq!(classify(&pos), GameOutcome::Ongoing);
}

#[test]
fn en_passant_window_in_a_real_game() {
    let pos = play(
        Position::startpos(),
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    let ep_target = Square::from_algebraic("d6").unwrap();
    assert_eq!(pos.en_passant, Some(ep_target));
    let capture = legal_moves(&pos)
        .into_iter()
        .find(|m| m.to == ep_target && m.is_capture())
        .expect("en passant capture available");
    let after = pos.apply(capture).unwrap();
    assert!(after
        .piece_at(Square::from_algebraic("d5").unwrap())
        .is_none());
}

#[test]
fn random_play_never_leaves_own_king_in_check() {
    // Seeded random games: every generated move, once applied, must leave
    // the moving side's king safe and the position structurally valid.
    for seed in 0..4u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        for _ in 0..120 {
            let moves = legal_moves(&pos);
            if classify(&pos).is_terminal() {
                break;
            }
            let mover = pos.side_to_move;
            let m = *moves.choose(&mut rng).expect("ongoing game has moves");
            pos = pos.apply(m).unwrap();
            assert!(!is_in_check(&pos, mover), "seed {seed}: {m} left check");
            assert!(pos.validate().is_ok());
        }
    }
}

#[test]
fn classify_is_idempotent() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let mut pos = Position::startpos();
    for _ in 0..30 {
        assert_eq!(classify(&pos), classify(&pos));
        let moves = legal_moves(&pos);
        if moves.is_empty() {
            break;
        }
        pos = pos.apply_unchecked(*moves.choose(&mut rng).unwrap());
    }
}

#[test]
fn every_legal_move_from_startpos_applies_cleanly() {
    let pos = Position::startpos();
    for m in legal_moves(&pos) {
        let next = pos.apply(m).unwrap();
        assert_eq!(next.side_to_move, Color::Black);
        assert!(next.validate().is_ok());
    }
}
