use super::*;
use crate::board::Special;
use crate::error::RulesError;

fn game(placement: &str, side: Color) -> Game {
    Game::from_board(Board::from_placement(placement).unwrap(), side)
}

fn play(g: &mut Game, from: &str, to: &str) -> MoveOutcome {
    g.play(sq(from), sq(to), None)
}

#[test]
fn test_new_game_starts_with_white() {
    let g = Game::new();
    assert_eq!(g.side_to_move(), Color::White);
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.board(), &Board::standard());
    assert!(g.last_move().is_none());
}

#[test]
fn test_turns_alternate() {
    let mut g = Game::new();
    assert_eq!(play(&mut g, "e7", "e5"), MoveOutcome::Rejected, "black first");
    assert!(play(&mut g, "e2", "e4").is_accepted());
    assert_eq!(g.side_to_move(), Color::Black);
    assert_eq!(play(&mut g, "d2", "d4"), MoveOutcome::Rejected, "white twice");
    assert!(play(&mut g, "e7", "e5").is_accepted());
    assert_eq!(g.side_to_move(), Color::White);
    assert_eq!(g.last_move().map(|r| r.to), Some(sq("e5")));
}

#[test]
fn test_rejected_move_keeps_state() {
    let mut g = Game::new();
    assert_eq!(play(&mut g, "e2", "e5"), MoveOutcome::Rejected);
    assert_eq!(play(&mut g, "e3", "e4"), MoveOutcome::Rejected);
    assert_eq!(g.side_to_move(), Color::White);
    assert_eq!(g.board(), &Board::standard());
    assert!(!g.undo(), "nothing was recorded");
}

#[test]
fn test_check_is_reported() {
    let mut g = game("4k3/8/8/8/8/8/8/R3K3", Color::White);
    assert!(play(&mut g, "a1", "a8").is_accepted());
    assert_eq!(g.status(), GameStatus::Check);
    assert!(!g.is_over());
}

#[test]
fn test_fools_mate_ends_the_game() {
    let mut g = Game::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert!(play(&mut g, from, to).is_accepted(), "{from}{to}");
    }
    assert_eq!(
        g.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
    assert!(g.is_over());
    assert_eq!(play(&mut g, "e1", "f2"), MoveOutcome::Rejected);
    assert!(g.select(Some(sq("a2"))).is_empty());

    assert!(g.undo());
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.side_to_move(), Color::Black);
}

#[test]
fn test_stalemate_ends_the_game() {
    let mut g = game("k7/2K5/8/1Q6/8/8/8/8", Color::White);
    assert_eq!(g.status(), GameStatus::Playing);
    assert!(play(&mut g, "b5", "b6").is_accepted());
    assert_eq!(g.status(), GameStatus::Stalemate);
    assert!(g.is_over());
}

#[test]
fn test_promotion_with_choice_completes_the_ply() {
    let mut g = game("4k3/P7/8/8/8/8/8/4K3", Color::White);
    let out = g.play(sq("a7"), sq("a8"), Some(PieceKind::Queen));
    assert!(matches!(out, MoveOutcome::Completed(r) if r.special == Special::Promotion));
    assert_eq!(
        g.board().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
    assert_eq!(g.side_to_move(), Color::Black);
    assert_eq!(g.status(), GameStatus::Check);
}

#[test]
fn test_promotion_without_choice_waits() {
    let mut g = game("4k3/P7/8/8/8/8/8/4K3", Color::White);
    let out = play(&mut g, "a7", "a8");
    assert!(matches!(out, MoveOutcome::AwaitingPromotion(_)));
    assert_eq!(g.status(), GameStatus::AwaitingPromotion);
    assert_eq!(g.side_to_move(), Color::White);

    assert_eq!(play(&mut g, "e1", "d1"), MoveOutcome::Rejected);
    assert_eq!(play(&mut g, "e8", "d8"), MoveOutcome::Rejected);
    assert!(g.select(Some(sq("e1"))).is_empty());

    assert!(matches!(
        g.promote(PieceKind::King),
        Err(RulesError::InvalidPromotion(PieceKind::King))
    ));
    assert_eq!(g.status(), GameStatus::AwaitingPromotion);

    g.promote(PieceKind::Knight).unwrap();
    assert_eq!(
        g.board().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Knight)
    );
    assert_eq!(g.side_to_move(), Color::Black);
    assert_eq!(g.status(), GameStatus::Playing);
    assert!(matches!(
        g.promote(PieceKind::Queen),
        Err(RulesError::NoPendingPromotion)
    ));
}

#[test]
fn test_refused_promotion_choice_leaves_it_pending() {
    let mut g = game("4k3/P7/8/8/8/8/8/4K3", Color::White);
    let out = g.play(sq("a7"), sq("a8"), Some(PieceKind::Pawn));
    assert!(matches!(out, MoveOutcome::AwaitingPromotion(_)));
    assert_eq!(g.status(), GameStatus::AwaitingPromotion);
    g.promote(PieceKind::Rook).unwrap();
    assert_eq!(g.status(), GameStatus::Check);
}

#[test]
fn test_undo_steps_back_one_ply() {
    let mut g = Game::new();
    play(&mut g, "e2", "e4");
    play(&mut g, "d7", "d5");
    assert!(g.undo());
    assert_eq!(g.side_to_move(), Color::Black);
    assert_eq!(g.board().en_passant(), Some(sq("e4")));
    assert!(g.undo());
    assert_eq!(g.board(), &Board::standard());
    assert_eq!(g.side_to_move(), Color::White);
    assert!(!g.undo());
}

#[test]
fn test_undo_pending_promotion() {
    let mut g = game("4k3/P7/8/8/8/8/8/4K3", Color::White);
    play(&mut g, "a7", "a8");
    assert!(g.undo());
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.board().pending_promotion(), None);
    assert_eq!(
        g.board().piece_at(sq("a7")).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
}

#[test]
fn test_history_limit_bounds_undo() {
    let cfg = GameConfig {
        history_limit: 2,
        ..GameConfig::default()
    };
    let mut g = Game::from_config(&cfg).unwrap();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3")] {
        assert!(play(&mut g, from, to).is_accepted());
    }
    assert!(g.undo());
    assert!(g.undo());
    assert!(!g.undo());
    assert_eq!(g.side_to_move(), Color::Black);

    let cfg = GameConfig {
        history_limit: 0,
        ..GameConfig::default()
    };
    let mut g = Game::from_config(&cfg).unwrap();
    play(&mut g, "e2", "e4");
    assert!(!g.undo());
}

#[test]
fn test_select_highlights_side_to_move_only() {
    let mut g = Game::new();
    let mut targets = g.select(Some(sq("e2")));
    targets.sort();
    let mut expected = vec![sq("e3"), sq("e4")];
    expected.sort();
    assert_eq!(targets, expected);
    assert!(g.board().cell(sq("e4")).available);

    assert!(g.select(Some(sq("e7"))).is_empty(), "not black's turn");
    assert!(g.board().cells().iter().all(|c| !c.available));

    g.select(Some(sq("g1")));
    assert!(g.select(None).is_empty());
    assert!(g.board().cells().iter().all(|c| !c.available));
}

#[test]
fn test_playing_a_move_clears_highlight() {
    let mut g = Game::new();
    g.select(Some(sq("e2")));
    play(&mut g, "e2", "e4");
    assert!(g.board().cells().iter().all(|c| !c.available));
}

#[test]
fn test_from_config_uses_placement_and_side() {
    let cfg = GameConfig::from_toml_str(
        r#"
        placement = "4k3/8/8/8/8/8/8/R3K3"
        first_to_move = "black"
        "#,
    )
    .unwrap();
    let g = Game::from_config(&cfg).unwrap();
    assert_eq!(g.side_to_move(), Color::Black);
    assert_eq!(g.board().pieces(Color::White).count(), 2);

    for bad in ["8/8/8", "8/8/8/8/8/8/8/8", "4k3/8/8/8/8/8/8/K3K3"] {
        let cfg = GameConfig {
            placement: bad.into(),
            ..GameConfig::default()
        };
        assert!(
            matches!(
                Game::from_config(&cfg),
                Err(RulesError::InvalidPlacement(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_promotion_choice_without_promotion_is_ignored() {
    let mut g = Game::new();
    let out = g.play(sq("e2"), sq("e4"), Some(PieceKind::Queen));
    assert!(matches!(out, MoveOutcome::Completed(r) if r.special == Special::DoubleStep));
    assert_eq!(
        g.board().piece_at(sq("e4")).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
    assert_eq!(g.side_to_move(), Color::Black);
}
