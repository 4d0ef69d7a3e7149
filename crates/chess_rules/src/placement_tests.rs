use super::*;

#[test]
fn test_standard_placement_matches_standard_board() {
    let b = Board::from_placement(STANDARD_PLACEMENT).unwrap();
    assert_eq!(b, Board::standard());
    assert_eq!(b.placement(), STANDARD_PLACEMENT);
}

#[test]
fn test_placement_roundtrip() {
    for p in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        "8/8/8/3k4/8/3K4/8/8",
        "4k3/8/8/8/8/8/8/4K2R",
    ] {
        assert_eq!(Board::from_placement(p).unwrap().placement(), p);
    }
}

#[test]
fn test_rejects_malformed_placements() {
    for bad in [
        "",
        "8/8/8/8/8/8/8",
        "8/8/8/8/8/8/8/8/8",
        "9/8/8/8/8/8/8/8",
        "0k7/8/8/8/8/8/8/8",
        "7/8/8/8/8/8/8/8",
        "ppppppppp/8/8/8/8/8/8/8",
        "4k3/8/8/8/8/8/8/4X3",
        "k7p/8/8/8/8/8/8/8",
    ] {
        assert!(
            matches!(
                Board::from_placement(bad),
                Err(RulesError::InvalidPlacement(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_moved_flags_are_inferred() {
    let b = Board::from_placement("r3k3/1p6/8/8/4P3/8/P7/1R2K2R").unwrap();
    let moved = |s: &str| b.piece_at(sq(s)).unwrap().has_moved;

    assert!(!moved("e1"));
    assert!(!moved("e8"));
    assert!(!moved("h1"));
    assert!(!moved("a8"));
    assert!(moved("b1"), "rook off its corner");
    assert!(!moved("a2"));
    assert!(!moved("b7"));
    assert!(moved("e4"), "pawn off its start row");
}

#[test]
fn test_king_off_home_square_counts_as_moved() {
    let b = Board::from_placement("8/8/8/3k4/8/8/8/3K4").unwrap();
    assert!(b.piece_at(sq("d1")).unwrap().has_moved);
    assert!(b.piece_at(sq("d5")).unwrap().has_moved);
}

#[test]
fn test_display_shows_pieces_and_highlight() {
    let mut b = Board::standard();
    let text = b.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8  r n b q k b n r");
    assert_eq!(lines[5], "3  . . . . . . . .");
    assert_eq!(lines[7], "1  R N B Q K B N R");
    assert_eq!(lines[8], "   a b c d e f g h");

    b.highlight(Some(sq("g1")));
    let text = b.to_string();
    assert_eq!(text.lines().nth(5), Some("3  . . . . . * . *"));
}

#[test]
fn test_rejects_wrong_king_counts() {
    for bad in [
        "8/8/8/8/8/8/8/8",
        "4k3/8/8/8/8/8/8/8",
        "4k3/8/8/8/8/8/8/K3K3",
        "k3k3/8/8/8/8/8/8/4K3",
    ] {
        assert!(
            matches!(
                Board::from_placement(bad),
                Err(RulesError::InvalidPlacement(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_rejects_pawns_on_first_or_last_rank() {
    for bad in [
        "P3k3/8/8/8/8/8/8/4K3",
        "4k3/8/8/8/8/8/8/P3K3",
        "p3k3/8/8/8/8/8/8/4K3",
        "4k3/8/8/8/8/8/8/4K2p",
    ] {
        assert!(
            matches!(
                Board::from_placement(bad),
                Err(RulesError::InvalidPlacement(_))
            ),
            "{bad:?} should be rejected"
        );
    }
    assert!(Board::from_placement("4k3/P7/8/8/8/8/7p/4K3").is_ok());
}
