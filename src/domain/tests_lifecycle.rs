use crate::domain::lifecycle::{
    ensure_active, ensure_can_advance, ensure_can_finish, ensure_can_reactivate,
    ensure_editable_round,
};
use crate::domain::models::GameStatus;
use crate::domain::test_fixtures::game;
use crate::errors::domain::{ConflictKind, DomainError};

fn conflict_kind(err: DomainError) -> ConflictKind {
    match err {
        DomainError::Conflict(kind, _) => kind,
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn status_is_derived_from_the_flag_pair() {
    let mut g = game(1, &[1, 2], 3, 1);
    assert_eq!(g.status(), GameStatus::Active);
    g.is_active = false;
    g.is_valid = true;
    assert_eq!(g.status(), GameStatus::Finished);
    g.is_valid = false;
    assert_eq!(g.status(), GameStatus::Cancelled);
}

#[test]
fn finishing_before_the_last_round_is_a_conflict_naming_the_rounds() {
    let g = game(1, &[1, 2], 3, 2);
    let err = ensure_can_finish(&g).expect_err("too early");
    assert_eq!(
        conflict_kind(err.clone()),
        ConflictKind::UnfinishedRounds
    );
    let msg = err.to_string();
    assert!(msg.contains("round 2 of 3"), "got: {msg}");
}

#[test]
fn finishing_at_the_last_round_is_legal() {
    let g = game(1, &[1, 2], 3, 3);
    assert!(ensure_can_finish(&g).is_ok());
}

#[test]
fn advancing_stops_at_the_last_round() {
    let g = game(1, &[1, 2], 3, 2);
    assert!(ensure_can_advance(&g).is_ok());
    let done = game(1, &[1, 2], 3, 3);
    assert_eq!(
        conflict_kind(ensure_can_advance(&done).expect_err("at the end")),
        ConflictKind::UnfinishedRounds
    );
}

#[test]
fn inactive_games_reject_every_mutation() {
    let mut g = game(1, &[1, 2], 3, 3);
    g.is_active = false;
    assert_eq!(
        conflict_kind(ensure_active(&g).expect_err("inactive")),
        ConflictKind::GameNotActive
    );
    assert!(ensure_can_finish(&g).is_err());
    assert!(ensure_can_advance(&g).is_err());
}

#[test]
fn only_opened_rounds_are_editable() {
    let g = game(1, &[1, 2], 5, 2);
    assert!(ensure_editable_round(&g, 1).is_ok());
    assert!(ensure_editable_round(&g, 2).is_ok());

    // Beyond current_round: a state conflict, not bad input.
    assert_eq!(
        conflict_kind(ensure_editable_round(&g, 3).expect_err("not open")),
        ConflictKind::RoundNotOpen
    );
    // Outside the matrix range entirely: validation.
    assert!(matches!(
        ensure_editable_round(&g, 0),
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        ensure_editable_round(&g, 6),
        Err(DomainError::Validation(_))
    ));
}

#[test]
fn reactivation_respects_the_single_active_slot() {
    let mut finished = game(1, &[1, 2], 3, 3);
    finished.is_active = false;
    finished.is_valid = true;

    let other_active = game(2, &[1, 2], 3, 1);
    assert_eq!(
        conflict_kind(
            ensure_can_reactivate(&finished, Some(&other_active)).expect_err("slot taken")
        ),
        ConflictKind::ActiveGameExists
    );

    // No active game, or the game itself already active: fine.
    assert!(ensure_can_reactivate(&finished, None).is_ok());
    assert!(ensure_can_reactivate(&other_active, Some(&other_active)).is_ok());
}
