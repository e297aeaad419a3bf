//! Property tests for the ledger projections (pure domain, no store).

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::matrix::{build_matrix, totals};
use crate::domain::models::Round;
use crate::domain::scoring::calculate_score;
use crate::domain::stats::game_series;
use crate::domain::test_fixtures::game;

const ROSTER: [i64; 4] = [10, 20, 30, 40];

/// `(round_number, roster index, bet, success, resolved)` tuples.
type RawEntry = (u32, usize, u32, bool, bool);

/// Build a ledger the way the store would: unique per `(round, player)` key,
/// later writes replacing earlier ones.
fn materialize(game_id: i64, entries: &[RawEntry]) -> Vec<Round> {
    let mut by_key: BTreeMap<(u32, i64), Round> = BTreeMap::new();
    for &(round_number, player_idx, bet, success, resolved) in entries {
        let player_id = ROSTER[player_idx];
        by_key.insert(
            (round_number, player_id),
            Round {
                id: 0,
                game_id,
                round_number,
                player_id,
                bet,
                success,
                score: resolved.then(|| calculate_score(bet, success)),
            },
        );
    }
    by_key.into_values().collect()
}

fn entries() -> impl Strategy<Value = Vec<RawEntry>> {
    prop::collection::vec(
        (1u32..12, 0usize..4, 0u32..12, any::<bool>(), any::<bool>()),
        0..40,
    )
}

proptest! {
    /// The matrix is dense for any ledger: exactly `total_rounds` rows of
    /// `roster.len()` cells, however sparse or over-full the ledger is.
    #[test]
    fn prop_matrix_is_always_dense(
        total_rounds in 1u32..12,
        entries in entries(),
    ) {
        let g = game(1, &ROSTER, total_rounds, total_rounds);
        let rounds = materialize(1, &entries);
        let m = build_matrix(&g, &rounds);
        prop_assert_eq!(m.rows.len(), total_rounds as usize);
        prop_assert!(m.rows.iter().all(|row| row.len() == ROSTER.len()));
    }

    /// Leaderboard totals agree with the matrix: summing each column's cell
    /// scores gives exactly `totals` over the in-range rows.
    #[test]
    fn prop_totals_match_matrix_column_sums(
        total_rounds in 1u32..12,
        entries in entries(),
    ) {
        let g = game(1, &ROSTER, total_rounds, total_rounds);
        let rounds = materialize(1, &entries);
        let in_range: Vec<Round> = rounds
            .iter()
            .filter(|r| r.round_number <= total_rounds)
            .cloned()
            .collect();

        let m = build_matrix(&g, &rounds);
        let sums = totals(&ROSTER, &in_range);
        for (col, expected) in sums.iter().enumerate() {
            let from_matrix: i64 = m
                .rows
                .iter()
                .map(|row| row[col].score.unwrap_or(0))
                .sum();
            prop_assert_eq!(from_matrix, *expected);
        }
    }

    /// The final point of the cumulative series equals the leaderboard
    /// totals, so the chart and the footer can never disagree.
    #[test]
    fn prop_series_ends_at_the_totals(
        total_rounds in 1u32..12,
        entries in entries(),
    ) {
        let g = game(1, &ROSTER, total_rounds, total_rounds);
        let in_range: Vec<Round> = materialize(1, &entries)
            .into_iter()
            .filter(|r| r.round_number <= total_rounds)
            .collect();

        let series = game_series(&g, &in_range);
        let last = series.points.last().expect("at least one round");
        prop_assert_eq!(&last.cumulative, &totals(&ROSTER, &in_range));
    }

    /// Scores are a total function of `(bet, success)`: base plus bet on
    /// success, zero otherwise, never negative.
    #[test]
    fn prop_score_is_base_plus_bet_or_zero(bet in 0u32..500, success in any::<bool>()) {
        let score = calculate_score(bet, success);
        if success {
            prop_assert_eq!(score, 10 + i64::from(bet));
        } else {
            prop_assert_eq!(score, 0);
        }
        prop_assert!(score >= 0);
    }
}
