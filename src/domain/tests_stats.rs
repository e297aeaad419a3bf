use crate::domain::stats::{
    aggregate, bet_distribution, compute_player_stats, game_player_stats, game_series,
};
use crate::domain::test_fixtures::{game, player, row, seeded};

#[test]
fn empty_row_set_yields_zero_rates_not_nan() {
    let stats = compute_player_stats(1, "ada", 0, &[]);
    assert_eq!(stats.total_rounds, 0);
    assert_eq!(stats.win_rate, 0.0);
    assert_eq!(stats.average_bet, 0.0);
    assert!(stats.bet_distribution.is_empty());
}

#[test]
fn unresolved_rows_count_as_rounds_but_not_as_results() {
    let rows = vec![
        row(1, 1, 7, 1, true),
        row(1, 2, 7, 2, false),
        seeded(1, 3, 7),
    ];
    let stats = compute_player_stats(7, "bo", 1, &rows);
    assert_eq!(stats.total_rounds, 3);
    assert_eq!(stats.successful_bets, 1);
    assert_eq!(stats.failed_bets, 1);
    assert_eq!(stats.total_score, 11);
}

#[test]
fn bet_distribution_is_sorted_ascending() {
    let rows = vec![
        row(1, 3, 7, 3, true),
        row(1, 1, 7, 0, true),
        row(1, 2, 7, 0, false),
        row(1, 4, 7, 2, true),
    ];
    let hist = bet_distribution(&rows);
    let pairs: Vec<(u32, u32)> = hist.iter().map(|b| (b.bet, b.count)).collect();
    assert_eq!(pairs, vec![(0, 2), (2, 1), (3, 1)]);
}

#[test]
fn combined_win_rate_is_weighted_not_averaged() {
    // P1: 1 round, 1 success (100%). P2: 9 rounds, 1 success (11.1%).
    // Weighted: 2 successes / 10 rounds = 20%, nowhere near the 55.6% a
    // naive mean of rates would give.
    let p1_rows = vec![row(1, 1, 1, 1, true)];
    let mut p2_rows = vec![row(2, 1, 2, 1, true)];
    for round_number in 2..=9 {
        p2_rows.push(row(2, round_number, 2, 0, false));
    }

    let s1 = compute_player_stats(1, "p1", 1, &p1_rows);
    let s2 = compute_player_stats(2, "p2", 1, &p2_rows);
    assert_eq!(s1.win_rate, 100.0);

    let combined = aggregate(&[s1, s2]);
    assert_eq!(combined.total_rounds, 10);
    assert_eq!(combined.successful_bets, 2);
    assert!((combined.win_rate - 20.0).abs() < 1e-9);
}

#[test]
fn combined_average_bet_is_weighted_by_round_counts() {
    // P1 averages 4.0 over 2 rounds, P2 averages 1.0 over 8 rounds.
    // Weighted mean: (4*2 + 1*8) / 10 = 1.6.
    let p1_rows = vec![row(1, 4, 1, 4, true), row(1, 4, 1, 4, false)];
    let p2_rows: Vec<_> = (1..=8).map(|n| row(2, n, 2, 1, false)).collect();

    let s1 = compute_player_stats(1, "p1", 1, &p1_rows);
    let s2 = compute_player_stats(2, "p2", 1, &p2_rows);
    let combined = aggregate(&[s1, s2]);
    assert!((combined.average_bet - 1.6).abs() < 1e-9);
}

#[test]
fn combined_histograms_merge_by_summing_counts() {
    let s1 = compute_player_stats(1, "p1", 1, &[row(1, 2, 1, 2, true)]);
    let s2 = compute_player_stats(
        2,
        "p2",
        1,
        &[row(2, 2, 2, 2, false), row(2, 1, 2, 0, true)],
    );
    let combined = aggregate(&[s1, s2]);
    let pairs: Vec<(u32, u32)> = combined
        .bet_distribution
        .iter()
        .map(|b| (b.bet, b.count))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (2, 2)]);
}

#[test]
fn aggregate_of_nothing_is_all_zero() {
    let combined = aggregate(&[]);
    assert_eq!(combined.total_rounds, 0);
    assert_eq!(combined.win_rate, 0.0);
    assert_eq!(combined.average_bet, 0.0);
}

#[test]
fn series_has_one_point_per_round_and_carries_unplayed_rounds() {
    let g = game(1, &[10, 20], 5, 2);
    let rounds = vec![
        row(1, 1, 10, 1, true),  // 11
        row(1, 1, 20, 1, false), // 0
        row(1, 2, 10, 2, true),  // 12 -> cumulative 23
        seeded(1, 2, 20),
    ];

    let series = game_series(&g, &rounds);
    assert_eq!(series.points.len(), 5);
    assert_eq!(series.points[0].cumulative, vec![11, 0]);
    assert_eq!(series.points[1].cumulative, vec![23, 0]);
    // Rounds 3..5 have no rows: the cumulative value repeats.
    assert_eq!(series.points[2].cumulative, vec![23, 0]);
    assert_eq!(series.points[4].cumulative, vec![23, 0]);
    assert_eq!(series.points[4].round_number, 5);
}

#[test]
fn per_game_stats_ignore_rows_beyond_total_rounds() {
    let g = game(1, &[10], 2, 2);
    let players = vec![player(10, "ada")];
    let rounds = vec![
        row(1, 1, 10, 1, true), // 11
        row(1, 2, 10, 2, true), // 12
        row(1, 5, 10, 5, true), // unreachable after a downward adjustment
    ];

    let stats = game_player_stats(&g, &players, &rounds);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].player_alias, "ada");
    assert_eq!(stats[0].rounds_played, 2);
    assert_eq!(stats[0].total_score, 23);
    assert_eq!(stats[0].successful_bets, 2);
    assert_eq!(stats[0].failed_bets, 0);
    assert!((stats[0].average_bet - 1.5).abs() < 1e-9);
}
