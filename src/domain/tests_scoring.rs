use crate::domain::rules::{validate_bet, BASE_SCORE};
use crate::domain::scoring::calculate_score;

#[test]
fn successful_bet_earns_base_plus_bet() {
    assert_eq!(calculate_score(5, true), 15);
    assert_eq!(calculate_score(0, true), BASE_SCORE);
    assert_eq!(calculate_score(12, true), 22);
}

#[test]
fn failed_bet_earns_nothing() {
    assert_eq!(calculate_score(5, false), 0);
    assert_eq!(calculate_score(0, false), 0);
}

#[test]
fn bet_is_bounded_by_the_round_number() {
    assert!(validate_bet(0, 1).is_ok());
    assert!(validate_bet(1, 1).is_ok());
    assert!(validate_bet(3, 3).is_ok());
    assert!(validate_bet(2, 1).is_err());
    assert!(validate_bet(4, 3).is_err());
}

#[test]
fn bet_error_names_the_allowed_range() {
    let err = validate_bet(7, 3).expect_err("out of range");
    let msg = err.to_string();
    assert!(msg.contains("between 0 and 3"), "got: {msg}");
    assert!(msg.contains('7'), "got: {msg}");
}
