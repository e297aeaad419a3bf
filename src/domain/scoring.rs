//! Score calculation, centralized so every caller applies the same rule.

use crate::domain::rules::BASE_SCORE;

/// Score for one round row: a successful bet earns [`BASE_SCORE`] plus the
/// bet amount, a failed bet earns nothing. The score is always computed
/// server-side as part of the upsert, never supplied by a caller.
pub fn calculate_score(bet: u32, success: bool) -> i64 {
    if success {
        BASE_SCORE + i64::from(bet)
    } else {
        0
    }
}
