//! Defence-only matchup difficulty.
//!
//! Shown on a category's card when the user gives no prediction for it:
//! the worse the opponent's defence, the likelier an average night is.

use crate::model::verdict::Verdict;

/// Ranks above this are soft defences.
const SOFT_DEFENSE_ABOVE: u8 = 15;
/// Ranks from here up to `SOFT_DEFENSE_ABOVE` are middling.
const MIDDLING_FROM: u8 = 10;

pub fn matchup_difficulty(defense_rank: u8) -> Verdict {
    if defense_rank > SOFT_DEFENSE_ABOVE {
        Verdict::Likely
    } else if defense_rank >= MIDDLING_FROM {
        Verdict::Uncertain
    } else {
        Verdict::Unlikely
    }
}
