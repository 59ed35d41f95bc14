//! Daily streak law.
//!
//! A streak is extended only at the first logged intake of a day: if
//! yesterday's archived total met the goal the streak grows by one,
//! otherwise today starts a new streak of one.

use serde::{Deserialize, Serialize};

use crate::goal::DailyGoal;

/// Outcome of the once-per-day streak recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub previous: u32,
    pub current: u32,
    /// Yesterday met the goal and the streak carried over.
    pub continued: bool,
}

/// Compute the streak for the first log of a day.
///
/// `yesterday_total` is `None` when nothing was archived for yesterday,
/// which includes every multi-day gap.
pub fn next_streak(previous: u32, yesterday_total: Option<u32>, goal: DailyGoal) -> StreakUpdate {
    let continued = yesterday_total.is_some_and(|ml| ml >= goal.ml());
    let current = if continued {
        previous.saturating_add(1)
    } else {
        1
    };
    StreakUpdate {
        previous,
        current,
        continued,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn met_goal_yesterday_extends() {
        let update = next_streak(4, Some(2500), DailyGoal::new(2000));
        assert_eq!(update.current, 5);
        assert!(update.continued);
    }

    #[test]
    fn exactly_goal_counts_as_met() {
        assert_eq!(next_streak(2, Some(2000), DailyGoal::new(2000)).current, 3);
    }

    #[test]
    fn missed_goal_restarts_at_one() {
        let update = next_streak(10, Some(1999), DailyGoal::new(2000));
        assert_eq!(update.current, 1);
        assert!(!update.continued);
    }

    #[test]
    fn gap_day_restarts_at_one() {
        assert_eq!(next_streak(10, None, DailyGoal::new(2000)).current, 1);
    }

    #[test]
    fn zero_streak_with_met_yesterday_becomes_one() {
        assert_eq!(next_streak(0, Some(3000), DailyGoal::new(2000)).current, 1);
    }
}
