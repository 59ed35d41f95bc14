//! Achievement badges.
//!
//! Badges are a static table of `{key, rule}` rows evaluated by one generic
//! function. An unlocked badge is permanent: it is never re-checked, never
//! removed and never reported as new a second time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerStats;

/// A badge definition.
pub struct Badge {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    rule: fn(&LedgerStats) -> bool,
}

impl std::fmt::Debug for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Badge").field("key", &self.key).finish_non_exhaustive()
    }
}

impl Badge {
    pub fn is_earned(&self, stats: &LedgerStats) -> bool {
        (self.rule)(stats)
    }
}

/// All badges, in evaluation order.
pub static BADGES: &[Badge] = &[
    Badge {
        key: "newcomer",
        name: "Newcomer",
        icon: "🌱",
        description: "Tracked your first day",
        rule: |s| s.total_days_tracked == 1,
    },
    Badge {
        key: "week_streak",
        name: "Week Streak",
        icon: "🔥",
        description: "Met your goal 7 days in a row",
        rule: |s| s.streak >= 7,
    },
    Badge {
        key: "weekend_warrior",
        name: "Weekend Warrior",
        icon: "🏖️",
        description: "Tracked two weekend days",
        rule: |s| s.weekend_days_tracked >= 2,
    },
    Badge {
        key: "goal_crusher",
        name: "Goal Crusher",
        icon: "💪",
        description: "Drank 3000 ml in a single day",
        rule: |s| s.max_intake_ever >= 3000,
    },
    Badge {
        key: "master",
        name: "Hydration Master",
        icon: "👑",
        description: "Kept a 21 day streak",
        rule: |s| s.streak >= 21,
    },
];

/// A badge the user has earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedBadge {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub unlock_date: NaiveDate,
}

impl UnlockedBadge {
    fn from_badge(badge: &Badge, unlock_date: NaiveDate) -> Self {
        Self {
            key: badge.key.to_string(),
            name: badge.name.to_string(),
            icon: badge.icon.to_string(),
            unlock_date,
        }
    }
}

/// Badges whose rule holds and that are not in `already_unlocked`.
pub fn evaluate(stats: &LedgerStats, already_unlocked: &[UnlockedBadge]) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| !already_unlocked.iter().any(|u| u.key == badge.key))
        .filter(|badge| badge.is_earned(stats))
        .collect()
}

/// Evaluate and append any new unlocks to `unlocked`, returning them.
pub fn unlock_new(
    stats: &LedgerStats,
    unlocked: &mut Vec<UnlockedBadge>,
    today: NaiveDate,
) -> Vec<UnlockedBadge> {
    let fresh: Vec<UnlockedBadge> = evaluate(stats, unlocked.as_slice())
        .into_iter()
        .map(|badge| UnlockedBadge::from_badge(badge, today))
        .collect();
    for badge in &fresh {
        tracing::info!(badge = badge.key.as_str(), "badge unlocked");
    }
    unlocked.extend(fresh.iter().cloned());
    fresh
}
