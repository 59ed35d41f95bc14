use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::storage::Theme;

/// Every state change in the tracker produces an Event.
/// The presentation layer renders them; notifications are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Onboarded {
        name: String,
        goal_ml: u32,
        /// Re-onboarding keeps streak and history.
        returning: bool,
        at: NaiveDateTime,
    },
    DayRolledOver {
        closed_date: NaiveDate,
        archived_ml: Option<u32>,
        opened_date: NaiveDate,
    },
    StreakUpdated {
        previous: u32,
        current: u32,
        continued: bool,
    },
    IntakeLogged {
        entry_id: String,
        amount_ml: u32,
        intake_ml: u32,
        goal_ml: u32,
        at: NaiveDateTime,
    },
    /// Today's intake crossed the goal on this log.
    GoalReached {
        intake_ml: u32,
        goal_ml: u32,
        at: NaiveDateTime,
    },
    BadgeUnlocked {
        key: String,
        name: String,
        icon: String,
        date: NaiveDate,
    },
    GoalChanged {
        previous_ml: u32,
        goal_ml: u32,
    },
    ThemeChanged {
        theme: Theme,
    },
}

impl Event {
    /// Toast text for events worth interrupting the user about.
    pub fn notification(&self) -> Option<String> {
        match self {
            Event::Onboarded { name, returning: false, .. } => {
                Some(format!("Welcome, {name}! Let's stay hydrated!"))
            }
            Event::Onboarded { name, returning: true, .. } => {
                Some(format!("Welcome back, {name}! Your streak is safe."))
            }
            Event::GoalReached { .. } => {
                Some("🏆 Daily Goal Achieved!: You've reached your daily water intake goal!".into())
            }
            Event::StreakUpdated { current, continued: true, .. } => {
                Some(format!("🏆 Streak!: You're on a {current}-day streak!"))
            }
            Event::StreakUpdated { previous: 0, continued: false, .. } => {
                Some("🏆 First Day!: Great start to your hydration journey!".into())
            }
            Event::BadgeUnlocked { name, icon, .. } => {
                Some(format!("{icon} Badge unlocked: {name}"))
            }
            _ => None,
        }
    }
}
