//! Intake ledger implementation.
//!
//! The ledger is a lazily reconciled day machine. It does not watch the
//! clock; every mutation passes in "now" and the ledger archives the
//! previous day first if the date has moved on.
//!
//! ## State Transitions
//!
//! ```text
//! Stale (current_date != today) --reconcile--> Current --apply_intake--> Current
//! ```

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::streak::{next_streak, StreakUpdate};
use crate::clock::{day_label, is_weekend, previous_day};
use crate::error::IntakeError;
use crate::goal::DailyGoal;

/// One logged drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub id: String,
    pub amount_ml: u32,
    pub timestamp: NaiveDateTime,
}

/// Report of a day being archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollover {
    /// Day that was closed out.
    pub closed_date: NaiveDate,
    /// Total written to history, `None` if the day had no intake.
    pub archived_ml: Option<u32>,
    pub weekend: bool,
    /// Day the ledger now points at.
    pub opened_date: NaiveDate,
}

/// Everything that happened while applying one intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeOutcome {
    pub entry: IntakeEntry,
    pub rollover: Option<Rollover>,
    /// Present on the first log of a day.
    pub streak: Option<StreakUpdate>,
    pub intake_before: u32,
    pub intake_after: u32,
    /// This intake carried the day across the goal.
    pub goal_reached: bool,
}

/// Aggregates the badge rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Archived days plus today once it has an entry.
    pub total_days_tracked: u32,
    pub weekend_days_tracked: u32,
    pub streak: u32,
    pub max_intake_ever: u32,
}

/// One point of the trailing chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub label: String,
    pub intake_ml: u32,
}

/// The mutable daily record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeLedger {
    current_date: NaiveDate,
    current_intake: u32,
    today_entries: Vec<IntakeEntry>,
    history: BTreeMap<NaiveDate, u32>,
    streak: u32,
    max_intake_ever: u32,
    /// Days archived into history.
    total_days_tracked: u32,
    weekend_days_tracked: u32,
    /// Day the streak was last recomputed; guards the once-per-day rule.
    #[serde(default)]
    streak_date: Option<NaiveDate>,
}

impl IntakeLedger {
    /// Empty ledger pointing at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_date: today,
            current_intake: 0,
            today_entries: Vec::new(),
            history: BTreeMap::new(),
            streak: 0,
            max_intake_ever: 0,
            total_days_tracked: 0,
            weekend_days_tracked: 0,
            streak_date: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn current_intake(&self) -> u32 {
        self.current_intake
    }

    pub fn today_entries(&self) -> &[IntakeEntry] {
        &self.today_entries
    }

    /// Today's entries, most recent first.
    pub fn entries_newest_first(&self) -> Vec<IntakeEntry> {
        let mut entries = self.today_entries.clone();
        entries.reverse();
        entries
    }

    pub fn history(&self) -> &BTreeMap<NaiveDate, u32> {
        &self.history
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_intake_ever(&self) -> u32 {
        self.max_intake_ever
    }

    pub fn weekend_days_tracked(&self) -> u32 {
        self.weekend_days_tracked
    }

    /// Archived days plus today once it has at least one entry.
    pub fn total_days_tracked(&self) -> u32 {
        let today = u32::from(!self.today_entries.is_empty());
        self.total_days_tracked + today
    }

    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.current_date != today
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_days_tracked: self.total_days_tracked(),
            weekend_days_tracked: self.weekend_days_tracked,
            streak: self.streak,
            max_intake_ever: self.max_intake_ever,
        }
    }

    /// Total for `date`: the live counter for the current day, history otherwise.
    pub fn intake_on(&self, date: NaiveDate) -> u32 {
        if date == self.current_date {
            self.current_intake
        } else {
            self.history.get(&date).copied().unwrap_or(0)
        }
    }

    /// `days` trailing totals ending at `today`, oldest first, zero-filled.
    pub fn trailing_days(&self, today: NaiveDate, days: u32) -> Vec<DayTotal> {
        (0..days as i64)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                DayTotal {
                    date,
                    label: day_label(date),
                    intake_ml: self.intake_on(date),
                }
            })
            .collect()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Archive the current day if `today` has moved on.
    ///
    /// Only the last active day is archived; skipped days never enter
    /// history. Returns `None` when the ledger is already current, so
    /// calling this twice on the same day is a no-op the second time.
    pub fn reconcile(&mut self, today: NaiveDate) -> Option<Rollover> {
        if !self.is_stale(today) {
            return None;
        }

        let closed_date = self.current_date;
        let weekend = is_weekend(closed_date);
        let archived_ml = if self.current_intake > 0 {
            self.history.insert(closed_date, self.current_intake);
            self.total_days_tracked += 1;
            if weekend {
                self.weekend_days_tracked += 1;
            }
            self.max_intake_ever = self.max_intake_ever.max(self.current_intake);
            Some(self.current_intake)
        } else {
            None
        };

        self.current_intake = 0;
        self.today_entries.clear();
        self.current_date = today;

        tracing::debug!(
            closed = %closed_date,
            opened = %today,
            archived_ml = ?archived_ml,
            "ledger rolled over"
        );

        Some(Rollover {
            closed_date,
            archived_ml,
            weekend,
            opened_date: today,
        })
    }

    /// Log `amount_ml` at `now` against `goal`.
    ///
    /// Validation happens before reconciliation, so a rejected amount
    /// leaves the ledger exactly as it was.
    pub fn apply_intake(
        &mut self,
        amount_ml: i64,
        now: NaiveDateTime,
        goal: DailyGoal,
    ) -> Result<IntakeOutcome, IntakeError> {
        let amount = validate_amount(amount_ml)?;
        let today = now.date();

        let rollover = self.reconcile(today);

        let streak = if self.streak_date != Some(today) {
            let yesterday = self.history.get(&previous_day(today)).copied();
            let update = next_streak(self.streak, yesterday, goal);
            self.streak = update.current;
            self.streak_date = Some(today);
            tracing::debug!(
                previous = update.previous,
                current = update.current,
                continued = update.continued,
                "streak recomputed"
            );
            Some(update)
        } else {
            None
        };

        let intake_before = self.current_intake;
        self.current_intake = self.current_intake.saturating_add(amount);
        let intake_after = self.current_intake;

        let entry = IntakeEntry {
            id: uuid::Uuid::new_v4().to_string(),
            amount_ml: amount,
            timestamp: now,
        };
        self.today_entries.push(entry.clone());
        self.max_intake_ever = self.max_intake_ever.max(self.current_intake);

        let goal_reached = intake_before < goal.ml() && intake_after >= goal.ml();

        Ok(IntakeOutcome {
            entry,
            rollover,
            streak,
            intake_before,
            intake_after,
            goal_reached,
        })
    }

    /// Zero today's intake and entries, keeping streak and history.
    ///
    /// Used by re-onboarding.
    pub fn reset_today(&mut self) {
        self.current_intake = 0;
        self.today_entries.clear();
    }
}

fn validate_amount(amount_ml: i64) -> Result<u32, IntakeError> {
    if amount_ml <= 0 {
        return Err(IntakeError::InvalidAmount(amount_ml.to_string()));
    }
    u32::try_from(amount_ml).map_err(|_| IntakeError::InvalidAmount(amount_ml.to_string()))
}

/// Parse a raw amount as typed or tapped.
///
/// Non-numeric, fractional and non-positive values are all rejected.
pub fn parse_amount(raw: &str) -> Result<i64, IntakeError> {
    let trimmed = raw.trim();
    let amount = trimmed
        .parse::<i64>()
        .map_err(|_| IntakeError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(amount)?;
    Ok(amount)
}
