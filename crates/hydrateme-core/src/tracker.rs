//! The tracker: single entry point for the presentation layer.
//!
//! Every user action runs to completion here: rollover, ledger update,
//! badge evaluation, then a save. Mutations are applied to a working copy
//! of the state and only committed once the save succeeds, so a failed
//! action never leaves a half-applied record behind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badges::{self, UnlockedBadge};
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, IntakeError, Result, ValidationError};
use crate::events::Event;
use crate::goal::{DailyGoal, Profile, ProfileInput};
use crate::ledger::{parse_amount, DayTotal, IntakeEntry, IntakeLedger, IntakeOutcome, Rollover};
use crate::progress::{greeting, DailyProgress, GLASS_COUNT};
use crate::storage::{StateStore, Theme};

/// Schema version of the persisted record.
pub const STATE_VERSION: u32 = 1;

/// Days in the trailing chart series.
pub const WEEK_DAYS: u32 = 7;

fn default_version() -> u32 {
    STATE_VERSION
}

/// Everything persisted under the state slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub profile: Profile,
    pub goal: DailyGoal,
    pub ledger: IntakeLedger,
    #[serde(default)]
    pub unlocked_badges: Vec<UnlockedBadge>,
}

/// Result of an intake action.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    pub outcome: IntakeOutcome,
    /// Badges unlocked by this action, for the achievement modal.
    pub new_badges: Vec<UnlockedBadge>,
    pub events: Vec<Event>,
    pub snapshot: Snapshot,
}

/// Result of onboarding.
#[derive(Debug, Clone)]
pub struct OnboardingReport {
    pub profile: Profile,
    pub goal_ml: u32,
    pub recommended_ml: u32,
    /// Fields that fell back to defaults.
    pub fallbacks: Vec<ValidationError>,
    pub events: Vec<Event>,
}

/// Everything needed to render the main screen.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub name: String,
    pub greeting: String,
    pub progress: DailyProgress,
    pub streak: u32,
    pub max_intake_ever: u32,
    pub total_days_tracked: u32,
    pub weekend_days_tracked: u32,
    pub per_glass_ml: u32,
    /// Today's entries, most recent first.
    pub entries: Vec<IntakeEntry>,
    pub theme: Theme,
}

/// Owns the state record and its store.
pub struct Tracker<C: Clock = SystemClock> {
    store: StateStore,
    clock: C,
    state: Option<HydrationState>,
    theme: Theme,
}

impl Tracker<SystemClock> {
    /// Tracker over the default data directory and the system clock.
    pub fn open() -> Result<Self> {
        Ok(Self::load(StateStore::open()?, SystemClock))
    }
}

impl<C: Clock> Tracker<C> {
    /// Read both slots once. Unusable state means onboarding is needed.
    pub fn load(store: StateStore, clock: C) -> Self {
        let state = store.load_state();
        let theme = store.load_theme();
        Self {
            store,
            clock,
            state,
            theme,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn needs_onboarding(&self) -> bool {
        self.state.is_none()
    }

    pub fn state(&self) -> Option<&HydrationState> {
        self.state.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn unlocked_badges(&self) -> &[UnlockedBadge] {
        self.state
            .as_ref()
            .map(|s| s.unlocked_badges.as_slice())
            .unwrap_or(&[])
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.build_snapshot(self.current()?))
    }

    /// Trailing week of daily totals ending today, oldest first.
    pub fn weekly_series(&self) -> Result<Vec<DayTotal>> {
        let state = self.current()?;
        Ok(state.ledger.trailing_days(self.clock.today(), WEEK_DAYS))
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Create or replace the profile and goal.
    ///
    /// A returning user keeps streak, history and badges; only today's
    /// intake is cleared.
    pub fn onboard(&mut self, input: &ProfileInput) -> Result<OnboardingReport> {
        let resolved = input.resolve();
        let now = self.clock.now();
        let today = now.date();
        let mut events = Vec::new();

        let (next, returning) = match &self.state {
            Some(existing) => {
                let mut next = existing.clone();
                if let Some(rollover) = next.ledger.reconcile(today) {
                    events.push(rollover_event(&rollover));
                }
                next.ledger.reset_today();
                next.profile = resolved.profile.clone();
                next.goal = resolved.goal;
                (next, true)
            }
            None => (
                HydrationState {
                    version: STATE_VERSION,
                    profile: resolved.profile.clone(),
                    goal: resolved.goal,
                    ledger: IntakeLedger::new(today),
                    unlocked_badges: Vec::new(),
                },
                false,
            ),
        };

        events.push(Event::Onboarded {
            name: resolved.profile.name.clone(),
            goal_ml: resolved.goal.ml(),
            returning,
            at: now,
        });

        self.commit(next)?;
        tracing::info!(
            name = resolved.profile.name.as_str(),
            goal_ml = resolved.goal.ml(),
            returning,
            "onboarding complete"
        );

        Ok(OnboardingReport {
            recommended_ml: resolved.profile.recommended_goal().ml(),
            profile: resolved.profile,
            goal_ml: resolved.goal.ml(),
            fallbacks: resolved.fallbacks,
            events,
        })
    }

    /// Log an amount from a quick-add button.
    pub fn quick_add(&mut self, amount_ml: i64) -> Result<IntakeReport> {
        let now = self.clock.now();
        let mut next = self.current()?.clone();

        let outcome = next.ledger.apply_intake(amount_ml, now, next.goal)?;
        let new_badges = badges::unlock_new(
            &next.ledger.stats(),
            &mut next.unlocked_badges,
            now.date(),
        );
        let events = intake_events(&outcome, &new_badges, next.goal);

        self.commit(next)?;
        let snapshot = self.snapshot()?;
        Ok(IntakeReport {
            outcome,
            new_badges,
            events,
            snapshot,
        })
    }

    /// Log an amount typed by the user; non-numeric input is rejected.
    pub fn quick_add_raw(&mut self, raw: &str) -> Result<IntakeReport> {
        let amount = parse_amount(raw)?;
        self.quick_add(amount)
    }

    /// Log one glass, `goal / 8` rounded.
    pub fn glass_tap(&mut self, index: usize) -> Result<IntakeReport> {
        if index >= GLASS_COUNT {
            return Err(IntakeError::InvalidGlass {
                index,
                count: GLASS_COUNT,
            }
            .into());
        }
        let per_glass = self.current()?.goal.per_glass_ml(GLASS_COUNT);
        self.quick_add(i64::from(per_glass))
    }

    /// Override the daily goal. History is not reclassified.
    pub fn set_goal(&mut self, goal_ml: u32) -> Result<Vec<Event>> {
        if goal_ml == 0 {
            return Err(ValidationError::InvalidValue {
                field: "goal_ml".into(),
                message: "goal must be positive".into(),
            }
            .into());
        }
        let mut next = self.current()?.clone();
        let mut events = Vec::new();
        if let Some(rollover) = next.ledger.reconcile(self.clock.today()) {
            events.push(rollover_event(&rollover));
        }
        let previous_ml = next.goal.ml();
        next.goal = DailyGoal::new(goal_ml);
        events.push(Event::GoalChanged {
            previous_ml,
            goal_ml: next.goal.ml(),
        });
        self.commit(next)?;
        Ok(events)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Event> {
        self.store.save_theme(theme)?;
        self.theme = theme;
        Ok(Event::ThemeChanged { theme })
    }

    pub fn toggle_theme(&mut self) -> Result<Event> {
        self.set_theme(self.theme.toggled())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn current(&self) -> Result<&HydrationState> {
        self.state.as_ref().ok_or(CoreError::NotOnboarded)
    }

    fn commit(&mut self, next: HydrationState) -> Result<()> {
        self.store.save_state(&next)?;
        self.state = Some(next);
        Ok(())
    }

    fn build_snapshot(&self, state: &HydrationState) -> Snapshot {
        let now = self.clock.now();
        let today = now.date();
        let ledger = &state.ledger;
        // A stale ledger has not rolled over yet; today is still empty.
        let entries = if ledger.is_stale(today) {
            Vec::new()
        } else {
            ledger.entries_newest_first()
        };
        Snapshot {
            date: today,
            name: state.profile.name.clone(),
            greeting: greeting(&state.profile.name, now),
            progress: DailyProgress::new(ledger.intake_on(today), state.goal),
            streak: ledger.streak(),
            max_intake_ever: ledger.max_intake_ever(),
            total_days_tracked: ledger.total_days_tracked(),
            weekend_days_tracked: ledger.weekend_days_tracked(),
            per_glass_ml: state.goal.per_glass_ml(GLASS_COUNT),
            entries,
            theme: self.theme,
        }
    }
}

fn rollover_event(rollover: &Rollover) -> Event {
    Event::DayRolledOver {
        closed_date: rollover.closed_date,
        archived_ml: rollover.archived_ml,
        opened_date: rollover.opened_date,
    }
}

fn intake_events(outcome: &IntakeOutcome, new_badges: &[UnlockedBadge], goal: DailyGoal) -> Vec<Event> {
    let mut events = Vec::new();
    if let Some(rollover) = &outcome.rollover {
        events.push(rollover_event(rollover));
    }
    if let Some(streak) = outcome.streak {
        events.push(Event::StreakUpdated {
            previous: streak.previous,
            current: streak.current,
            continued: streak.continued,
        });
    }
    events.push(Event::IntakeLogged {
        entry_id: outcome.entry.id.clone(),
        amount_ml: outcome.entry.amount_ml,
        intake_ml: outcome.intake_after,
        goal_ml: goal.ml(),
        at: outcome.entry.timestamp,
    });
    if outcome.goal_reached {
        events.push(Event::GoalReached {
            intake_ml: outcome.intake_after,
            goal_ml: goal.ml(),
            at: outcome.entry.timestamp,
        });
    }
    events.extend(new_badges.iter().map(|b| Event::BadgeUnlocked {
        key: b.key.clone(),
        name: b.name.clone(),
        icon: b.icon.clone(),
        date: b.unlock_date,
    }));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn clock() -> ManualClock {
        ManualClock::at_day(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
    }

    fn onboarded(clock: &ManualClock) -> Tracker<&ManualClock> {
        let mut tracker = Tracker::load(StateStore::open_memory().unwrap(), clock);
        tracker
            .onboard(&ProfileInput {
                name: Some("Sam".into()),
                goal_override: Some("2000".into()),
                ..Default::default()
            })
            .unwrap();
        tracker
    }

    #[test]
    fn fresh_tracker_needs_onboarding() {
        let clock = clock();
        let mut tracker = Tracker::load(StateStore::open_memory().unwrap(), &clock);
        assert!(tracker.needs_onboarding());
        assert!(matches!(tracker.quick_add(250), Err(CoreError::NotOnboarded)));
        assert!(matches!(tracker.snapshot(), Err(CoreError::NotOnboarded)));
    }

    #[test]
    fn onboarding_uses_recommendation() {
        let clock = clock();
        let mut tracker = Tracker::load(StateStore::open_memory().unwrap(), &clock);
        let report = tracker
            .onboard(&ProfileInput {
                weight_kg: Some("70".into()),
                activity_level: Some("active".into()),
                climate: Some("hot".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(report.goal_ml, 3100);
        assert_eq!(report.recommended_ml, 3100);
        assert!(!tracker.needs_onboarding());
    }

    #[test]
    fn first_log_emits_newcomer_and_first_day() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        let report = tracker.quick_add(500).unwrap();

        assert_eq!(report.new_badges.len(), 1);
        assert_eq!(report.new_badges[0].key, "newcomer");
        assert!(report.events.iter().any(|e| matches!(
            e,
            Event::StreakUpdated { current: 1, .. }
        )));
        assert_eq!(report.snapshot.progress.remaining_ml, 1500);
        assert_eq!(report.snapshot.entries.len(), 1);
    }

    #[test]
    fn glass_tap_pours_an_eighth() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        let report = tracker.glass_tap(3).unwrap();
        assert_eq!(report.outcome.entry.amount_ml, 250);
        assert!(matches!(
            tracker.glass_tap(GLASS_COUNT),
            Err(CoreError::Intake(IntakeError::InvalidGlass { .. }))
        ));
    }

    #[test]
    fn raw_input_is_validated() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        assert!(matches!(
            tracker.quick_add_raw("lots"),
            Err(CoreError::Intake(IntakeError::InvalidAmount(_)))
        ));
        assert_eq!(tracker.snapshot().unwrap().progress.intake_ml, 0);
        tracker.quick_add_raw("330").unwrap();
        assert_eq!(tracker.snapshot().unwrap().progress.intake_ml, 330);
    }

    #[test]
    fn snapshot_of_stale_ledger_shows_empty_today() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        tracker.quick_add(900).unwrap();
        clock.advance_days(1);

        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.progress.intake_ml, 0);
        assert!(snapshot.entries.is_empty());
        let week = tracker.weekly_series().unwrap();
        assert_eq!(week[5].intake_ml, 900);
        assert_eq!(week[6].intake_ml, 0);
    }

    #[test]
    fn set_goal_applies_floor_and_reports_change() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        let events = tracker.set_goal(900).unwrap();
        assert_eq!(
            events.last(),
            Some(&Event::GoalChanged {
                previous_ml: 2000,
                goal_ml: 1200
            })
        );
        assert!(tracker.set_goal(0).is_err());
    }

    #[test]
    fn theme_toggle_persists() {
        let clock = clock();
        let mut tracker = onboarded(&clock);
        assert_eq!(tracker.theme(), Theme::Light);
        tracker.toggle_theme().unwrap();
        assert_eq!(tracker.theme(), Theme::Dark);
        assert_eq!(tracker.snapshot().unwrap().theme, Theme::Dark);
    }
}
