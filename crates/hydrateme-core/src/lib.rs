//! # HydrateMe Core Library
//!
//! This library provides the core business logic for the HydrateMe intake
//! tracker. It follows a CLI-first philosophy: every operation is available
//! through the standalone `hydrateme` binary, and any richer front end is a
//! thin layer over the same [`Tracker`].
//!
//! ## Architecture
//!
//! - **Ledger**: a lazily reconciled day machine that archives the previous
//!   day on the first mutation after midnight and maintains the streak
//! - **Goal**: onboarding profile parsing and the daily goal recommendation
//! - **Badges**: a static rule table evaluated against ledger aggregates
//! - **Storage**: SQLite key-value slots for state and theme, TOML config
//!
//! ## Key Components
//!
//! - [`Tracker`]: entry point for every user action
//! - [`IntakeLedger`]: the authoritative daily record
//! - [`Clock`]: injected time source
//! - [`AppConfig`]: application configuration management

pub mod badges;
pub mod clock;
pub mod error;
pub mod events;
pub mod goal;
pub mod ledger;
pub mod progress;
pub mod storage;
pub mod tracker;

pub use badges::{Badge, UnlockedBadge, BADGES};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, IntakeError, PersistenceError, ValidationError};
pub use events::Event;
pub use goal::{recommend, ActivityLevel, Climate, DailyGoal, Profile, ProfileInput, MIN_DAILY_GOAL_ML};
pub use ledger::{DayTotal, IntakeEntry, IntakeLedger, IntakeOutcome, LedgerStats, Rollover};
pub use progress::{DailyProgress, ProgressTier, GLASS_COUNT};
pub use storage::{AppConfig, Database, StateStore, Theme};
pub use tracker::{HydrationState, IntakeReport, OnboardingReport, Snapshot, Tracker};
