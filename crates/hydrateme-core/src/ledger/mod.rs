//! Intake ledger: the authoritative daily record.
//!
//! All mutation funnels through [`IntakeLedger::reconcile`] and
//! [`IntakeLedger::apply_intake`], which enforce day rollover before
//! anything else is touched.

mod engine;
mod streak;

pub use engine::{parse_amount, DayTotal, IntakeEntry, IntakeLedger, IntakeOutcome, LedgerStats, Rollover};
pub use streak::{next_streak, StreakUpdate};
