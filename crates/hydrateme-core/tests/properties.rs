//! Property tests for the goal formula and the ledger laws.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use hydrateme_core::goal::{recommend, ActivityLevel, Climate, DailyGoal, MIN_DAILY_GOAL_ML};
use hydrateme_core::ledger::{next_streak, IntakeLedger};
use proptest::prelude::*;

fn activity() -> impl Strategy<Value = ActivityLevel> {
    prop_oneof![
        Just(ActivityLevel::Sedentary),
        Just(ActivityLevel::Moderate),
        Just(ActivityLevel::Active),
    ]
}

fn climate() -> impl Strategy<Value = Climate> {
    prop_oneof![
        Just(Climate::Cold),
        Just(Climate::Temperate),
        Just(Climate::Hot),
    ]
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

proptest! {
    #[test]
    fn recommendation_never_below_floor(
        age in 1u32..120,
        weight in 0.0f64..300.0,
        activity in activity(),
        climate in climate(),
    ) {
        prop_assert!(recommend(age, weight, activity, climate) >= MIN_DAILY_GOAL_ML);
    }

    #[test]
    fn recommendation_is_monotonic_in_weight(
        weight in 1.0f64..250.0,
        extra in 0.0f64..50.0,
        activity in activity(),
        climate in climate(),
    ) {
        let lighter = recommend(30, weight, activity, climate);
        let heavier = recommend(30, weight + extra, activity, climate);
        prop_assert!(heavier >= lighter);
    }

    #[test]
    fn same_day_entries_sum_to_intake(amounts in prop::collection::vec(1i64..2000, 1..30)) {
        let goal = DailyGoal::new(2000);
        let mut ledger = IntakeLedger::new(start().date());
        for (i, amount) in amounts.iter().enumerate() {
            let now = start() + Duration::minutes(i as i64);
            ledger.apply_intake(*amount, now, goal).unwrap();
        }
        let sum: u32 = ledger.today_entries().iter().map(|e| e.amount_ml).sum();
        prop_assert_eq!(sum, ledger.current_intake());
        prop_assert_eq!(ledger.today_entries().len(), amounts.len());
        prop_assert!(ledger.max_intake_ever() >= ledger.current_intake());
    }

    #[test]
    fn reconcile_is_idempotent(amount in 1i64..5000, gap in 1i64..10) {
        let goal = DailyGoal::new(2000);
        let mut ledger = IntakeLedger::new(start().date());
        ledger.apply_intake(amount, start(), goal).unwrap();

        let later = start().date() + Duration::days(gap);
        prop_assert!(ledger.reconcile(later).is_some());
        let once = ledger.clone();
        prop_assert!(ledger.reconcile(later).is_none());
        prop_assert_eq!(ledger, once);
    }

    #[test]
    fn goal_reached_fires_at_most_once_per_day(amounts in prop::collection::vec(1i64..1500, 1..20)) {
        let goal = DailyGoal::new(2000);
        let mut ledger = IntakeLedger::new(start().date());
        let mut reached = 0;
        for (i, amount) in amounts.iter().enumerate() {
            let now = start() + Duration::minutes(i as i64);
            if ledger.apply_intake(*amount, now, goal).unwrap().goal_reached {
                reached += 1;
            }
        }
        prop_assert!(reached <= 1);
        prop_assert_eq!(reached == 1, ledger.current_intake() >= goal.ml());
    }

    #[test]
    fn streak_law(previous in 0u32..1000, yesterday in proptest::option::of(0u32..5000), goal in 1200u32..4000) {
        let update = next_streak(previous, yesterday, DailyGoal::new(goal));
        match yesterday {
            Some(ml) if ml >= goal => prop_assert_eq!(update.current, previous + 1),
            _ => prop_assert_eq!(update.current, 1),
        }
    }

    #[test]
    fn rejected_amounts_leave_ledger_untouched(amount in i64::MIN..=0) {
        let mut ledger = IntakeLedger::new(start().date());
        let before = ledger.clone();
        let later = start() + Duration::days(3);
        prop_assert!(ledger.apply_intake(amount, later, DailyGoal::new(2000)).is_err());
        prop_assert_eq!(ledger, before);
    }
}
