//! Derived display values for today's progress.
//!
//! Nothing here mutates state; the presentation layer renders these
//! numbers as a ring, a row of glasses, a greeting and a tip.

use chrono::{NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::goal::DailyGoal;

/// Glasses drawn in the glass row; one tap pours `goal / GLASS_COUNT`.
pub const GLASS_COUNT: usize = 8;

/// Colour band for the progress ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Low,
    Started,
    Halfway,
    Close,
    Complete,
}

impl ProgressTier {
    /// Tier for a progress ratio, already clamped to `0.0..=1.0`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            ProgressTier::Complete
        } else if ratio >= 0.75 {
            ProgressTier::Close
        } else if ratio >= 0.5 {
            ProgressTier::Halfway
        } else if ratio >= 0.25 {
            ProgressTier::Started
        } else {
            ProgressTier::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProgressTier::Complete => "#50c878",
            ProgressTier::Close => "#4a90e2",
            ProgressTier::Halfway => "#50c1e9",
            ProgressTier::Started => "#6c5ce7",
            ProgressTier::Low => "#ff7675",
        }
    }
}

/// Today's intake measured against the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub intake_ml: u32,
    pub goal_ml: u32,
    pub remaining_ml: u32,
    /// `0.0..=1.0`
    pub ratio: f64,
    pub percent: u32,
    pub tier: ProgressTier,
    pub color: String,
    pub glasses_filled: usize,
    pub goal_met: bool,
}

impl DailyProgress {
    pub fn new(intake_ml: u32, goal: DailyGoal) -> Self {
        let goal_ml = goal.ml();
        let ratio = (intake_ml as f64 / goal_ml as f64).min(1.0);
        let tier = ProgressTier::from_ratio(ratio);
        let glasses = (intake_ml as u64 * GLASS_COUNT as u64 / goal_ml as u64) as usize;
        Self {
            intake_ml,
            goal_ml,
            remaining_ml: goal_ml.saturating_sub(intake_ml),
            ratio,
            percent: (ratio * 100.0).round() as u32,
            tier,
            color: tier.color().to_string(),
            glasses_filled: glasses.min(GLASS_COUNT),
            goal_met: intake_ml >= goal_ml,
        }
    }
}

/// "Good morning, Sam!" style greeting for the hour of `now`.
pub fn greeting(name: &str, now: NaiveDateTime) -> String {
    let who = if name.trim().is_empty() {
        "there"
    } else {
        name.trim()
    };
    let part = match now.hour() {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{part}, {who}!")
}

pub const HYDRATION_TIPS: &[&str] = &[
    "Drinking water helps maintain the balance of body fluids.",
    "Water helps energize muscles and keeps them from getting tired.",
    "Drinking water can help control calories and support weight management.",
    "Water helps your kidneys remove waste from your blood.",
    "Even mild dehydration can drain your energy and make you tired.",
    "Drinking water can improve your skin's appearance.",
    "Water helps maintain normal bowel function and prevent constipation.",
    "Staying hydrated helps maintain proper brain function.",
    "Drinking water before meals can help reduce appetite.",
    "Water helps regulate body temperature.",
];

/// A random tip.
pub fn random_tip() -> &'static str {
    HYDRATION_TIPS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(HYDRATION_TIPS[0])
}
