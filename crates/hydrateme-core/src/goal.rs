//! Onboarding profile and daily goal recommendation.
//!
//! This module provides:
//! - The user [`Profile`] collected at onboarding
//! - Lenient parsing of raw form input with per-field defaults
//! - The pure [`recommend`] function that turns a profile into a goal

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest daily goal the tracker will ever use, in millilitres.
pub const MIN_DAILY_GOAL_ML: u32 = 1200;

pub const DEFAULT_NAME: &str = "Hydration Hero";
pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_WEIGHT_KG: f64 = 60.0;

const ML_PER_KG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Moderate,
    Active,
}

impl ActivityLevel {
    fn bonus_ml(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 0.0,
            ActivityLevel::Moderate => 300.0,
            ActivityLevel::Active => 600.0,
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedentary => write!(f, "sedentary"),
            Self::Moderate => write!(f, "moderate"),
            Self::Active => write!(f, "active"),
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    #[default]
    Temperate,
    Hot,
    Cold,
}

impl Climate {
    fn adjustment_ml(self) -> f64 {
        match self {
            Climate::Temperate => 0.0,
            Climate::Hot => 400.0,
            Climate::Cold => -200.0,
        }
    }
}

impl std::fmt::Display for Climate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperate => write!(f, "temperate"),
            Self::Hot => write!(f, "hot"),
            Self::Cold => write!(f, "cold"),
        }
    }
}

impl std::str::FromStr for Climate {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperate" => Ok(Self::Temperate),
            "hot" => Ok(Self::Hot),
            "cold" => Ok(Self::Cold),
            _ => Err(format!("Unknown climate: {}", s)),
        }
    }
}

/// Recommended daily intake in millilitres.
///
/// `weight * 30`, plus 300/600 for moderate/active, plus 400 for hot or
/// minus 200 for cold, rounded and floored at [`MIN_DAILY_GOAL_ML`]. Age is
/// part of the contract but does not currently move the result.
pub fn recommend(_age_years: u32, weight_kg: f64, activity: ActivityLevel, climate: Climate) -> u32 {
    let base = weight_kg * ML_PER_KG + activity.bonus_ml() + climate.adjustment_ml();
    let rounded = base.round();
    if rounded.is_nan() || rounded < MIN_DAILY_GOAL_ML as f64 {
        return MIN_DAILY_GOAL_ML;
    }
    if rounded >= u32::MAX as f64 {
        return u32::MAX;
    }
    rounded as u32
}

/// Daily goal in millilitres, never below [`MIN_DAILY_GOAL_ML`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct DailyGoal(u32);

impl DailyGoal {
    pub fn new(ml: u32) -> Self {
        Self(ml.max(MIN_DAILY_GOAL_ML))
    }

    pub fn ml(self) -> u32 {
        self.0
    }

    /// Amount poured by one glass tap, `goal / count` rounded.
    pub fn per_glass_ml(self, count: usize) -> u32 {
        let count = count.max(1) as f64;
        (self.0 as f64 / count).round() as u32
    }
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl From<u32> for DailyGoal {
    fn from(ml: u32) -> Self {
        Self::new(ml)
    }
}

impl From<DailyGoal> for u32 {
    fn from(goal: DailyGoal) -> Self {
        goal.0
    }
}

impl std::fmt::Display for DailyGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ml", self.0)
    }
}

/// User profile collected at onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub climate: Climate,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            age: DEFAULT_AGE,
            weight_kg: DEFAULT_WEIGHT_KG,
            activity_level: ActivityLevel::default(),
            climate: Climate::default(),
        }
    }
}

impl Profile {
    pub fn recommended_goal(&self) -> DailyGoal {
        DailyGoal::new(recommend(
            self.age,
            self.weight_kg,
            self.activity_level,
            self.climate,
        ))
    }
}

/// Raw onboarding form values, exactly as typed.
///
/// Empty or missing fields silently take their defaults; fields that are
/// present but unparsable take their defaults and are reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub age: Option<String>,
    pub weight_kg: Option<String>,
    pub activity_level: Option<String>,
    pub climate: Option<String>,
    /// Explicit goal that replaces the recommendation.
    pub goal_override: Option<String>,
}

/// Result of resolving a [`ProfileInput`].
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: Profile,
    pub goal: DailyGoal,
    /// Fields that fell back to their defaults.
    pub fallbacks: Vec<ValidationError>,
}

impl ProfileInput {
    /// Parse every field, falling back to defaults instead of failing.
    pub fn resolve(&self) -> ResolvedProfile {
        let mut fallbacks = Vec::new();

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let age = parse_field(&self.age, "age", DEFAULT_AGE, &mut fallbacks, |s| {
            s.parse::<u32>().ok().filter(|a| *a > 0)
        });
        let weight_kg = parse_field(
            &self.weight_kg,
            "weight_kg",
            DEFAULT_WEIGHT_KG,
            &mut fallbacks,
            |s| s.parse::<f64>().ok().filter(|w| w.is_finite() && *w > 0.0),
        );
        let activity_level = parse_field(
            &self.activity_level,
            "activity_level",
            ActivityLevel::default(),
            &mut fallbacks,
            |s| s.parse().ok(),
        );
        let climate = parse_field(
            &self.climate,
            "climate",
            Climate::default(),
            &mut fallbacks,
            |s| s.parse().ok(),
        );

        let profile = Profile {
            name,
            age,
            weight_kg,
            activity_level,
            climate,
        };

        let recommended = profile.recommended_goal();
        let goal = match self.goal_override.as_deref().map(str::trim) {
            None | Some("") => recommended,
            Some(raw) => match raw.parse::<u32>().ok().filter(|g| *g > 0) {
                Some(ml) => DailyGoal::new(ml),
                None => {
                    fallbacks.push(fallback("goal_override", raw, recommended.ml()));
                    recommended
                }
            },
        };

        for fb in &fallbacks {
            tracing::debug!("{fb}");
        }

        ResolvedProfile {
            profile,
            goal,
            fallbacks,
        }
    }
}

fn parse_field<T, F>(
    raw: &Option<String>,
    field: &str,
    default: T,
    fallbacks: &mut Vec<ValidationError>,
    parse: F,
) -> T
where
    T: std::fmt::Display,
    F: Fn(&str) -> Option<T>,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => default,
        Some(value) => match parse(value) {
            Some(parsed) => parsed,
            None => {
                fallbacks.push(fallback(field, value, &default));
                default
            }
        },
    }
}

fn fallback(field: &str, value: &str, default: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidProfileInput {
        field: field.to_string(),
        value: value.to_string(),
        fallback: default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(weight: &str, activity: &str, climate: &str) -> ProfileInput {
        ProfileInput {
            weight_kg: Some(weight.into()),
            activity_level: Some(activity.into()),
            climate: Some(climate.into()),
            ..Default::default()
        }
    }

    #[test]
    fn active_hot_seventy_kilos() {
        assert_eq!(recommend(30, 70.0, ActivityLevel::Active, Climate::Hot), 3100);
    }

    #[test]
    fn non_finite_weight_saturates_or_floors() {
        let sedentary = ActivityLevel::Sedentary;
        let temperate = Climate::Temperate;
        assert_eq!(recommend(25, f64::INFINITY, sedentary, temperate), u32::MAX);
        assert_eq!(recommend(25, f64::NAN, sedentary, temperate), MIN_DAILY_GOAL_ML);
        assert_eq!(recommend(25, f64::NEG_INFINITY, sedentary, temperate), MIN_DAILY_GOAL_ML);
        assert!(
            recommend(25, f64::INFINITY, sedentary, temperate)
                >= recommend(25, 1.0e12, sedentary, temperate)
        );
    }

    #[test]
    fn moderate_cold() {
        // 80 * 30 + 300 - 200
        assert_eq!(recommend(40, 80.0, ActivityLevel::Moderate, Climate::Cold), 2500);
    }

    #[test]
    fn light_user_is_floored() {
        assert_eq!(recommend(25, 20.0, ActivityLevel::Sedentary, Climate::Cold), MIN_DAILY_GOAL_ML);
        assert_eq!(recommend(25, 0.0, ActivityLevel::Sedentary, Climate::Temperate), MIN_DAILY_GOAL_ML);
    }

    #[test]
    fn fractional_weight_rounds() {
        // 61.7 * 30 = 1851
        assert_eq!(recommend(25, 61.7, ActivityLevel::Sedentary, Climate::Temperate), 1851);
        // 45.25 * 30 = 1357.5 -> 1358
        assert_eq!(recommend(25, 45.25, ActivityLevel::Sedentary, Climate::Temperate), 1358);
    }

    #[test]
    fn daily_goal_enforces_floor() {
        assert_eq!(DailyGoal::new(500).ml(), MIN_DAILY_GOAL_ML);
        assert_eq!(DailyGoal::new(2500).ml(), 2500);
        let parsed: DailyGoal = serde_json::from_str("900").unwrap();
        assert_eq!(parsed.ml(), MIN_DAILY_GOAL_ML);
    }

    #[test]
    fn per_glass_rounds() {
        assert_eq!(DailyGoal::new(2000).per_glass_ml(8), 250);
        assert_eq!(DailyGoal::new(2500).per_glass_ml(8), 313);
        assert_eq!(DailyGoal::new(3100).per_glass_ml(8), 388);
    }

    #[test]
    fn empty_input_uses_documented_defaults() {
        let resolved = ProfileInput::default().resolve();
        assert_eq!(resolved.profile, Profile::default());
        assert_eq!(resolved.goal.ml(), 1800);
        assert!(resolved.fallbacks.is_empty());
    }

    #[test]
    fn garbage_fields_fall_back_and_are_reported() {
        let resolved = ProfileInput {
            name: Some("  ".into()),
            age: Some("old".into()),
            weight_kg: Some("-3".into()),
            activity_level: Some("couch".into()),
            climate: Some("HOT".into()),
            goal_override: None,
        }
        .resolve();

        assert_eq!(resolved.profile.name, DEFAULT_NAME);
        assert_eq!(resolved.profile.age, DEFAULT_AGE);
        assert_eq!(resolved.profile.weight_kg, DEFAULT_WEIGHT_KG);
        assert_eq!(resolved.profile.activity_level, ActivityLevel::Sedentary);
        assert_eq!(resolved.profile.climate, Climate::Hot);
        let fields: Vec<_> = resolved
            .fallbacks
            .iter()
            .map(|f| match f {
                ValidationError::InvalidProfileInput { field, .. } => field.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(fields, vec!["age", "weight_kg", "activity_level"]);
    }

    #[test]
    fn goal_override_replaces_recommendation() {
        let mut raw = input("70", "active", "hot");
        raw.goal_override = Some("2200".into());
        assert_eq!(raw.resolve().goal.ml(), 2200);

        raw.goal_override = Some("800".into());
        assert_eq!(raw.resolve().goal.ml(), MIN_DAILY_GOAL_ML);

        raw.goal_override = Some("lots".into());
        let resolved = raw.resolve();
        assert_eq!(resolved.goal.ml(), 3100);
        assert_eq!(resolved.fallbacks.len(), 1);
    }
}
