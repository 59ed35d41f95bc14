use clap::Args;
use hydrateme_core::{AppConfig, ProfileInput};
use serde_json::json;

use super::{notify, open_tracker, print_json, CmdResult};

#[derive(Args)]
pub struct OnboardArgs {
    /// Your name
    #[arg(long)]
    name: Option<String>,
    /// Age in years
    #[arg(long)]
    age: Option<String>,
    /// Weight in kilograms
    #[arg(long)]
    weight: Option<String>,
    /// sedentary, moderate or active
    #[arg(long)]
    activity: Option<String>,
    /// temperate, hot or cold
    #[arg(long)]
    climate: Option<String>,
    /// Explicit goal in millilitres instead of the recommendation
    #[arg(long)]
    goal: Option<String>,
    /// Skip the profile questions and use the configured defaults
    #[arg(long, conflicts_with_all = ["age", "weight", "activity", "climate", "goal"])]
    quick: bool,
}

impl OnboardArgs {
    fn into_input(self, config: &AppConfig) -> ProfileInput {
        let name = self
            .name
            .or_else(|| Some(config.onboarding.default_name.clone()));
        if self.quick {
            return ProfileInput {
                name,
                goal_override: Some(config.onboarding.default_goal_ml.to_string()),
                ..Default::default()
            };
        }
        ProfileInput {
            name,
            age: self.age,
            weight_kg: self.weight,
            activity_level: self.activity,
            climate: self.climate,
            goal_override: self.goal,
        }
    }
}

pub fn run(args: OnboardArgs) -> CmdResult {
    let config = AppConfig::load_or_default();
    let input = args.into_input(&config);

    let mut tracker = open_tracker()?;
    let report = tracker.onboard(&input)?;

    notify(&report.events, &config);
    for fallback in &report.fallbacks {
        eprintln!("warning: {fallback}");
    }

    let fallbacks: Vec<String> = report.fallbacks.iter().map(ToString::to_string).collect();
    print_json(&json!({
        "profile": report.profile,
        "goal_ml": report.goal_ml,
        "recommended_ml": report.recommended_ml,
        "fallbacks": fallbacks,
        "events": report.events,
    }))
}
