use serde_json::json;

use super::{open_tracker, print_json, CmdResult};

pub fn run(ml: Option<u32>) -> CmdResult {
    let mut tracker = open_tracker()?;
    match ml {
        Some(ml) => {
            let events = tracker.set_goal(ml)?;
            print_json(&events)
        }
        None => {
            let state = tracker.state().ok_or(hydrateme_core::CoreError::NotOnboarded)?;
            print_json(&json!({
                "goal_ml": state.goal.ml(),
                "recommended_ml": state.profile.recommended_goal().ml(),
            }))
        }
    }
}
