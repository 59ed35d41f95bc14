use hydrateme_core::BADGES;
use serde_json::json;

use super::{open_tracker, print_json, CmdResult};

pub fn status() -> CmdResult {
    let tracker = open_tracker()?;
    print_json(&tracker.snapshot()?)
}

pub fn week() -> CmdResult {
    let tracker = open_tracker()?;
    print_json(&tracker.weekly_series()?)
}

/// Every badge in table order, with its unlock date once earned.
pub fn badges() -> CmdResult {
    let tracker = open_tracker()?;
    let unlocked = tracker.unlocked_badges();
    let rows: Vec<_> = BADGES
        .iter()
        .map(|badge| {
            let earned = unlocked.iter().find(|u| u.key == badge.key);
            json!({
                "key": badge.key,
                "name": badge.name,
                "icon": badge.icon,
                "description": badge.description,
                "unlocked": earned.is_some(),
                "unlock_date": earned.map(|u| u.unlock_date),
            })
        })
        .collect();
    print_json(&rows)
}
