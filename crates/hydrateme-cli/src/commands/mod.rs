pub mod config;
pub mod goal;
pub mod intake;
pub mod onboard;
pub mod status;
pub mod theme;
pub mod tip;

use clap::CommandFactory;
use hydrateme_core::{AppConfig, Event, StateStore, Tracker};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Toasts go to stderr so stdout stays machine-readable.
pub fn notify(events: &[Event], config: &AppConfig) {
    let prefs = &config.notifications;
    if !prefs.enabled {
        return;
    }
    for event in events {
        let allowed = match event {
            Event::GoalReached { .. } => prefs.goal_reached,
            Event::BadgeUnlocked { .. } => prefs.badges,
            _ => true,
        };
        if !allowed {
            continue;
        }
        if let Some(message) = event.notification() {
            eprintln!("{message}");
        }
    }
}

pub fn reset() -> CmdResult {
    StateStore::open()?.clear_state()?;
    println!("state cleared; run `hydrateme onboard` to start again");
    Ok(())
}

pub fn completions<C: CommandFactory>(shell: clap_complete::Shell) {
    let mut cmd = C::command();
    clap_complete::generate(shell, &mut cmd, "hydrateme", &mut std::io::stdout());
}

pub fn open_tracker() -> Result<Tracker, Box<dyn std::error::Error>> {
    Ok(Tracker::open()?)
}
