use clap::Subcommand;
use hydrateme_core::Theme;

use super::{open_tracker, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "light" or "dark"
        theme: Theme,
    },
}

pub fn run(action: ThemeAction) -> CmdResult {
    let mut tracker = open_tracker()?;
    match action {
        ThemeAction::Get => {}
        ThemeAction::Toggle => {
            tracker.toggle_theme()?;
        }
        ThemeAction::Set { theme } => {
            tracker.set_theme(theme)?;
        }
    }
    println!("{}", tracker.theme());
    Ok(())
}
