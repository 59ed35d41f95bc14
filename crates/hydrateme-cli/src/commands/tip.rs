use hydrateme_core::progress::random_tip;
use hydrateme_core::AppConfig;

use super::CmdResult;

pub fn run() -> CmdResult {
    let config = AppConfig::load_or_default();
    if !config.tips.enabled {
        eprintln!("tips are disabled (set tips.enabled = true to turn them on)");
        return Ok(());
    }
    println!("💡 {}", random_tip());
    Ok(())
}
