use clap::Args;
use hydrateme_core::AppConfig;

use super::{notify, open_tracker, print_json, CmdResult};

#[derive(Args)]
pub struct AddArgs {
    /// Amount in millilitres
    #[arg(required_unless_present = "button")]
    amount: Option<String>,
    /// Use the n-th configured quick-add amount instead (0-based)
    #[arg(long, conflicts_with = "amount")]
    button: Option<usize>,
}

pub fn add(args: AddArgs) -> CmdResult {
    let config = AppConfig::load_or_default();
    let mut tracker = open_tracker()?;

    let report = match (args.amount, args.button) {
        (Some(raw), _) => tracker.quick_add_raw(&raw)?,
        (None, Some(index)) => {
            let amounts = config.quick_amounts();
            let amount = amounts.get(index).copied().ok_or_else(|| {
                format!(
                    "quick-add button {index} not configured ({} available)",
                    amounts.len()
                )
            })?;
            tracker.quick_add(i64::from(amount))?
        }
        (None, None) => return Err("provide an amount or --button".into()),
    };

    notify(&report.events, &config);
    print_json(&report)
}

pub fn glass(index: usize) -> CmdResult {
    let config = AppConfig::load_or_default();
    let mut tracker = open_tracker()?;
    let report = tracker.glass_tap(index)?;
    notify(&report.events, &config);
    print_json(&report)
}
