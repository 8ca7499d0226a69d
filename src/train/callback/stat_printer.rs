//! Stat printer: reports the statistics other callbacks published

use super::traits::{Callback, CallbackAction, CallbackContext};
use std::fs;
use std::path::{Path, PathBuf};

/// File the stat history is written to inside the output directory
pub const STAT_FILE: &str = "stat.json";

/// Logs every stat published during an epoch and closes the epoch in the
/// stat holder.
///
/// Must run after every callback that publishes stats, which is why a
/// configuration always places it last.
#[derive(Clone, Debug, Default)]
pub struct StatPrinter {
    output_dir: Option<PathBuf>,
}

impl StatPrinter {
    /// Log stats without persisting them
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write the full history to `<dir>/stat.json` after each epoch
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: Some(dir.into()) }
    }

    fn write_history(dir: &Path, ctx: &CallbackContext) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(ctx.stats.history())?;
        fs::create_dir_all(dir)?;
        fs::write(dir.join(STAT_FILE), json)
    }
}

impl Callback for StatPrinter {
    fn on_epoch_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        ctx.stats.add_stat("global_step", ctx.global_step as f64);
        let finished = ctx.stats.finalize(ctx.epoch);
        for (name, value) in &finished.stats {
            tracing::info!(epoch = finished.epoch, stat = %name, value, "{name}: {value}");
        }

        if let Some(dir) = &self.output_dir {
            if let Err(e) = Self::write_history(dir, ctx) {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to write {STAT_FILE}");
            }
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "StatPrinter"
    }
}
