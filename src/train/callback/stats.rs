//! Per-epoch statistics shared between callbacks

use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics of one finished epoch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpochStats {
    /// Epoch number
    pub epoch: usize,
    /// Named values published during the epoch
    pub stats: BTreeMap<String, f64>,
}

/// Collects named values during an epoch and keeps the history of finished
/// epochs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatHolder {
    current: BTreeMap<String, f64>,
    history: Vec<EpochStats>,
}

impl StatHolder {
    /// Publish a value for the current epoch, replacing any earlier value
    /// under the same name.
    pub fn add_stat(&mut self, name: impl Into<String>, value: f64) {
        self.current.insert(name.into(), value);
    }

    /// Values published so far this epoch.
    pub fn current(&self) -> &BTreeMap<String, f64> {
        &self.current
    }

    /// Close the current epoch: move its values into the history.
    pub fn finalize(&mut self, epoch: usize) -> &EpochStats {
        let stats = std::mem::take(&mut self.current);
        self.history.push(EpochStats { epoch, stats });
        &self.history[self.history.len() - 1]
    }

    /// All finished epochs, oldest first.
    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_moves_current_into_history() {
        let mut holder = StatHolder::default();
        holder.add_stat("loss", 0.5);
        holder.add_stat("loss", 0.4);
        holder.add_stat("acc", 0.9);

        let finished = holder.finalize(3).clone();
        assert_eq!(finished.epoch, 3);
        assert_eq!(finished.stats.get("loss"), Some(&0.4));
        assert!(holder.current().is_empty());
        assert_eq!(holder.history().len(), 1);
    }

    #[test]
    fn test_epoch_stats_serialize() {
        let mut holder = StatHolder::default();
        holder.add_stat("loss", 1.0);
        holder.finalize(1);
        let json = serde_json::to_string(holder.history()).unwrap();
        assert_eq!(json, r#"[{"epoch":1,"stats":{"loss":1.0}}]"#);
    }
}
