//! Validate command implementation

use super::{LogLevel, ValidateArgs};
use crate::config::{Deprecation, Schedule, TrainSpec};
use crate::error::ConfigError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of validating one spec file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// File that was checked
    pub config: PathBuf,
    /// Whether every check passed
    pub valid: bool,
    /// `dataflow` or `data`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    /// Optimizer name, if one is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<String>,
    /// Resolved schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Legacy keys that were normalized
    pub deprecations: Vec<Deprecation>,
    /// First failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Structured form of a [`ConfigError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Stable error code
    pub code: &'static str,
    /// Offending field, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Human-readable message
    pub message: String,
}

impl From<&ConfigError> for ErrorReport {
    fn from(err: &ConfigError) -> Self {
        Self { code: err.code(), field: err.field(), message: err.to_string() }
    }
}

impl ValidationReport {
    /// Load and validate the spec at `path`.
    pub fn from_path(path: &Path) -> Self {
        let mut report = Self {
            config: path.to_path_buf(),
            valid: false,
            source: None,
            optimizer: None,
            schedule: None,
            deprecations: Vec::new(),
            error: None,
        };

        let spec = match TrainSpec::from_file(path) {
            Ok(spec) => spec,
            Err(e) => {
                report.error = Some(ErrorReport::from(&e));
                return report;
            }
        };

        report.deprecations = spec.deprecations.clone();
        report.optimizer = spec.optimizer.as_ref().map(|o| o.name.clone());
        report.source = match (&spec.dataflow, &spec.data) {
            (Some(_), None) => Some("dataflow"),
            (None, Some(_)) => Some("data"),
            _ => None,
        };

        match spec.validate() {
            Ok(schedule) => {
                report.valid = true;
                report.schedule = Some(schedule);
            }
            Err(e) => report.error = Some(ErrorReport::from(&e)),
        }
        report
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if self.valid {
            lines.push(format!("Configuration is valid: {}", self.config.display()));
        } else {
            lines.push(format!("Configuration is invalid: {}", self.config.display()));
        }
        if let Some(source) = self.source {
            lines.push(format!("  Source: {source}"));
        }
        if let Some(optimizer) = &self.optimizer {
            lines.push(format!("  Optimizer: {optimizer}"));
        }
        if let Some(schedule) = &self.schedule {
            lines.push(format_schedule(schedule));
        }
        for dep in &self.deprecations {
            lines.push(format!("  Deprecated: {} -> {}", dep.old, dep.new));
        }
        if let Some(error) = &self.error {
            lines.push(format!("  [{}] {}", error.code, error.message));
        }
        lines.join("\n")
    }
}

/// Format the resolved schedule as a string
pub fn format_schedule(schedule: &Schedule) -> String {
    let predict: Vec<String> = schedule.predict_tower.iter().map(ToString::to_string).collect();
    [
        format!("  Steps per epoch: {}", schedule.steps_per_epoch),
        format!(
            "  Epochs: {}..={} ({} total)",
            schedule.starting_epoch,
            schedule.max_epoch,
            schedule.epochs()
        ),
        format!("  Towers: {:?}", schedule.tower),
        format!("  Predict towers: {}", predict.join(", ")),
    ]
    .join("\n")
}

/// Validate the spec named in `args` and print the report.
pub fn run_validate(args: &ValidateArgs, level: LogLevel) -> Result<(), String> {
    tracing::debug!(config = %args.config.display(), "validating config");

    let report = ValidationReport::from_path(&args.config);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| format!("JSON error: {e}"))?;
        println!("{json}");
    } else if level != LogLevel::Quiet {
        println!("{}", report.summary());
    }

    match &report.error {
        None => Ok(()),
        Some(error) => Err(format!("Validation failed: {}", error.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(yaml_body: impl FnOnce(&Path) -> String) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("train.jsonl");
        fs::write(&data, "[[1.0]]\n[[2.0]]\n[[3.0]]\n").unwrap();
        let config = dir.path().join("train.yaml");
        fs::write(&config, yaml_body(&data)).unwrap();
        (dir, config)
    }

    #[test]
    fn test_valid_report() {
        let (_dir, config) = setup(|data| {
            format!(
                "dataset: {{ path: {} }}\noptimizer: {{ name: adam, lr: 0.01 }}\nmax_epoch: 5\npredict_tower: -1\n",
                data.display()
            )
        });
        let report = ValidationReport::from_path(&config);

        assert!(report.valid);
        assert_eq!(report.source, Some("dataflow"));
        assert_eq!(report.optimizer.as_deref(), Some("adam"));
        assert_eq!(report.schedule.as_ref().map(|s| s.steps_per_epoch), Some(3));
        assert_eq!(report.deprecations.len(), 1);

        let summary = report.summary();
        assert!(summary.contains("Steps per epoch: 3"));
        assert!(summary.contains("Predict towers: cpu"));
        assert!(summary.contains("Deprecated: dataset -> dataflow"));
    }

    #[test]
    fn test_invalid_report_carries_code_and_field() {
        let (_dir, config) =
            setup(|data| format!("dataflow: {{ path: {} }}\nnr_tower: 2\ntower: [0, 1]\n", data.display()));
        let report = ValidationReport::from_path(&config);

        assert!(!report.valid);
        let error = report.error.unwrap();
        assert_eq!(error.code, "C001");
        assert_eq!(error.field, Some("nr_tower"));
    }

    #[test]
    fn test_json_report_shape() {
        let (_dir, config) = setup(|_| "bogus: 1\n".to_string());
        let report = ValidationReport::from_path(&config);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["error"]["code"], "C005");
        assert!(json.get("schedule").is_none());
    }

    #[test]
    fn test_run_validate_exit_status() {
        let (_dir, good) = setup(|data| format!("dataflow: {{ path: {} }}\n", data.display()));
        let args = ValidateArgs { config: good, json: false };
        assert!(run_validate(&args, LogLevel::Quiet).is_ok());

        let args = ValidateArgs { config: PathBuf::from("/nonexistent/train.yaml"), json: true };
        let err = run_validate(&args, LogLevel::Quiet).unwrap_err();
        assert!(err.starts_with("Validation failed"));
    }
}
