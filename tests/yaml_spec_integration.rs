//! YAML spec integration tests
//!
//! Loads spec files from disk, attaches a model in code and runs the result
//! through the trainer.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trainconfig::config::{Device, TrainSpec};
use trainconfig::data::Datapoint;
use trainconfig::model::{InputDesc, ModelDesc};
use trainconfig::session::{CheckpointRestore, VariableStore};
use trainconfig::train::callback::STAT_FILE;
use trainconfig::train::SimpleTrainer;
use trainconfig::ConfigError;

struct MeanSquare;

impl ModelDesc for MeanSquare {
    fn name(&self) -> &str {
        "mean_square"
    }

    fn inputs(&self) -> Vec<InputDesc> {
        vec![InputDesc::new("features", vec![None, Some(2)]), InputDesc::new("label", vec![None])]
    }

    fn loss(&self, datapoint: &Datapoint) -> f32 {
        let values: Vec<f32> = datapoint.iter().flatten().copied().collect();
        values.iter().map(|v| v * v).sum::<f32>() / values.len().max(1) as f32
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(rows: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let body: String = (0..rows).map(|i| format!("[[{i}.0, 1.0], [0.5]]\n")).collect();
        fs::write(dir.path().join("train.jsonl"), body).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_spec(&self, body: &str) -> PathBuf {
        let yaml = body.replace("$DIR", &self.dir.path().display().to_string());
        let path = self.path("train.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }
}

fn load(path: &Path) -> Result<TrainSpec, ConfigError> {
    TrainSpec::from_file(path)
}

#[test]
fn test_full_spec_trains() {
    let ws = Workspace::new(5);
    let path = ws.write_spec(
        "dataflow:\n  path: $DIR/train.jsonl\n\
         optimizer:\n  name: adamw\n  lr: 0.0005\n  weight_decay: 0.1\n\
         starting_epoch: 2\n\
         max_epoch: \"4\"\n\
         tower: [0, 2]\n\
         predict_tower: [0, -1]\n\
         log_interval: 2\n\
         log_dir: $DIR/logs\n",
    );

    let config = load(&path).unwrap().into_builder().unwrap().model(MeanSquare).build().unwrap();
    assert_eq!(config.steps_per_epoch(), 5);
    assert_eq!(config.tower(), &[0, 2]);
    assert_eq!(config.predict_tower(), &[Device::Gpu(0), Device::Cpu]);

    let result = SimpleTrainer::new(config).unwrap().train().unwrap();
    assert_eq!(result.epochs_run, 3);
    assert_eq!(result.global_step, 15);

    let history: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.path("logs").join(STAT_FILE)).unwrap()).unwrap();
    assert_eq!(history.as_array().map(Vec::len), Some(3));
    assert_eq!(history[0]["epoch"], 2);
}

#[test]
fn test_legacy_keys_are_normalized() {
    let ws = Workspace::new(4);
    let path = ws.write_spec(
        "dataset: { path: $DIR/train.jsonl }\nstep_per_epoch: 2\noptimizer: { name: sgd, lr: 0.1 }\nmax_epoch: 1\n",
    );

    let spec = load(&path).unwrap();
    assert_eq!(spec.deprecations.len(), 2);

    let config = spec.into_builder().unwrap().model(MeanSquare).build().unwrap();
    assert_eq!(config.steps_per_epoch(), 2);
    let olds: Vec<_> = config.deprecations().iter().map(|d| d.old).collect();
    assert_eq!(olds, vec!["dataset", "step_per_epoch"]);
}

#[test]
fn test_conflicting_step_keys_fail() {
    let ws = Workspace::new(1);
    let path = ws.write_spec("dataflow: { path: $DIR/train.jsonl }\nstep_per_epoch: 2\nsteps_per_epoch: 3\n");
    let err = load(&path).unwrap_err();
    assert_eq!(err.code(), "C005");
    assert!(err.to_string().contains("step_per_epoch"));
}

#[test]
fn test_checkpoint_session_init() {
    let ws = Workspace::new(2);
    let vars: VariableStore = [("bias".to_string(), vec![0.25])].into_iter().collect();
    CheckpointRestore::save(ws.path("model.json"), &vars).unwrap();
    let path = ws.write_spec(
        "data: { feed: { path: $DIR/train.jsonl } }\n\
         optimizer: { name: adam, lr: 0.001 }\n\
         session_init: { checkpoint: $DIR/model.json }\n\
         max_epoch: 1\n",
    );

    let config = load(&path).unwrap().into_builder().unwrap().model(MeanSquare).build().unwrap();
    assert_eq!(config.session_init().name(), "CheckpointRestore");
    assert!(config.data().is_some());

    let trainer = SimpleTrainer::new(config).unwrap();
    assert_eq!(trainer.variables().get("bias"), Some(&vec![0.25]));
}

#[test]
fn test_missing_optimizer_reported_at_build() {
    let ws = Workspace::new(2);
    let path = ws.write_spec("dataflow: { path: $DIR/train.jsonl }\n");
    let err = load(&path).unwrap().into_builder().unwrap().model(MeanSquare).build().unwrap_err();
    assert!(matches!(err, ConfigError::Missing { field: "optimizer", .. }));
}

#[test]
fn test_bad_dataflow_line_reported() {
    let ws = Workspace::new(0);
    fs::write(ws.path("train.jsonl"), "[[1.0]]\nnot json\n").unwrap();
    let path = ws.write_spec("dataflow: { path: $DIR/train.jsonl }\n");
    let err = load(&path).unwrap().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("line 2"));
}
