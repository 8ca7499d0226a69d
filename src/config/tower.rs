//! Tower and device assignment

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Index that selects the CPU instead of a GPU.
pub const CPU_INDEX: i64 = -1;

/// Compute device a tower runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Device {
    /// Host CPU
    Cpu,
    /// GPU by relative index
    Gpu(usize),
}

impl Device {
    /// Map a device index: `-1` is the CPU, non-negative values are GPUs.
    pub fn from_index(index: i64) -> Result<Self> {
        match index {
            CPU_INDEX => Ok(Self::Cpu),
            i if i >= 0 => usize::try_from(i).map(Self::Gpu).map_err(|_| bad_index(index)),
            _ => Err(bad_index(index)),
        }
    }

    /// Inverse of [`Device::from_index`].
    pub fn index(self) -> i64 {
        match self {
            Self::Cpu => CPU_INDEX,
            Self::Gpu(i) => i as i64,
        }
    }
}

fn bad_index(index: i64) -> ConfigError {
    ConfigError::invalid(
        "predict_tower",
        format!("device index {index} is negative"),
        "Use -1 for the CPU or a GPU index >= 0",
    )
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Gpu(i) => write!(f, "gpu:{i}"),
        }
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.index())
    }
}

/// Prediction towers as given by the caller: one index or a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictTower {
    /// Single device index
    One(i64),
    /// Ordered device indices
    Many(Vec<i64>),
}

impl Default for PredictTower {
    fn default() -> Self {
        Self::Many(vec![0])
    }
}

impl PredictTower {
    /// Normalize to an ordered device list; a scalar becomes a one-element
    /// list.
    pub fn normalize(&self) -> Result<Vec<Device>> {
        match self {
            Self::One(i) => Ok(vec![Device::from_index(*i)?]),
            Self::Many(list) => list.iter().map(|i| Device::from_index(*i)).collect(),
        }
    }
}

impl From<i64> for PredictTower {
    fn from(v: i64) -> Self {
        Self::One(v)
    }
}

impl From<i32> for PredictTower {
    fn from(v: i32) -> Self {
        Self::One(i64::from(v))
    }
}

impl From<Vec<i64>> for PredictTower {
    fn from(v: Vec<i64>) -> Self {
        Self::Many(v)
    }
}

impl From<Vec<i32>> for PredictTower {
    fn from(v: Vec<i32>) -> Self {
        Self::Many(v.into_iter().map(i64::from).collect())
    }
}

/// Training towers as a count or an explicit list, used by the legacy
/// `set_tower` form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TowerArg {
    /// Expand to `0..n`
    Count(usize),
    /// Use as given
    List(Vec<usize>),
}

impl From<usize> for TowerArg {
    fn from(v: usize) -> Self {
        Self::Count(v)
    }
}

impl From<Vec<usize>> for TowerArg {
    fn from(v: Vec<usize>) -> Self {
        Self::List(v)
    }
}

/// `0..count` as a tower list, rejecting a count of zero.
pub(crate) fn tower_range(count: usize) -> Result<Vec<usize>> {
    if count == 0 {
        return Err(ConfigError::invalid(
            "nr_tower",
            "0 (must be >= 1)",
            "Train on at least one tower",
        ));
    }
    Ok((0..count).collect())
}

/// Resolve the training tower list from the count shorthand and/or the
/// explicit list.
///
/// An explicit list may only be combined with the default count of 1.
pub(crate) fn resolve_towers(nr_tower: Option<usize>, tower: Option<Vec<usize>>) -> Result<Vec<usize>> {
    match (nr_tower, tower) {
        (Some(n), Some(_)) if n != 1 => {
            Err(ConfigError::Conflict { first: "nr_tower", second: "tower" })
        }
        (_, Some(list)) if list.is_empty() => Err(ConfigError::invalid(
            "tower",
            "empty tower list",
            "List at least one device index, or use `nr_tower`",
        )),
        (_, Some(list)) => Ok(list),
        (Some(n), None) => tower_range(n),
        (None, None) => tower_range(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_expands_to_range() {
        assert_eq!(resolve_towers(Some(4), None).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(resolve_towers(None, None).unwrap(), vec![0]);
    }

    #[test]
    fn test_list_with_count_greater_than_one_conflicts() {
        let err = resolve_towers(Some(2), Some(vec![0, 1])).unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { first: "nr_tower", second: "tower" }));
    }

    #[test]
    fn test_list_with_default_count_is_kept() {
        assert_eq!(resolve_towers(Some(1), Some(vec![2, 3])).unwrap(), vec![2, 3]);
        assert_eq!(resolve_towers(None, Some(vec![1])).unwrap(), vec![1]);
    }

    #[test]
    fn test_zero_towers_rejected() {
        assert!(resolve_towers(Some(0), None).is_err());
        assert!(resolve_towers(None, Some(vec![])).is_err());
    }

    #[test]
    fn test_predict_tower_scalar_becomes_list() {
        assert_eq!(PredictTower::from(2).normalize().unwrap(), vec![Device::Gpu(2)]);
        assert_eq!(PredictTower::default().normalize().unwrap(), vec![Device::Gpu(0)]);
    }

    #[test]
    fn test_predict_tower_cpu_sentinel() {
        assert_eq!(PredictTower::from(-1).normalize().unwrap(), vec![Device::Cpu]);
        assert_eq!(
            PredictTower::from(vec![0, -1]).normalize().unwrap(),
            vec![Device::Gpu(0), Device::Cpu]
        );
        assert!(PredictTower::from(-2).normalize().is_err());
    }

    #[test]
    fn test_device_display_and_serialize() {
        assert_eq!(Device::Cpu.to_string(), "cpu");
        assert_eq!(Device::Gpu(1).to_string(), "gpu:1");
        assert_eq!(serde_json::to_string(&[Device::Gpu(1), Device::Cpu]).unwrap(), "[1,-1]");
    }
}
