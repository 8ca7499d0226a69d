//! Session configuration and variable initialization
//!
//! - [`SessionConfig`] - runtime options the trainer's session is created with
//! - [`SessionInit`] - how variables are initialized when a run starts

mod config;
mod init;

pub use config::SessionConfig;
pub use init::{CheckpointRestore, DictRestore, JustCurrentSession, SessionInit, VariableStore};

pub(crate) use init::check_checkpoint_exists;
