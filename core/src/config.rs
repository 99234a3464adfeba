//! Run configuration.
//!
//! The dataset location is an explicit call-time option rather than a
//! baked-in path, so one process can be pointed at several datasets.

use std::path::PathBuf;

/// Configuration for a preparation run. One recognized option: the
/// directory holding the three JSON-lines resources.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub data_dir: PathBuf,
}

impl PrepConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of a named resource inside the data directory.
    pub fn resource(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}
