use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Input/output association for one processed replay.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestRecord {
    pub replay_file: String,
    pub unit_data_file: String,
    pub apm_data_file: String,
}

/// Accumulates one record per successfully processed replay across a batch
/// run. Written exactly once, at the end.
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    replays: Vec<ManifestRecord>,
}

impl Manifest {
    pub fn new() -> Manifest {
        Manifest::default()
    }

    pub fn push(&mut self, record: ManifestRecord) {
        self.replays.push(record);
    }

    pub fn len(&self) -> usize {
        self.replays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replays.is_empty()
    }

    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join("data_manifest.json");
        fs::write(&path, serde_json::to_vec_pretty(self)?)?;
        Ok(path)
    }
}
