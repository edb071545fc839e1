pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{info, warn};
use serde::Serialize;

use crate::analyzer::{apm, assemble_composition_data, metadata::extract_metadata};
use crate::error::Result;
use crate::parser::catalog_parser::UnitCatalog;
use crate::parser::replay_parser::Replay;

use manifest::{Manifest, ManifestRecord};

/// Candidate input files are matched on this suffix, case-insensitively.
pub const REPLAY_EXTENSION: &str = ".replay";

pub struct BatchSummary {
    pub manifest_path: PathBuf,
    pub processed: usize,
    pub skipped: Vec<SkippedReplay>,
}

pub struct SkippedReplay {
    pub path: PathBuf,
    pub reason: String,
}

/// Replay files under `replay_dir`, sorted by name so a batch run and its
/// manifest come out the same on every platform.
pub fn replays_from_dir(replay_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(replay_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.to_lowercase().ends_with(REPLAY_EXTENSION) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

// Output files are named after the replay file up to its first dot.
fn output_prefix(replay_path: &Path) -> String {
    let name = replay_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_owned()
}

fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(document)?)?;
    Ok(())
}

/// Produces both documents for one replay and returns its manifest record.
pub fn generate_replay_data(
    replay_path: &Path,
    output_dir: &Path,
    catalog: &UnitCatalog,
) -> Result<ManifestRecord> {
    let replay = Replay::from_file(replay_path)?;
    let prefix = output_prefix(replay_path);
    let unit_data_file = output_dir.join(format!("{prefix}_unit.json"));
    let apm_data_file = output_dir.join(format!("{prefix}_apm.json"));

    let composition = assemble_composition_data(&replay, catalog)?;
    let mut apm_document = apm::assemble_apm_data(&replay)?;
    apm_document.metadata = Some(extract_metadata(&replay)?);

    write_json(&unit_data_file, &composition)?;
    write_json(&apm_data_file, &apm_document)?;

    Ok(ManifestRecord {
        replay_file: replay_path.display().to_string(),
        unit_data_file: unit_data_file.display().to_string(),
        apm_data_file: apm_data_file.display().to_string(),
    })
}

/// Processes every replay under `replay_dir` into `output_dir`, then writes
/// the manifest. Faults confined to one replay are logged and skipped; I/O
/// failures abort the run, since a manifest over unconfirmed writes is
/// worthless.
pub fn generate_all_data(
    replay_dir: &Path,
    output_dir: &Path,
    catalog: &UnitCatalog,
) -> Result<BatchSummary> {
    let files = replays_from_dir(replay_dir)?;
    fs::create_dir_all(output_dir)?;

    let bar = ProgressBar::new(files.len() as u64);
    let mut data_manifest = Manifest::new();
    let mut skipped = Vec::new();
    for replay_file in &files {
        match generate_replay_data(replay_file, output_dir, catalog) {
            Ok(record) => {
                info!("processed {}", replay_file.display());
                data_manifest.push(record);
            }
            Err(err) if err.is_replay_fault() => {
                warn!("skipping {}: {err}", replay_file.display());
                skipped.push(SkippedReplay {
                    path: replay_file.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let manifest_path = data_manifest.write_to(output_dir)?;
    Ok(BatchSummary {
        manifest_path,
        processed: data_manifest.len(),
        skipped,
    })
}
