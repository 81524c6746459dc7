//! Run archives and JSON file helpers.
//!
//! Paths ending in `.gz` are written and read through gzip.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use moran_core::{History, MoranProcess};
use moran_data::{GenerationRecord, RunSummary};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A finished run: its summary plus the full history it was computed from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunArchive {
    pub summary: RunSummary,
    pub history: History,
}

impl RunArchive {
    #[must_use]
    pub fn new(summary: RunSummary, history: History) -> Self {
        Self { summary, history }
    }

    /// Per-generation records, in order.
    #[must_use]
    pub fn records(&self) -> Vec<GenerationRecord> {
        self.history.records()
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Writes `data` as pretty JSON, gzip-compressed for `.gz` paths.
pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {e}")))?;
    let file = File::create(path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("creating {path:?}")))?;
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes())?;
        encoder.finish()?;
    } else {
        let mut writer = BufWriter::new(file);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}

/// Reads JSON written by [`write_json_file`].
pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("reading {path:?}")))?;
    let mut json = String::new();
    if is_gzip(path) {
        GzDecoder::new(file).read_to_string(&mut json)?;
    } else {
        BufReader::new(file).read_to_string(&mut json)?;
    }
    if json.trim().is_empty() {
        return Err(IoError::validation(format!("{path:?} is empty")));
    }
    serde_json::from_str(&json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {e}")))
}

/// Summary of the run so far, stamped with the current UTC time.
#[must_use]
pub fn summarize(process: &MoranProcess, config_fingerprint: &str) -> RunSummary {
    let history = process.history();
    RunSummary {
        seed: process.seed(),
        population_size: process.population().len(),
        generations: history.generations(),
        fixated: process.fixated(),
        winning_strategy_name: process.winning_strategy_name(),
        final_distribution: process.population_distribution(),
        history_digest: history.digest(),
        config_fingerprint: config_fingerprint.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

pub fn save_archive<P: AsRef<Path>>(archive: &RunArchive, path: P) -> Result<()> {
    write_json_file(archive, path)
}

/// Loads an archive and checks that its history still matches the digest
/// recorded in the summary.
pub fn load_archive<P: AsRef<Path>>(path: P) -> Result<RunArchive> {
    let archive: RunArchive = read_json_file(&path)?;
    let digest = archive.history.digest();
    if digest != archive.summary.history_digest {
        return Err(IoError::validation(format!(
            "history digest {digest} does not match summary {}",
            archive.summary.history_digest
        ))
        .with_context(format!("loading {:?}", path.as_ref())));
    }
    Ok(archive)
}
