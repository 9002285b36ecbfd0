//! Builds the index from the scraper's exported corpus snapshot.
//!
//! The snapshot is JSONL: one record per line with string fields `source`
//! (the document ID) and `value` (the scraped text). Records missing
//! either field, and lines that fail to parse, are counted and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use poisk_core::{Analyzer, BooleanIndex};
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct ScrapRecord {
    source: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSummary {
    pub indexed: usize,
    pub skipped: usize,
}

/// Loads every record under `path` (a JSONL file or a directory of them)
/// into the index. Fails only on I/O errors; malformed records are skipped.
pub fn load_corpus(
    path: &Path,
    analyzer: &Analyzer,
    index: &mut BooleanIndex<String>,
) -> Result<LoadSummary> {
    let files = corpus_files(path)?;
    if files.is_empty() {
        warn!(path = %path.display(), "no corpus files found");
    }

    let mut summary = LoadSummary::default();
    let mut analysis_time = Duration::ZERO;
    for file in &files {
        load_file(file, analyzer, index, &mut summary, &mut analysis_time)?;
    }

    info!(
        files = files.len(),
        analysis_secs = analysis_time.as_secs(),
        "corpus load complete"
    );
    Ok(summary)
}

fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("corpus path {} does not exist", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.path().is_file()
                && entry.path().extension().and_then(|ext| ext.to_str()) == Some("jsonl")
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

fn load_file(
    file: &Path,
    analyzer: &Analyzer,
    index: &mut BooleanIndex<String>,
    summary: &mut LoadSummary,
    analysis_time: &mut Duration,
) -> Result<()> {
    let handle =
        File::open(file).with_context(|| format!("opening corpus file {}", file.display()))?;
    let reader = BufReader::new(handle);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", file.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: ScrapRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(_) => {
                skip_record(summary, file, line_no, "unparseable line");
                continue;
            }
        };
        let (source, value) = match (record.source, record.value) {
            (Some(source), Some(value)) => (source, value),
            (None, _) => {
                skip_record(summary, file, line_no, "missing 'source' field");
                continue;
            }
            (_, None) => {
                skip_record(summary, file, line_no, "missing 'value' field");
                continue;
            }
        };

        let started = Instant::now();
        let terms = analyzer.analyze(&value);
        *analysis_time += started.elapsed();

        debug!(doc_id = %source, terms = terms.len(), "adding document");
        index.add_document(source, &terms);
        summary.indexed += 1;
        if summary.indexed % 10_000 == 0 {
            info!(
                indexed = summary.indexed,
                analysis_secs = analysis_time.as_secs(),
                "loading corpus"
            );
        }
    }
    Ok(())
}

fn skip_record(summary: &mut LoadSummary, file: &Path, line_no: usize, reason: &str) {
    summary.skipped += 1;
    debug!(file = %file.display(), line = line_no + 1, reason, "skipping record");
    if summary.skipped % 1000 == 0 {
        warn!(skipped = summary.skipped, "bad documents");
    }
}
