//! Batch artifacts — the only channel between pipeline stages.
//!
//! Each stage materializes its output as a header-having CSV file and
//! hands the path to the next stage. Raw batches live under
//! `<data_dir>/raw`, scored batches under `<data_dir>/processed` with the
//! same filename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use moodwire_common::{MoodwireError, RawItem};

/// Column order for raw batch artifacts.
pub const RAW_HEADERS: [&str; 9] = [
    "id",
    "created_utc",
    "body",
    "author",
    "author_location",
    "engagement_primary",
    "engagement_secondary",
    "tags",
    "source_query",
];

/// A CSV artifact held in memory: header row plus string rows.
///
/// Stages that only append or project columns (scoring, loading) work on
/// this generic form rather than a typed record, because the free-text
/// column is resolved by name at runtime.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn read(path: &Path) -> Result<Self, MoodwireError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            MoodwireError::Artifact(format!("cannot open {}: {e}", path.display()))
        })?;
        let headers = reader
            .headers()
            .map_err(|e| MoodwireError::Artifact(format!("bad header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| MoodwireError::Artifact(format!("bad CSV record: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<(), MoodwireError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MoodwireError::Artifact(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            MoodwireError::Artifact(format!("cannot write {}: {e}", path.display()))
        })?;
        writer
            .write_record(&self.headers)
            .map_err(|e| MoodwireError::Artifact(format!("write header: {e}")))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| MoodwireError::Artifact(format!("write record: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| MoodwireError::Artifact(format!("flush {}: {e}", path.display())))?;
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value of a named column in one row, if the column exists.
    pub fn value<'a>(&self, row: &'a [String], name: &str) -> Option<&'a str> {
        self.column_index(name).and_then(|i| row.get(i)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serialize a raw batch into tabular form with the fixed raw column order.
pub fn raw_batch_table(items: &[RawItem]) -> Table {
    let rows = items
        .iter()
        .map(|item| {
            vec![
                item.id.clone(),
                item.created_utc.to_string(),
                item.body.clone(),
                item.author.clone(),
                item.author_location.clone(),
                item.engagement_primary.to_string(),
                item.engagement_secondary.to_string(),
                format_tags(&item.tags),
                item.source_query.clone(),
            ]
        })
        .collect();
    Table::new(RAW_HEADERS.iter().map(|h| h.to_string()).collect(), rows)
}

/// Serialize tags as a bracketed single-quoted list in one CSV field,
/// e.g. `['ClimateAction', 'SaveEarth']`.
pub fn format_tags(tags: &[String]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| format!("'{t}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Parse a bracketed tag list back into its parts. Tolerates both single
/// and double quotes. The empty list `[]` parses to no tags.
pub fn parse_tags(field: &str) -> Vec<String> {
    let inner = field.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Path for a new raw batch artifact: `<data_dir>/raw/items_<ts>.csv`.
pub fn raw_artifact_path(data_dir: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    data_dir.join("raw").join(format!("items_{stamp}.csv"))
}

/// Path for the scored counterpart of a raw artifact: the `raw` path
/// component becomes `processed`. A path without a `raw` component gets a
/// `processed_` filename prefix next to the original instead.
pub fn processed_path_for(raw_path: &Path) -> PathBuf {
    let mut swapped = false;
    let components: Vec<_> = raw_path
        .components()
        .map(|c| {
            if !swapped && c.as_os_str() == "raw" {
                swapped = true;
                std::ffi::OsString::from("processed")
            } else {
                c.as_os_str().to_os_string()
            }
        })
        .collect();
    if swapped {
        components.iter().collect()
    } else {
        let name = raw_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "batch.csv".to_string());
        raw_path.with_file_name(format!("processed_{name}"))
    }
}
