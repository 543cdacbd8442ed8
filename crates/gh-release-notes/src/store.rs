//! CSV persistence for the tables exchanged between pipeline stages
//!
//! Each stage writes its result as a flat table so the next stage can be
//! re-run without repeating network calls. Columns are resolved by header
//! name, so a table carrying extra columns stays readable.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;

use crate::records::{CategorizedPullRequest, PullRequest};

/// Column order of the pull request snapshot.
pub const SNAPSHOT_HEADERS: [&str; 8] = [
    "title",
    "number",
    "author",
    "url",
    "createdAt",
    "updatedAt",
    "mergedAt",
    "labels",
];

/// Extra column appended to the categorised table.
pub const CATEGORY_HEADER: &str = "category";

const LABEL_SEPARATOR: &str = ", ";

/// Errors raised while reading or writing stage tables
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing the required column '{column}'")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path}, row {row}: '{value}' is not a pull request number")]
    InvalidNumber {
        path: String,
        row: usize,
        value: String,
    },
}

/// Reads a pull request snapshot written by [`write_pull_requests`].
pub fn read_pull_requests(path: &Path) -> Result<Vec<PullRequest>, StoreError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let mut reader = csv::Reader::from_reader(file);
    let header = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    let columns = Columns::resolve(path, &header)?;

    let mut pulls = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        pulls.push(columns.pull_request(path, row, &record)?);
    }
    Ok(pulls)
}

/// Writes the fetched snapshot to `path`, one pull request per row.
///
/// An empty snapshot still gets its header row so downstream stages can
/// tell "no pull requests" from "no file".
pub fn write_pull_requests(path: &Path, pulls: &[PullRequest]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(SNAPSHOT_HEADERS)
        .map_err(|source| csv_error(path, source))?;
    for pull in pulls {
        writer
            .write_record(snapshot_row(pull))
            .map_err(|source| csv_error(path, source))?;
    }
    writer.flush().map_err(|source| io_error(path, source))?;
    Ok(())
}

/// Writes the categorised table to `path`: the snapshot columns plus `category`.
pub fn write_categorized(path: &Path, rows: &[CategorizedPullRequest]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header: Vec<&str> = SNAPSHOT_HEADERS.to_vec();
    header.push(CATEGORY_HEADER);
    writer
        .write_record(&header)
        .map_err(|source| csv_error(path, source))?;

    for row in rows {
        let mut record: Vec<String> = snapshot_row(&row.pull).to_vec();
        record.push(row.category.clone());
        writer
            .write_record(&record)
            .map_err(|source| csv_error(path, source))?;
    }
    writer.flush().map_err(|source| io_error(path, source))?;
    Ok(())
}

struct Columns {
    title: usize,
    number: usize,
    author: usize,
    url: usize,
    created_at: usize,
    updated_at: usize,
    merged_at: usize,
    labels: usize,
}

impl Columns {
    fn resolve(path: &Path, header: &StringRecord) -> Result<Self, StoreError> {
        let index = |column: &'static str| {
            header
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| StoreError::MissingColumn {
                    path: display_path(path),
                    column,
                })
        };
        Ok(Self {
            title: index("title")?,
            number: index("number")?,
            author: index("author")?,
            url: index("url")?,
            created_at: index("createdAt")?,
            updated_at: index("updatedAt")?,
            merged_at: index("mergedAt")?,
            labels: index("labels")?,
        })
    }

    fn pull_request(
        &self,
        path: &Path,
        row: usize,
        record: &StringRecord,
    ) -> Result<PullRequest, StoreError> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();
        let number = record.get(self.number).unwrap_or("");
        let number = number
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidNumber {
                path: display_path(path),
                // data rows start after the header line
                row: row + 2,
                value: number.to_string(),
            })?;
        Ok(PullRequest {
            title: field(self.title),
            number,
            author: field(self.author),
            url: field(self.url),
            created_at: field(self.created_at),
            updated_at: field(self.updated_at),
            merged_at: field(self.merged_at),
            labels: split_labels(record.get(self.labels).unwrap_or("")),
        })
    }
}

fn snapshot_row(pull: &PullRequest) -> [String; 8] {
    [
        pull.title.clone(),
        pull.number.to_string(),
        pull.author.clone(),
        pull.url.clone(),
        pull.created_at.clone(),
        pull.updated_at.clone(),
        pull.merged_at.clone(),
        pull.labels.join(LABEL_SEPARATOR),
    ]
}

fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: display_path(path),
        source,
    }
}

fn csv_error(path: &Path, source: csv::Error) -> StoreError {
    StoreError::Csv {
        path: display_path(path),
        source,
    }
}
