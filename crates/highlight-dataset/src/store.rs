//! JSON Lines persistence for raw sources and prepared splits.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use highlight_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::records::{RawRecord, SentenceExample, Split};

/// Read one JSON value per non-blank line.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|e| {
            Error::Dataset(format!("{}:{}: {}", path.display(), idx + 1, e))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write one JSON value per line, replacing any existing file.
pub fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Canonical source of raw article/highlights pairs.
pub trait RawSource {
    fn load_split(&self, split: Split) -> Result<Vec<RawRecord>>;
}

/// Raw splits stored as `<dir>/<split>.jsonl`.
pub struct JsonlRawSource {
    dir: PathBuf,
}

impl JsonlRawSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RawSource for JsonlRawSource {
    fn load_split(&self, split: Split) -> Result<Vec<RawRecord>> {
        let path = self.dir.join(format!("{}.jsonl", split));
        info!("Loading raw {} split from {}", split, path.display());
        if !path.is_file() {
            return Err(Error::Dataset(format!(
                "raw split not found: {}",
                path.display()
            )));
        }
        read_jsonl(&path)
    }
}

/// Prepared splits stored as `<dir>/<split>.jsonl`.
pub struct SplitStore {
    dir: PathBuf,
}

impl SplitStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("{}.jsonl", split))
    }

    /// Load a split, or `None` if it was never saved.
    pub fn load(&self, split: Split) -> Result<Option<Vec<SentenceExample>>> {
        let path = self.path(split);
        info!("Loading {} dataset from {}", split, path.display());
        if !path.is_file() {
            info!(
                "No dataset {} split found at {}. Loading default.",
                split.as_str().to_uppercase(),
                path.display()
            );
            return Ok(None);
        }
        read_jsonl(&path).map(Some)
    }

    /// Save a split, creating the directory if needed.
    pub fn save(&self, split: Split, rows: &[SentenceExample]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(split);
        info!(
            "Saving dataset {} split to {}",
            split.as_str().to_uppercase(),
            path.display()
        );
        write_jsonl(&path, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sentence: &str, label: Option<f64>) -> SentenceExample {
        SentenceExample {
            sentence: sentence.into(),
            context: "ctx".into(),
            highlights: vec!["h1".into(), "h2".into()],
            label,
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SplitStore::new(dir.path().join("nested"));
        let rows = vec![row("a", Some(0.25)), row("b", None)];

        store.save(Split::Train, &rows).unwrap();
        assert!(store.path(Split::Train).ends_with("nested/train.jsonl"));
        assert_eq!(store.load(Split::Train).unwrap(), Some(rows));
    }

    #[test]
    fn test_missing_split_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SplitStore::new(dir.path());
        assert!(store.load(Split::Validation).unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let store = SplitStore::new(dir.path());
        std::fs::write(
            store.path(Split::Test),
            "{\"sentence\":\"a\",\"context\":\"c\",\"highlights\":[]}\n\nnot json\n",
        )
        .unwrap();
        match store.load(Split::Test) {
            Err(Error::Dataset(msg)) => assert!(msg.contains("test.jsonl:3")),
            other => panic!("expected dataset error, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_source() {
        let dir = tempfile::tempdir().unwrap();
        let raw = vec![RawRecord {
            article: "body".into(),
            highlights: "one .\ntwo .".into(),
        }];
        write_jsonl(&dir.path().join("validation.jsonl"), &raw).unwrap();

        let source = JsonlRawSource::new(dir.path());
        assert_eq!(source.load_split(Split::Validation).unwrap(), raw);
        assert!(matches!(
            source.load_split(Split::Train),
            Err(Error::Dataset(_))
        ));
    }
}
