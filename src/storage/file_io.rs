//! JSON file helpers with atomic writes
//!
//! Snapshots are replaced wholesale on import, so a write either lands
//! completely or leaves the previous file untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::error::Category;

use crate::error::FinanceError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    parse_file(path)
}

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(FinanceError::snapshot_not_found(path.display().to_string()));
    }

    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, FinanceError> {
    let file = File::open(path)
        .map_err(|e| FinanceError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| match e.classify() {
        // Well-formed JSON holding a record that fails validation
        Category::Data => {
            FinanceError::Validation(format!("Invalid record in {}: {}", path.display(), e))
        }
        Category::Io | Category::Syntax | Category::Eof => {
            FinanceError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }
    })
}

/// Write JSON to a file atomically (write to a sibling temp file, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Row {
        label: String,
        cents: i64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                label: "rent".into(),
                cents: 170000,
            },
            Row {
                label: "coffee".into(),
                cents: 450,
            },
        ]
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Vec<Row> = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_missing_file_required_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<Vec<Row>, _>(temp_dir.path().join("absent.json"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("rows.json");

        write_json_atomic(&path, &rows()).unwrap();

        let loaded: Vec<Row> = read_json_required(&path).unwrap();
        assert_eq!(loaded, rows());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");

        write_json_atomic(&path, &rows()).unwrap();
        write_json_atomic(&path, &rows()[..1]).unwrap();

        let loaded: Vec<Row> = read_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_parse_failure_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[{\"label\": \"rent\",").unwrap();

        let err = read_json::<Vec<Row>, _>(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_bad_record_is_validation_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");
        fs::write(&path, "[{\"label\": 3}]").unwrap();

        let err = read_json::<Vec<Row>, _>(&path).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("rows.json"));
    }
}
