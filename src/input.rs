use crate::error::{GraderError, Result};
use crate::types::bill::{Bill, BillDocument};
use crate::types::report::BatchItemError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn list_bill_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

pub fn load_bill(path: &Path) -> Result<Bill> {
    if !path.exists() {
        return Err(GraderError::PathNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    let document: BillDocument = serde_json::from_str(&raw)?;
    Ok(document.into_bill())
}

pub fn load_bills(root: &Path) -> Result<(Vec<Bill>, Vec<BatchItemError>)> {
    if !root.exists() {
        return Err(GraderError::PathNotFound(root.display().to_string()));
    }

    let mut bills = Vec::new();
    let mut failures = Vec::new();
    for path in list_bill_files(root) {
        let label = path.display().to_string();
        let value = match std::fs::read_to_string(&path)
            .map_err(GraderError::from)
            .and_then(|raw| serde_json::from_str::<Value>(&raw).map_err(GraderError::from))
        {
            Ok(value) => value,
            Err(err) => {
                failures.push(BatchItemError {
                    bill_id: label,
                    error: err.to_string(),
                });
                continue;
            }
        };

        let entries = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (format!("{label}[{index}]"), item))
                .collect(),
            other => vec![(label, other)],
        };
        for (label, entry) in entries {
            match serde_json::from_value::<BillDocument>(entry) {
                Ok(document) => bills.push(document.into_bill()),
                Err(err) => failures.push(BatchItemError {
                    bill_id: label,
                    error: GraderError::from(err).to_string(),
                }),
            }
        }
    }
    Ok((bills, failures))
}
