use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::mem::MemTable;

#[derive(Debug, Deserialize)]
struct StoreFile {
    tables: Vec<MemTable>,
}

#[derive(Debug, Serialize)]
struct StoreFileRef<'a> {
    tables: Vec<&'a MemTable>,
}

/// Loads all tables from disk. A missing or blank file is an empty database.
pub(crate) fn load(path: &Path) -> Result<Vec<MemTable>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: StoreFile = serde_json::from_str(&content)?;
    Ok(file.tables)
}

pub(crate) fn save<'a>(
    path: &Path,
    tables: impl Iterator<Item = &'a MemTable>,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string_pretty(&StoreFileRef {
        tables: tables.collect(),
    })?;
    fs::write(path, payload)?;
    Ok(())
}
