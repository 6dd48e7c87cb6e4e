// src/store.rs
//! Flat result dump, overwritten on every run.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::record::{TenderRecord, Tiers};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSnapshot {
    /// RFC 3339 timestamp of the run.
    pub date: String,
    pub high_priority: Vec<TenderRecord>,
    pub medium_priority: Vec<TenderRecord>,
}

impl ResultSnapshot {
    pub fn new(at: DateTime<Local>, tiers: &Tiers) -> Self {
        Self {
            date: at.to_rfc3339(),
            high_priority: tiers.high.clone(),
            medium_priority: tiers.medium.clone(),
        }
    }
}

/// Create `path`'s parent directory if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

/// Pretty JSON, non-ASCII left as is. Replaces any previous file.
pub fn write_snapshot(path: &Path, snapshot: &ResultSnapshot) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(snapshot).context("serializing result snapshot")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<ResultSnapshot> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}
