//! Daily rotation of the active log
//!
//! When the active log was last written on an earlier day it is renamed to an
//! archive named after that day.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};

use super::retention::ARCHIVE_DATE_FORMAT;

/// A completed rename of the active log into an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Pick the archive path for `date`
///
/// Returns `<date>.log`, or `<date>.<n>.log` with the smallest free `n` if an
/// archive for that date already exists. An existing archive is never reused.
pub fn archive_path_for(logs_dir: &Path, date: NaiveDate) -> PathBuf {
    let stem = date.format(ARCHIVE_DATE_FORMAT).to_string();
    let primary = logs_dir.join(format!("{}.log", stem));
    if !primary.exists() {
        return primary;
    }

    (1u32..)
        .map(|n| logs_dir.join(format!("{}.{}.log", stem, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(primary)
}

/// Local date the file was last modified
pub fn last_modified_date(path: &Path) -> Result<NaiveDate> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to read modification time of {}", path.display()))?;
    Ok(DateTime::<Local>::from(modified).date_naive())
}

/// Rotate the active log if it was last written before `today`
///
/// Returns `None` when there is no active log or it is still current.
pub fn rotate_active_log(
    logs_dir: &Path,
    active_log_name: &str,
    today: NaiveDate,
) -> Result<Option<Rotation>> {
    let active = logs_dir.join(active_log_name);
    if !active.is_file() {
        return Ok(None);
    }

    let modified = last_modified_date(&active)?;
    if modified >= today {
        return Ok(None);
    }

    let archive = archive_path_for(logs_dir, modified);
    fs::rename(&active, &archive).with_context(|| {
        format!(
            "Failed to rotate {} to {}",
            active.display(),
            archive.display()
        )
    })?;

    Ok(Some(Rotation {
        from: active,
        to: archive,
    }))
}
