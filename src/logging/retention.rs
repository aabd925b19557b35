//! Log file retention management
//!
//! Handles cleanup of dated archives based on the date in their file name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 5;

/// Date layout of archive file names
pub const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a formatted archive date (`YYYY-MM-DD`)
const ARCHIVE_DATE_LEN: usize = 10;

/// Parse the archive date from a file name like `2024-01-01.log`
///
/// Only the part before the first `.` is considered, and it must be exactly
/// `YYYY-MM-DD`. Names without an extension are not archives.
pub fn parse_archive_date(file_name: &str) -> Option<NaiveDate> {
    let (stem, _) = file_name.split_once('.')?;
    if stem.len() != ARCHIVE_DATE_LEN {
        return None;
    }
    NaiveDate::parse_from_str(stem, ARCHIVE_DATE_FORMAT).ok()
}

/// Age of an archive in whole days, measured from midnight of its date
///
/// Negative for dates after `now`.
pub fn archive_age_days(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    (now - midnight).num_days()
}

/// Delete archives older than `retention_days`
///
/// The active log and anything that is not a dated archive are left alone.
/// Returns the paths that were deleted.
pub fn cleanup_old_logs(
    logs_dir: &Path,
    active_log_name: &str,
    retention_days: u64,
    now: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    if !logs_dir.exists() {
        return Ok(Vec::new());
    }

    let retention_days = i64::try_from(retention_days).unwrap_or(i64::MAX);
    let mut deleted = Vec::new();

    let entries = fs::read_dir(logs_dir)
        .with_context(|| format!("Failed to read logs directory {}", logs_dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name == active_log_name || !path.is_file() {
            continue;
        }

        let Some(date) = parse_archive_date(name) else {
            continue;
        };

        if archive_age_days(date, now) > retention_days {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete old log file {}", path.display()))?;
            deleted.push(path);
        }
    }

    deleted.sort();
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path)
            .unwrap()
            .write_all(b"test log content")
            .unwrap();
        path
    }

    #[test]
    fn test_parse_archive_date() {
        assert_eq!(
            parse_archive_date("2024-01-01.log"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            parse_archive_date("2024-01-01.1.log"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            parse_archive_date("2024-01-01.txt"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_parse_archive_date_rejects_non_archives() {
        assert_eq!(parse_archive_date("app.log"), None);
        assert_eq!(parse_archive_date("notes.txt"), None);
        assert_eq!(parse_archive_date("2024-01-01"), None);
        assert_eq!(parse_archive_date("2024-1-1.log"), None);
        assert_eq!(parse_archive_date("2024-13-01.log"), None);
        assert_eq!(parse_archive_date("2024-01-01_12-00.log"), None);
        assert_eq!(parse_archive_date(".2024-01-01"), None);
    }

    #[test]
    fn test_archive_age_days() {
        let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(archive_age_days(date(3), now()), 0);
        assert_eq!(archive_age_days(date(2), now()), 1);
        assert_eq!(
            archive_age_days(NaiveDate::from_ymd_opt(2023, 12, 20).unwrap(), now()),
            14
        );
        assert_eq!(archive_age_days(date(5), now()), -1);
    }

    #[test]
    fn test_cleanup_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();
        assert!(deleted.is_empty());
    }

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let path = Path::new("/nonexistent/path/for/testing");
        let deleted = cleanup_old_logs(path, "app.log", 5, now()).unwrap();
        assert!(deleted.is_empty());
    }

    #[test]
    fn test_cleanup_deletes_only_expired_archives() {
        let temp_dir = TempDir::new().unwrap();
        let old = touch(temp_dir.path(), "2023-12-20.log");
        let recent = touch(temp_dir.path(), "2024-01-02.log");

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();

        assert_eq!(deleted, vec![old.clone()]);
        assert!(!old.exists());
        assert!(recent.exists());
    }

    #[test]
    fn test_cleanup_retention_boundary_is_exclusive() {
        let temp_dir = TempDir::new().unwrap();
        // 5 days 10 hours old
        let at_boundary = touch(temp_dir.path(), "2023-12-29.log");
        // 6 days 10 hours old
        let past_boundary = touch(temp_dir.path(), "2023-12-28.log");

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();

        assert_eq!(deleted, vec![past_boundary.clone()]);
        assert!(at_boundary.exists());
        assert!(!past_boundary.exists());
    }

    #[test]
    fn test_cleanup_ignores_non_log_files() {
        let temp_dir = TempDir::new().unwrap();
        let other = touch(temp_dir.path(), "other.txt");
        let no_extension = touch(temp_dir.path(), "2020-01-01");
        let unpadded = touch(temp_dir.path(), "2020-1-1.log");
        let active = touch(temp_dir.path(), "app.log");
        let dated_dir = temp_dir.path().join("2020-01-01.d");
        fs::create_dir(&dated_dir).unwrap();

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();

        assert!(deleted.is_empty());
        assert!(other.exists());
        assert!(no_extension.exists());
        assert!(unpadded.exists());
        assert!(active.exists());
        assert!(dated_dir.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_cleanup_follows_symlinked_archives() {
        let temp_dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        let target = touch(target_dir.path(), "target.txt");
        let link = temp_dir.path().join("2023-12-01.log");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();

        assert_eq!(deleted, vec![link.clone()]);
        assert!(!link.exists());
        assert!(target.exists());
    }

    #[test]
    fn test_cleanup_keeps_future_dated_archives() {
        let temp_dir = TempDir::new().unwrap();
        let future = touch(temp_dir.path(), "2030-06-01.log");

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 0, now()).unwrap();

        assert!(deleted.is_empty());
        assert!(future.exists());
    }

    #[test]
    fn test_cleanup_deletes_suffixed_archives() {
        let temp_dir = TempDir::new().unwrap();
        let first = touch(temp_dir.path(), "2023-12-01.log");
        let second = touch(temp_dir.path(), "2023-12-01.1.log");

        let deleted = cleanup_old_logs(temp_dir.path(), "app.log", 5, now()).unwrap();

        assert_eq!(deleted.len(), 2);
        assert!(!first.exists());
        assert!(!second.exists());
    }
}
