//! Logging system for pos-sim
//!
//! Provides the file-based log sink, daily rotation of the active log, and
//! retention cleanup of dated archives.

mod file_writer;
mod record;
mod retention;
mod rotation;
mod rotator;

pub use file_writer::{init_file_logging, LogFileInfo, LoggingGuard};
pub use record::{LogLevel, LogRecord, TIMESTAMP_FORMAT};
pub use retention::{
    archive_age_days, cleanup_old_logs, parse_archive_date, DEFAULT_RETENTION_DAYS,
};
pub use rotation::{archive_path_for, last_modified_date, rotate_active_log, Rotation};
pub use rotator::{LogRotator, RotationReport};
