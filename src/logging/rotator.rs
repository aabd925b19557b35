//! Startup rotation and cleanup of the log directory

use std::path::PathBuf;

use anyhow::Result;

use super::retention::cleanup_old_logs;
use super::rotation::{rotate_active_log, Rotation};
use crate::clock::Clock;
use crate::config::LoggingConfig;

/// What a single rotator run changed on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    /// Rename of the active log, if it belonged to an earlier day
    pub rotated: Option<Rotation>,
    /// Archives removed for exceeding the retention window
    pub deleted: Vec<PathBuf>,
}

impl RotationReport {
    pub fn is_empty(&self) -> bool {
        self.rotated.is_none() && self.deleted.is_empty()
    }

    /// Emit one info record per rotation and deletion
    ///
    /// Rotation runs before the active log is opened, so the records are
    /// written once the sink is installed.
    pub fn log_summary(&self) {
        if let Some(rotation) = &self.rotated {
            tracing::info!(
                "Rotated log: {} -> {}",
                rotation.from.display(),
                rotation.to.display()
            );
        }

        for path in &self.deleted {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            tracing::info!("Deleted old log file: {}", name);
        }
    }
}

/// Rotates the active log and prunes expired archives
pub struct LogRotator<C: Clock> {
    settings: LoggingConfig,
    clock: C,
}

impl<C: Clock> LogRotator<C> {
    pub fn new(settings: LoggingConfig, clock: C) -> Self {
        Self { settings, clock }
    }

    /// Run rotation then cleanup once
    pub fn run(&self) -> Result<RotationReport> {
        let now = self.clock.now();
        let logs_dir = &self.settings.logs_dir;
        let active = &self.settings.active_log;

        let rotated = rotate_active_log(logs_dir, active, now.date_naive())?;
        let deleted = cleanup_old_logs(
            logs_dir,
            active,
            self.settings.retention_days,
            now.naive_local(),
        )?;

        Ok(RotationReport { rotated, deleted })
    }
}
