//! Serialization of log entries to the Gource custom log format

use super::entry::{LogEntry, RenderError};
use crate::error::{OutputError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Why a single entry was left out of the log
#[derive(Error, Debug)]
pub enum EntryWriteError {
    #[error("cannot render entry: {0}")]
    Render(#[from] RenderError),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of writing a batch of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Write `entries` one line each. An entry that cannot be written is reported and skipped.
pub fn write_entries<W: Write>(writer: &mut W, entries: &[LogEntry]) -> WriteSummary {
    let mut summary = WriteSummary::default();

    for entry in entries {
        match write_entry(writer, entry) {
            Ok(()) => summary.written += 1,
            Err(reason) => {
                tracing::warn!(
                    "Error! Entry @ {}, {}: {}",
                    entry.timestamp,
                    entry.path,
                    reason
                );
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Render one entry, falling back to an unknown author, and write it.
fn write_entry<W: Write>(
    writer: &mut W,
    entry: &LogEntry,
) -> std::result::Result<(), EntryWriteError> {
    let line = entry
        .render()
        .or_else(|_| entry.with_unknown_author().render())?;

    writer.write_all(line.as_bytes())?;
    Ok(())
}

/// Create (or truncate) `path` and write every entry to it.
pub fn write_log_file(path: &Path, entries: &[LogEntry]) -> Result<WriteSummary> {
    let file = File::create(path).map_err(|e| OutputError::CreateFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut writer = BufWriter::new(file);
    let summary = write_entries(&mut writer, entries);

    writer.flush().map_err(|e| OutputError::FlushFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        "Wrote {} entries to {} ({} skipped)",
        summary.written,
        path.display(),
        summary.skipped
    );
    Ok(summary)
}
