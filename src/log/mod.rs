//! Gource custom log: entries, aggregation and serialization

/// Aggregation of entries across repositories
pub mod builder;
/// Log entry and change-type types
pub mod entry;
/// Writing entries to disk
pub mod writer;

pub use builder::{LogBuilder, build};
pub use entry::{ChangeType, LogEntry, RenderError, UNKNOWN_AUTHOR, display_name};
pub use writer::{EntryWriteError, WriteSummary, write_entries, write_log_file};
