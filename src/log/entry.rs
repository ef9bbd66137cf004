use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder used when an author cannot be rendered as text
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Field separator of the Gource custom log format
pub const FIELD_SEPARATOR: char = '|';

/// How a commit touched a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

impl ChangeType {
    /// Single-letter code used in the log
    pub fn code(self) -> char {
        match self {
            ChangeType::Added => 'A',
            ChangeType::Modified => 'M',
            ChangeType::Deleted => 'D',
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChangeType::Added),
            "M" => Ok(ChangeType::Modified),
            "D" => Ok(ChangeType::Deleted),
            other => Err(format!("unknown change type '{}'", other)),
        }
    }
}

/// One line of the log: a file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Authoring time, Unix epoch seconds
    pub timestamp: i64,
    pub username: String,
    pub change: ChangeType,
    pub path: String,
}

/// Why an entry cannot be rendered as a single log line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} contains a line break")]
pub struct RenderError {
    pub field: &'static str,
}

impl LogEntry {
    pub fn new(
        timestamp: i64,
        username: impl Into<String>,
        change: ChangeType,
        path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            username: username.into(),
            change,
            path: path.into(),
        }
    }

    /// Build an entry for a file of a repository, joining the repository prefix when present.
    ///
    /// An author that is missing or not valid text becomes [`UNKNOWN_AUTHOR`].
    pub fn for_file(
        timestamp: i64,
        author: Option<&str>,
        change: ChangeType,
        prefix: Option<&str>,
        file: &str,
    ) -> Self {
        let path = match prefix {
            Some(prefix) => format!("{}/{}", prefix, file),
            None => file.to_string(),
        };
        Self::new(timestamp, display_name(author), change, path)
    }

    /// Copy of this entry with the username replaced by [`UNKNOWN_AUTHOR`]
    pub fn with_unknown_author(&self) -> Self {
        Self {
            username: UNKNOWN_AUTHOR.to_string(),
            ..self.clone()
        }
    }

    /// Render as `timestamp|username|type|path` followed by a newline.
    ///
    /// `|` inside a field is written as is; line breaks are rejected.
    pub fn render(&self) -> Result<String, RenderError> {
        if has_line_break(&self.username) {
            return Err(RenderError { field: "username" });
        }
        if has_line_break(&self.path) {
            return Err(RenderError { field: "path" });
        }

        Ok(format!(
            "{ts}{sep}{user}{sep}{change}{sep}{path}\n",
            ts = self.timestamp,
            user = self.username,
            change = self.change,
            path = self.path,
            sep = FIELD_SEPARATOR,
        ))
    }
}

impl FromStr for LogEntry {
    type Err = String;

    /// Parse one log line; the path keeps any extra separators.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.splitn(4, FIELD_SEPARATOR);

        let timestamp = fields
            .next()
            .ok_or("missing timestamp")?
            .parse::<i64>()
            .map_err(|e| format!("invalid timestamp: {}", e))?;
        let username = fields.next().ok_or("missing username")?;
        let change = fields.next().ok_or("missing change type")?.parse()?;
        let path = fields.next().ok_or("missing path")?;

        Ok(Self::new(timestamp, username, change, path))
    }
}

/// Best-effort display name for an author
pub fn display_name(author: Option<&str>) -> String {
    match author {
        Some(name) => name.to_string(),
        None => UNKNOWN_AUTHOR.to_string(),
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}
