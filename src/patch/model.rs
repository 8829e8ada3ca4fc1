use std::path::PathBuf;

/// A request to splice a block of text into a source file exactly once.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    /// File to patch.
    pub target: PathBuf,
    /// Substring whose *last* occurrence marks the insertion point.
    pub anchor: String,
    /// Substring whose presence means the insertion was already applied.
    /// Callers pick a marker contained in `insertion` (a distinctive route
    /// path, a variable name) so a second run short-circuits.
    pub marker: String,
    /// Block spliced in immediately before the anchor.
    pub insertion: String,
}

/// A request to append one `KEY=VALUE` line to a config file.
#[derive(Debug, Clone)]
pub struct AppendRequest {
    pub target: PathBuf,
    /// Key whose presence anywhere in the file makes the append a no-op.
    pub key: String,
    /// Line appended verbatim, followed by a newline.
    pub line: String,
}

/// Terminal state of one request. Each request runs once and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file was rewritten with the requested change.
    Applied,
    /// The marker (or key) was already present; nothing was written.
    AlreadyApplied,
    /// The target does not exist and the operation tolerates that.
    Skipped,
}

/// Failures that leave the target byte-for-byte untouched.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("anchor not found: {0}")]
    AnchorNotFound(String),
}
