use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::applying::{Splice, append_if_absent, insert_before_last_anchor};
use super::model::{AppendRequest, PatchError, PatchOutcome, PatchRequest};

/// Execute one insert-before-anchor request against the filesystem.
/// A missing target is an error here: patching assumes the file exists.
pub fn insert_before_anchor(req: &PatchRequest) -> Result<PatchOutcome, PatchError> {
    let content = match fs::read_to_string(&req.target) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PatchError::FileNotFound(req.target.clone()));
        }
        Err(e) => return Err(io_err(&req.target, e)),
    };

    match insert_before_last_anchor(&content, &req.anchor, &req.marker, &req.insertion)? {
        Splice::AlreadyApplied => Ok(PatchOutcome::AlreadyApplied),
        Splice::Updated(next) => {
            write_atomically(&req.target, &next)?;
            tracing::debug!(path = %req.target.display(), "spliced insertion before anchor");
            Ok(PatchOutcome::Applied)
        }
    }
}

/// Execute one append request. Missing targets are tolerated: config files
/// that do not exist are skipped, never created.
pub fn append_line_if_absent(req: &AppendRequest) -> Result<PatchOutcome, PatchError> {
    let content = match fs::read_to_string(&req.target) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PatchOutcome::Skipped),
        Err(e) => return Err(io_err(&req.target, e)),
    };

    match append_if_absent(&content, &req.key, &req.line) {
        Splice::AlreadyApplied => Ok(PatchOutcome::AlreadyApplied),
        Splice::Updated(next) => {
            write_atomically(&req.target, &next)?;
            tracing::debug!(path = %req.target.display(), key = %req.key, "appended line");
            Ok(PatchOutcome::Applied)
        }
    }
}

/// Write via a temp file in the target's directory plus rename, so a reader
/// never observes a partially-written file.
fn write_atomically(path: &Path, content: &str) -> Result<(), PatchError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write = || -> std::io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };
    write().map_err(|e| io_err(path, e))
}

fn io_err(path: &Path, source: std::io::Error) -> PatchError {
    PatchError::Io {
        path: path.to_path_buf(),
        source,
    }
}
