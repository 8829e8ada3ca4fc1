use super::model::PatchError;
use super::text::preview;

/// What a read-decide pass concluded about a file's content.
#[derive(Debug, PartialEq, Eq)]
pub enum Splice {
    /// New content to write back.
    Updated(String),
    /// The change is already present; leave the file alone.
    AlreadyApplied,
}

/// Splice `insertion` (plus a newline) immediately before the last occurrence
/// of `anchor`, unless `marker` already occurs in `content`.
///
/// The marker check runs first: an already-patched file is never re-patched
/// even though the anchor still occurs in it. Targeting the *last* anchor
/// match protects against anchors that also appear earlier in the file, say
/// in a comment, and biases toward the final-export convention where the real
/// anchor is the closing statement.
pub fn insert_before_last_anchor(
    content: &str,
    anchor: &str,
    marker: &str,
    insertion: &str,
) -> Result<Splice, PatchError> {
    if content.contains(marker) {
        return Ok(Splice::AlreadyApplied);
    }
    let Some(at) = content.rfind(anchor) else {
        return Err(PatchError::AnchorNotFound(preview(anchor)));
    };

    let mut out = String::with_capacity(content.len() + insertion.len() + 1);
    out.push_str(&content[..at]);
    out.push_str(insertion);
    out.push('\n');
    out.push_str(&content[at..]);
    Ok(Splice::Updated(out))
}

/// Append `line` (plus a trailing newline) unless `key` already occurs in
/// `content`. A separating newline is inserted first when the existing
/// content does not end in one.
pub fn append_if_absent(content: &str, key: &str, line: &str) -> Splice {
    if content.contains(key) {
        return Splice::AlreadyApplied;
    }

    let mut out = String::with_capacity(content.len() + line.len() + 2);
    out.push_str(content);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    Splice::Updated(out)
}
