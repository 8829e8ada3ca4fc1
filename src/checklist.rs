//! Verification checklists: grep a project file for expected substrings
//! (hook names, route paths, method names) and report PASS/FAIL per needle.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::patch::PatchError;

/// Result of probing a file for one expected substring.
#[derive(Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub needle: String,
    pub found: bool,
}

/// Read `path` once and report which of `needles` occur in it.
/// One needle failing never suppresses the rest.
pub fn run_checks(path: &Path, needles: &[String]) -> Result<Vec<CheckOutcome>, PatchError> {
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PatchError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(PatchError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    Ok(needles
        .iter()
        .map(|needle| CheckOutcome {
            found: content.contains(needle.as_str()),
            needle: needle.clone(),
        })
        .collect())
}

/// One PASS/FAIL line per outcome plus a tally, ready for stdout.
pub fn render(outcomes: &[CheckOutcome]) -> String {
    let mut out = String::new();
    let mut passed = 0usize;
    for check in outcomes {
        if check.found {
            passed += 1;
        }
        out.push_str(if check.found { "PASS " } else { "FAIL " });
        out.push_str(&check.needle);
        out.push('\n');
    }
    out.push_str(&format!("{passed}/{} checks passed\n", outcomes.len()));
    out
}
