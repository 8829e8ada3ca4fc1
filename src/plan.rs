//! Batch fixup plans: several patch and append requests executed strictly
//! sequentially, each reported on its own. One step failing never aborts the
//! steps queued after it.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::patch::{self, AppendRequest, PatchError, PatchOutcome, PatchRequest};

/// One step of a plan file.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Splice `text` before the last occurrence of `anchor` in `file`.
    Insert {
        file: PathBuf,
        anchor: String,
        text: String,
        /// Idempotency marker; the whole text block when omitted.
        #[serde(default)]
        marker: Option<String>,
    },
    /// Append `line` to `file` unless its key already occurs.
    Append { file: PathBuf, line: String },
}

/// A fixup plan, loaded from a JSON file.
#[derive(Debug, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

/// What happened to one step.
#[derive(Debug)]
pub struct StepReport {
    pub label: String,
    pub result: Result<PatchOutcome, PatchError>,
}

pub fn load(path: &Path) -> eyre::Result<Plan> {
    let raw = fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("reading plan {}: {e}", path.display()))?;
    let plan: Plan = serde_json::from_str(&raw)
        .map_err(|e| eyre::eyre!("parsing plan {}: {e}", path.display()))?;
    Ok(plan)
}

/// Run every step in order, collecting one report per step.
pub fn execute(plan: &Plan) -> Vec<StepReport> {
    plan.steps.iter().map(run_step).collect()
}

fn run_step(step: &Step) -> StepReport {
    match step {
        Step::Insert {
            file,
            anchor,
            text,
            marker,
        } => {
            let request = PatchRequest {
                target: file.clone(),
                anchor: anchor.clone(),
                marker: marker.clone().unwrap_or_else(|| text.clone()),
                insertion: text.clone(),
            };
            StepReport {
                label: format!("insert into {}", file.display()),
                result: patch::insert_before_anchor(&request),
            }
        }
        Step::Append { file, line } => {
            // `KEY=VALUE` lines are idempotent on the key; anything else on
            // the whole line.
            let key = line.split_once('=').map_or(line.as_str(), |(k, _)| k);
            let request = AppendRequest {
                target: file.clone(),
                key: key.to_string(),
                line: line.clone(),
            };
            StepReport {
                label: format!("append to {}", file.display()),
                result: patch::append_line_if_absent(&request),
            }
        }
    }
}
