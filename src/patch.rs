//! Idempotent text patching for source and config files.
//!
//! Two operations, both single-shot and safe to re-run: splice a block of
//! text before an anchor substring, and append a `KEY=VALUE` line to a
//! config file. Neither ever leaves a half-written file behind.
mod applying;
mod filesystem;
mod model;
mod text;

pub use filesystem::{append_line_if_absent, insert_before_anchor};
pub use model::{AppendRequest, PatchError, PatchOutcome, PatchRequest};

#[cfg(test)]
mod tests;
