#![cfg(test)]

use std::fs;
use std::path::PathBuf;

use super::applying::{Splice, append_if_absent, insert_before_last_anchor};
use super::filesystem::{append_line_if_absent, insert_before_anchor};
use super::model::{AppendRequest, PatchError, PatchOutcome, PatchRequest};

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn route_request(target: PathBuf) -> PatchRequest {
    PatchRequest {
        target,
        anchor: "export default router".to_string(),
        marker: "/activate".to_string(),
        insertion: "router.post('/activate', handler)".to_string(),
    }
}

#[test]
fn pure_insert_targets_last_anchor_match() {
    let out = insert_before_last_anchor("X MARK Y MARK Z", "MARK", "<NEW>", "<NEW>").unwrap();
    assert_eq!(out, Splice::Updated("X MARK Y <NEW>\nMARK Z".to_string()));
}

#[test]
fn pure_insert_skips_when_marker_present() {
    // The anchor still occurs, but the marker wins.
    let out = insert_before_last_anchor("a <NEW>\nMARK", "MARK", "<NEW>", "<NEW>").unwrap();
    assert_eq!(out, Splice::AlreadyApplied);
}

#[test]
fn pure_insert_missing_anchor_is_an_error() {
    let err = insert_before_last_anchor("nothing here", "MARK", "<NEW>", "<NEW>").unwrap_err();
    assert!(matches!(err, PatchError::AnchorNotFound(_)));
}

#[test]
fn pure_append_separates_content_without_trailing_newline() {
    let out = append_if_absent("A=1", "FOO", "FOO=1");
    assert_eq!(out, Splice::Updated("A=1\nFOO=1\n".to_string()));
}

#[test]
fn insert_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "routes.js", "router.get('/a')\nexport default router\n");
    let req = route_request(path.clone());

    assert_eq!(insert_before_anchor(&req).unwrap(), PatchOutcome::Applied);
    let once = fs::read_to_string(&path).unwrap();

    assert_eq!(
        insert_before_anchor(&req).unwrap(),
        PatchOutcome::AlreadyApplied
    );
    let twice = fs::read_to_string(&path).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn missing_anchor_leaves_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let before = "module.exports = router\n";
    let path = write_fixture(&dir, "routes.js", before);
    let req = route_request(path.clone());

    let err = insert_before_anchor(&req).unwrap_err();
    assert!(matches!(err, PatchError::AnchorNotFound(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn marker_skip_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let before = "router.post('/activate', handler)\nexport default router\n";
    let path = write_fixture(&dir, "routes.js", before);
    let req = route_request(path.clone());

    assert_eq!(
        insert_before_anchor(&req).unwrap(),
        PatchOutcome::AlreadyApplied
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn insert_on_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let req = route_request(dir.path().join("nope.js"));
    let err = insert_before_anchor(&req).unwrap_err();
    assert!(matches!(err, PatchError::FileNotFound(_)));
}

#[test]
fn insert_lands_before_export_statement() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "routes.js", "router.post('/old', h)\nexport default router");
    let req = PatchRequest {
        target: path.clone(),
        anchor: "export default router".to_string(),
        marker: "/new".to_string(),
        insertion: "router.post('/new', handler)".to_string(),
    };

    assert_eq!(insert_before_anchor(&req).unwrap(), PatchOutcome::Applied);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "router.post('/old', h)\nrouter.post('/new', handler)\nexport default router"
    );
}

#[test]
fn append_adds_one_line_then_stays_put() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, ".env", "A=1\nB=2\n");
    let req = AppendRequest {
        target: path.clone(),
        key: "FOO".to_string(),
        line: "FOO=1".to_string(),
    };

    assert_eq!(append_line_if_absent(&req).unwrap(), PatchOutcome::Applied);
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "A=1\nB=2\nFOO=1\n");
    assert_eq!(content.lines().count(), 3);

    assert_eq!(
        append_line_if_absent(&req).unwrap(),
        PatchOutcome::AlreadyApplied
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn append_on_missing_file_skips_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env.production");
    let req = AppendRequest {
        target: path.clone(),
        key: "FOO".to_string(),
        line: "FOO=1".to_string(),
    };

    assert_eq!(append_line_if_absent(&req).unwrap(), PatchOutcome::Skipped);
    assert!(!path.exists());
}

#[test]
fn append_matches_on_key_not_full_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, ".env", "FOO=old\n");
    let req = AppendRequest {
        target: path.clone(),
        key: "FOO".to_string(),
        line: "FOO=new".to_string(),
    };

    assert_eq!(
        append_line_if_absent(&req).unwrap(),
        PatchOutcome::AlreadyApplied
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "FOO=old\n");
}
