//! Golden-file tests using test-fixtures/
//!
//! These tests scan the checked-in basic-sync tree and verify that the
//! manifest reports the expected paths, sizes and checksums. Timestamps
//! are not asserted because they depend on the checkout.

use filesync_fs::checksum::compute_content_checksum;
use filesync_fs::scan;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

/// Path to the basic-sync fixture tree (relative to the workspace root).
fn fixture_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/filesync-fs -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures/trees/basic-sync")
}

// ==========================================================================
// Fixture Validity Tests
// ==========================================================================

#[test]
fn test_basic_sync_fixture_scans() {
    let manifest = scan(&fixture_root()).unwrap();

    let mut paths: Vec<&str> = manifest.paths().collect();
    paths.sort_unstable();
    assert_eq!(paths, vec!["README.md", "folder/.gitignore"]);
}

#[test]
fn test_fixture_sizes_and_checksums() {
    let manifest = scan(&fixture_root()).unwrap();

    let readme = manifest.get("README.md").unwrap();
    assert_eq!(readme.size, 20);
    assert_eq!(
        readme.checksum,
        compute_content_checksum(b"# Download Example\n\n")
    );

    let gitignore = manifest.get("folder/.gitignore").unwrap();
    assert_eq!(gitignore.size, 13);
    assert_eq!(
        gitignore.checksum,
        compute_content_checksum(b"/vendor/\n.env")
    );
}

#[test]
fn test_fixture_ignore_rules_are_honored() {
    let manifest = scan(&fixture_root()).unwrap();

    // scratch.tmp matches the *.tmp rule and the rule file itself is
    // reserved, so neither may appear in the manifest.
    assert!(!manifest.contains("scratch.tmp"));
    assert!(!manifest.contains(".syncignore"));
}

#[test]
fn test_fixture_permissions_are_octal_strings() {
    let manifest = scan(&fixture_root()).unwrap();

    for entry in manifest.entries() {
        assert_eq!(
            entry.permissions.len(),
            4,
            "permissions for {} should be a 4-digit octal string, got {:?}",
            entry.path,
            entry.permissions
        );
        assert!(
            entry.permissions.chars().all(|c| ('0'..='7').contains(&c)),
            "permissions for {} should be octal, got {:?}",
            entry.path,
            entry.permissions
        );
    }
}
