//! End-to-end sync flows over the loopback transport
//!
//! Each test drives the real client against the real dispatcher with
//! full JSON marshaling in between; only the cipher and the carrier
//! are test doubles.

use std::fs;

use filesync_client::SyncOptions;
use filesync_test_utils::SyncFixture;
use filetime::FileTime;

const README: &[u8] = b"# Download Example\n\n";
const GITIGNORE: &[u8] = b"/vendor/\n.env";

fn seeded_fixture() -> SyncFixture {
    let fixture = SyncFixture::new();
    fixture.write_source("README.md", README);
    fixture.write_source("folder/.gitignore", GITIGNORE);
    fixture.install_key_pair("user@example.com");
    fixture
}

fn sync(fixture: &SyncFixture, options: SyncOptions) -> filesync_client::SyncReport {
    fixture
        .client()
        .dispatch("user@example.com", &fixture.destination(), options)
        .expect("sync should succeed")
}

#[test]
fn test_fresh_destination_receives_everything() {
    let fixture = seeded_fixture();

    let report = sync(&fixture, SyncOptions::default());

    let mut updated = report.updated.clone();
    updated.sort_unstable();
    assert_eq!(updated, vec!["README.md", "folder/.gitignore"]);
    assert!(report.deleted.is_empty());

    assert_eq!(fixture.read_destination("README.md"), README);
    assert_eq!(fixture.read_destination("folder/.gitignore"), GITIGNORE);
}

#[test]
fn test_synced_files_carry_source_metadata() {
    let fixture = seeded_fixture();

    sync(&fixture, SyncOptions::default());

    let source = fixture.source_manifest();
    let destination = fixture.destination_manifest();

    for entry in source.entries() {
        let synced = destination
            .get(&entry.path)
            .unwrap_or_else(|| panic!("{} missing from destination", entry.path));
        assert_eq!(synced.size, entry.size, "{} size", entry.path);
        assert_eq!(synced.modified, entry.modified, "{} mtime", entry.path);
        assert_eq!(synced.checksum, entry.checksum, "{} checksum", entry.path);
        #[cfg(unix)]
        assert_eq!(synced.permissions, entry.permissions, "{} mode", entry.path);
    }
}

#[test]
fn test_destination_manifest_converges_on_source() {
    let fixture = seeded_fixture();
    fixture.write_source("docs/guide.md", b"guide");
    fixture.write_source_ignore("*.tmp\n");
    fixture.write_source("scratch.tmp", b"never leaves the source");

    sync(&fixture, SyncOptions::default());

    let source = fixture.source_manifest();
    assert!(!source.contains("scratch.tmp"));
    assert_eq!(fixture.destination_manifest(), source);
}

#[test]
fn test_second_sync_transfers_nothing() {
    let fixture = seeded_fixture();

    sync(&fixture, SyncOptions::default());
    let second = sync(&fixture, SyncOptions::default());

    assert!(second.is_unchanged());
}

#[test]
fn test_changed_source_file_is_resynced() {
    let fixture = seeded_fixture();
    sync(&fixture, SyncOptions::default());

    fixture.write_source("README.md", b"# Download Example, revised\n");
    let report = sync(&fixture, SyncOptions::default());

    assert_eq!(report.updated, vec!["README.md"]);
    assert_eq!(
        fixture.read_destination("README.md"),
        b"# Download Example, revised\n"
    );
}

#[test]
fn test_delete_option_controls_stray_files() {
    let fixture = seeded_fixture();
    fixture.write_destination("foo.txt", b"only here");

    let kept = sync(&fixture, SyncOptions::default());
    assert!(kept.deleted.is_empty());
    fixture.assert_destination_exists("foo.txt");

    let removed = sync(
        &fixture,
        SyncOptions {
            delete: true,
            checksum: false,
        },
    );
    assert_eq!(removed.deleted, vec!["foo.txt"]);
    fixture.assert_destination_not_exists("foo.txt");
}

#[test]
fn test_checksum_mode_catches_silent_content_drift() {
    let fixture = seeded_fixture();
    sync(&fixture, SyncOptions::default());

    // Corrupt the destination copy without changing size, mtime or mode.
    let source_entry = fixture
        .source_manifest()
        .get("README.md")
        .unwrap()
        .clone();
    let drifted = fixture.destination().join("README.md");
    fs::write(&drifted, b"# Download Exa-ple\n\n").unwrap();
    filetime::set_file_mtime(&drifted, FileTime::from_unix_time(source_entry.modified, 0)).unwrap();

    let metadata_pass = sync(&fixture, SyncOptions::default());
    assert!(metadata_pass.is_unchanged(), "metadata mode cannot see drift");
    assert_eq!(fixture.read_destination("README.md"), b"# Download Exa-ple\n\n");

    let checksum_pass = sync(
        &fixture,
        SyncOptions {
            delete: false,
            checksum: true,
        },
    );
    assert_eq!(checksum_pass.updated, vec!["README.md"]);
    assert_eq!(fixture.read_destination("README.md"), README);
}

#[test]
fn test_ignored_files_never_reach_the_destination() {
    let fixture = seeded_fixture();
    fixture.write_source_ignore("logs\n*.tmp\n");
    fixture.write_source("logs/app.log", b"secret log");
    fixture.write_source("scratch.tmp", b"scratch");

    let report = sync(&fixture, SyncOptions::default());

    let mut updated = report.updated.clone();
    updated.sort_unstable();
    assert_eq!(updated, vec!["README.md", "folder/.gitignore"]);
    fixture.assert_destination_not_exists("logs/app.log");
    fixture.assert_destination_not_exists("scratch.tmp");
    fixture.assert_destination_not_exists(".syncignore");
}

#[test]
fn test_deeply_nested_paths_are_created() {
    let fixture = seeded_fixture();
    fixture.write_source("a/b/c/d/deep.txt", b"deep");

    sync(&fixture, SyncOptions::default());

    assert_eq!(fixture.read_destination("a/b/c/d/deep.txt"), b"deep");
}

#[test]
fn test_destination_only_tree_survives_without_delete() {
    let fixture = seeded_fixture();
    fixture.write_destination("local/notes.md", b"mine");

    sync(&fixture, SyncOptions::default());

    fixture.assert_destination_exists("local/notes.md");
    assert_eq!(fixture.read_destination("local/notes.md"), b"mine");
}
