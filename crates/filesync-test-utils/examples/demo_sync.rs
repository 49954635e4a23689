//! End-to-end sync demo over the in-process loopback transport

use filesync_client::SyncOptions;
use filesync_test_utils::SyncFixture;

fn main() -> filesync_client::Result<()> {
    // Honor RUST_LOG so the server-side warnings show up in the demo output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let fixture = SyncFixture::new();

    // A small source tree to serve
    fixture.write_source("README.md", b"# Download Example\n\n");
    fixture.write_source("folder/.gitignore", b"/vendor/\n.env");
    fixture.write_source("notes/draft.tmp", b"scratch");
    fixture.write_source_ignore("*.tmp\n");
    fixture.install_key_pair("user@example.com");

    // A stray file that only exists locally
    fixture.write_destination("stale.txt", b"left over");

    let options = SyncOptions {
        delete: true,
        checksum: false,
    };
    let report = fixture
        .client()
        .dispatch("user@example.com", &fixture.destination(), options)?;

    println!("Updated files:");
    for path in &report.updated {
        println!("  + {path}");
    }
    println!("Deleted files:");
    for path in &report.deleted {
        println!("  - {path}");
    }

    // A second run has nothing left to transfer
    let report = fixture
        .client()
        .dispatch("user@example.com", &fixture.destination(), options)?;
    println!("\nSecond run unchanged: {}", report.is_unchanged());

    Ok(())
}
