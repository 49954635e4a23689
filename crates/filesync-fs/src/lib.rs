//! Filesystem layer for FileSync
//!
//! Provides manifest scanning, ignore rules, checksums and safe I/O
//! shared by the server and client crates.

pub mod checksum;
pub mod error;
pub mod ignore;
pub mod io;
pub mod path;
pub mod scan;

pub use error::{Error, Result};
pub use ignore::{IGNORE_FILE_NAME, IgnoreRuleSet};
pub use path::RelativePath;
pub use scan::scan;
