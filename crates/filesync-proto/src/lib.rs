//! Protocol types for FileSync
//!
//! Defines the manifest model, the pure diff engine and the JSON wire
//! envelopes shared by the server and client crates.

pub mod diff;
pub mod entry;
pub mod error;
pub mod wire;

pub use diff::{CompareMode, DiffResult, diff};
pub use entry::{FileEntry, Manifest};
pub use error::{Error, Result};
pub use wire::{Envelope, ErrorBody, Request, Response, ResponseBody};
