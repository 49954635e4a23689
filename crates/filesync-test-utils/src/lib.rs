//! Shared test utilities for the FileSync workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never
//! published.
//!
//! # Modules
//!
//! - [`cipher`] — deterministic [`XorCipher`] standing in for real crypto
//! - [`fixture`] — [`SyncFixture`] source/destination/keychain builder
//! - [`loopback`] — in-process [`Loopback`] transport over a dispatcher

pub mod cipher;
pub mod fixture;
pub mod loopback;

pub use cipher::XorCipher;
pub use fixture::SyncFixture;
pub use loopback::Loopback;
