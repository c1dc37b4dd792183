//! SinoAI core: transport-agnostic primitives shared by the exporter.
//!
//! This crate defines the error surface, the request-path label rules, and the
//! activity row model with the business counting functions. It carries no
//! transport or runtime dependencies so the counting rules can be tested
//! without a server or a data store.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod activity;
pub mod error;
pub mod label;

/// Shared result type.
pub use error::{AnalyticsError, Result};
