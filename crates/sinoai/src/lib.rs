//! Top-level facade crate for SinoAI analytics.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use sinoai_core::*;
}

pub mod exporter {
    pub use sinoai_exporter::*;
}
