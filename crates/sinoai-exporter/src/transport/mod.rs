//! HTTP transport concerns shared by every route.

pub mod instrument;

pub use instrument::track_requests;
