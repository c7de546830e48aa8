//! Display models for CLI output
//!
//! Converts API and sync types into CLI-friendly rows.

pub mod display;

pub use display::{CandidateDisplay, OrgDisplay, SkippedDisplay};
