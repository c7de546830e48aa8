//! Display model implementations for table and JSON output

mod candidate;
mod org;
mod skipped;

pub use candidate::CandidateDisplay;
pub use org::OrgDisplay;
pub use skipped::SkippedDisplay;
