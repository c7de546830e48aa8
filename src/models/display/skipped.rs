//! Skipped contact display model

use serde::Serialize;
use tabled::Tabled;

use crate::sync::pipeline::SkippedContact;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SkippedDisplay {
    #[tabled(rename = "FIRST")]
    pub first_name: String,

    #[tabled(rename = "LAST")]
    pub last_name: String,

    #[tabled(rename = "REASON")]
    pub reason: String,
}

impl From<&SkippedContact> for SkippedDisplay {
    fn from(skipped: &SkippedContact) -> Self {
        Self {
            first_name: skipped.first_name.clone(),
            last_name: skipped.last_name.clone(),
            reason: skipped.reason.clone(),
        }
    }
}
