//! Creation candidate display model

use serde::Serialize;
use tabled::Tabled;

use crate::sync::CreationCandidate;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CandidateDisplay {
    #[tabled(rename = "ORG")]
    pub org: String,

    #[tabled(rename = "AUTOTASK ID")]
    pub company_id: String,

    #[tabled(rename = "FIRST")]
    pub first_name: String,

    #[tabled(rename = "LAST")]
    pub last_name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,
}

impl From<&CreationCandidate> for CandidateDisplay {
    fn from(candidate: &CreationCandidate) -> Self {
        let payload = &candidate.payload;
        Self {
            org: candidate.org_name.clone(),
            company_id: candidate.company_id.clone(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
        }
    }
}
