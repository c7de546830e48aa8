//! Autotask contact creation with email de-duplication
//!
//! Candidates are created one at a time. Each company's existing contact
//! emails are read lazily on first use and then kept current as contacts are
//! created, so a run never creates two contacts with the same email under
//! one company. A company whose existing contacts cannot be read in full is
//! skipped for the rest of the run.

use std::collections::{HashMap, HashSet};
use std::fmt;

use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::client::TicketingApi;
use crate::client::models::NewContact;

/// Contact fields destined for Autotask
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactPayload {
    /// Email as compared against and written to Autotask
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// A contact queued for creation under an Autotask company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationCandidate {
    pub company_id: String,
    pub org_name: String,
    pub payload: ContactPayload,
}

/// Result of one create attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Option<i64>),
    AlreadyExists,
    MissingLastName,
    MissingEmail,
    CompanyUnavailable,
    Failed(String),
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateOutcome::Created(Some(id)) => write!(f, "created ({})", id),
            CreateOutcome::Created(None) => write!(f, "created"),
            CreateOutcome::AlreadyExists => write!(f, "already exists"),
            CreateOutcome::MissingLastName => write!(f, "missing last name"),
            CreateOutcome::MissingEmail => write!(f, "missing email"),
            CreateOutcome::CompanyUnavailable => write!(f, "company contacts unreadable"),
            CreateOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A candidate that was not created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedContact {
    pub first_name: String,
    pub last_name: String,
    pub reason: String,
}

/// Totals of a creation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub total: usize,
    pub skipped: Vec<SkippedContact>,
}

/// Sequential creator holding the per-company email cache
pub struct CreationPipeline<'a> {
    ticketing: &'a dyn TicketingApi,
    existing: HashMap<String, HashSet<String>>,
    unreadable: HashSet<String>,
}

impl<'a> CreationPipeline<'a> {
    pub fn new(ticketing: &'a dyn TicketingApi) -> Self {
        Self {
            ticketing,
            existing: HashMap::new(),
            unreadable: HashSet::new(),
        }
    }

    /// Cached emails for a company, if it has been loaded
    #[cfg(test)]
    pub fn cached_emails(&self, company_id: &str) -> Option<&HashSet<String>> {
        self.existing.get(company_id)
    }

    /// Load a company's existing emails on first access.
    ///
    /// Returns false when the read failed, now or earlier in the run. A failed
    /// company is not read again.
    async fn ensure_loaded(&mut self, company_id: &str) -> bool {
        if self.existing.contains_key(company_id) {
            return true;
        }
        if self.unreadable.contains(company_id) {
            return false;
        }

        match self.ticketing.list_contact_emails(company_id).await {
            Ok(emails) => {
                debug!(
                    "Company {} has {} existing contact emails",
                    company_id,
                    emails.len()
                );
                self.existing.insert(company_id.to_string(), emails);
                true
            }
            Err(err) => {
                warn!(
                    "Skipping Autotask company {}: existing contacts unreadable: {}",
                    company_id, err
                );
                self.unreadable.insert(company_id.to_string());
                false
            }
        }
    }

    /// Create one candidate unless it duplicates an existing email or lacks
    /// a required field
    pub async fn create(&mut self, candidate: &CreationCandidate) -> CreateOutcome {
        let company_id = candidate.company_id.as_str();
        let payload = &candidate.payload;
        let email = payload.normalized_email();

        if !self.ensure_loaded(company_id).await {
            warn!(
                "Not creating '{} {}': company {} was skipped",
                payload.first_name, payload.last_name, company_id
            );
            return CreateOutcome::CompanyUnavailable;
        }

        let is_known = self
            .existing
            .get(company_id)
            .is_some_and(|emails| emails.contains(&email));
        if !email.is_empty() && is_known {
            info!("Contact already exists in Autotask: {}", email);
            return CreateOutcome::AlreadyExists;
        }

        if payload.last_name.is_empty() {
            warn!(
                "Missing last name for contact '{} {}', email '{}'",
                payload.first_name, payload.last_name, email
            );
            return CreateOutcome::MissingLastName;
        }

        if email.is_empty() {
            warn!(
                "Missing email for contact '{} {}'",
                payload.first_name, payload.last_name
            );
            return CreateOutcome::MissingEmail;
        }

        let request = NewContact {
            is_active: 1,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email_address: email.clone(),
            phone: payload.phone.clone(),
        };

        match self.ticketing.create_contact(company_id, &request).await {
            Ok(item_id) => {
                self.existing
                    .entry(company_id.to_string())
                    .or_default()
                    .insert(email);
                CreateOutcome::Created(item_id)
            }
            Err(err) => {
                error!(
                    "Failed to create contact {} {}: {}",
                    payload.first_name, payload.last_name, err
                );
                CreateOutcome::Failed(err.to_string())
            }
        }
    }

    /// Create every candidate in order
    pub async fn run(
        &mut self,
        candidates: &[CreationCandidate],
        progress: &ProgressBar,
    ) -> SyncReport {
        progress.set_length(candidates.len() as u64);
        progress.set_message("Creating contacts");

        let mut report = SyncReport {
            total: candidates.len(),
            ..SyncReport::default()
        };

        for candidate in candidates {
            let outcome = self.create(candidate).await;
            if outcome.is_created() {
                report.created += 1;
            } else {
                report.skipped.push(SkippedContact {
                    first_name: candidate.payload.first_name.clone(),
                    last_name: candidate.payload.last_name.clone(),
                    reason: outcome.to_string(),
                });
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        report
    }
}
