//! Email and phone extraction from an IT Glue contact
//!
//! Values come from three places: the structured `contact-emails` and
//! `contact-phones` lists, the legacy flat attribute fields, and included
//! `contact_methods` records classified by label.

use std::collections::BTreeSet;

use crate::client::models::{ContactDetail, Included};

/// Legacy phone fields sometimes carry this placeholder
const PHONE_PLACEHOLDER: &str = "n/a";

/// Trimmed, de-duplicated emails and phones of one contact.
///
/// Sets are ordered so the primary value is the lexicographically smallest,
/// which keeps runs reproducible. Dedup is exact after trimming; emails are
/// not case-folded here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}

impl ContactFields {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    pub fn primary_phone(&self) -> Option<&str> {
        self.phones.first().map(String::as_str)
    }
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        set.insert(value.to_string());
    }
}

/// Collect every email and phone number of a contact
pub fn extract(contact: &ContactDetail) -> ContactFields {
    let mut fields = ContactFields::default();
    let attrs = &contact.attributes;

    for entry in &attrs.contact_emails {
        insert_trimmed(&mut fields.emails, entry.value.as_deref());
    }
    for entry in &attrs.contact_phones {
        insert_trimmed(&mut fields.phones, entry.value.as_deref());
    }

    for email in attrs.legacy_emails() {
        insert_trimmed(&mut fields.emails, email);
    }
    for phone in attrs.legacy_phones() {
        let phone = phone.filter(|p| !p.trim().eq_ignore_ascii_case(PHONE_PLACEHOLDER));
        insert_trimmed(&mut fields.phones, phone);
    }

    for item in &contact.included {
        let Included::ContactMethod(method) = item else {
            continue;
        };
        let label = method.label.to_lowercase();
        if label.contains("email") {
            insert_trimmed(&mut fields.emails, Some(&method.value));
        } else if ["phone", "mobile", "fax"].iter().any(|k| label.contains(k)) {
            insert_trimmed(&mut fields.phones, Some(&method.value));
        }
    }

    fields
}
