//! IT Glue (JSON:API) resource models
//!
//! Responses are decoded once into these records; anything the sync logic
//! reads is either a required field here or an explicit default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::pagination::{CursorPage, NumberedPage};

/// Adapter name of the Microsoft identity-provider integration
pub const IDENTITY_PROVIDER_ADAPTER: &str = "Microsoft";

/// Adapter name of the Autotask PSA integration
pub const TICKETING_ADAPTER: &str = "Autotask";

/// Resource type name of tags marking a licensed Microsoft user
pub const LICENSE_TAG_TYPE: &str = "Microsoft Licenses";

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept identifiers sent either as JSON strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `links` block of a JSON:API collection response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// Bare `{id, type}` entry of a relationship collection
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing resource id"))
}

/// One page of `/organizations/{id}/relationships/contacts`
#[derive(Debug, Deserialize)]
pub struct ContactRefPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ResourceRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Links,
}

impl CursorPage for ContactRefPage {
    type Item = ResourceRef;

    fn into_parts(self) -> (Vec<ResourceRef>, Option<String>) {
        (self.data, self.links.next)
    }
}

/// Organization entry of the `/organizations` listing
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationSummary {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: OrganizationAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// One page of `/organizations?page[number]=N`
#[derive(Debug, Deserialize)]
pub struct OrganizationPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<OrganizationSummary>,
}

impl NumberedPage for OrganizationPage {
    type Item = OrganizationSummary;

    fn into_items(self) -> Vec<OrganizationSummary> {
        self.data
    }
}

/// Single-resource response with side-loaded `included` resources
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default, deserialize_with = "null_as_default")]
    pub included: Vec<Included>,
}

/// Organization with its adapter relationships
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub adapters: Vec<AdapterRelationship>,
}

impl Organization {
    /// Whether an active, non-orphaned Autotask relationship exists
    pub fn syncs_with_ticketing(&self) -> bool {
        self.adapters.iter().any(|a| {
            a.adapter_type_name == TICKETING_ADAPTER && a.sync && !a.orphaned
        })
    }

    /// Autotask company id: remote id of the first Autotask relationship
    pub fn ticketing_company_id(&self) -> Option<&str> {
        self.adapters
            .iter()
            .find(|a| a.adapter_type_name == TICKETING_ADAPTER)
            .and_then(|a| a.remote_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Link between an IT Glue resource and a third-party integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRelationship {
    pub adapter_type_name: String,
    pub sync: bool,
    pub orphaned: bool,
    pub remote_id: Option<String>,
}

/// Tag attached to a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub resource_type_name: String,
}

/// Labelled contact method (email, phone, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMethod {
    pub label: String,
    pub value: String,
}

/// A side-loaded resource, classified at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawIncluded")]
pub enum Included {
    Adapter(AdapterRelationship),
    Tag(Tag),
    ContactMethod(ContactMethod),
    Other,
}

#[derive(Deserialize)]
struct RawIncluded {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    attributes: RawIncludedAttributes,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawIncludedAttributes {
    #[serde(default)]
    adapter_type_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    sync: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    orphaned: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    remote_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    resource_type_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    value: String,
}

impl From<RawIncluded> for Included {
    fn from(raw: RawIncluded) -> Self {
        let attrs = raw.attributes;
        match raw.kind.as_str() {
            "tags" => Included::Tag(Tag {
                resource_type_name: attrs.resource_type_name,
            }),
            "contact_methods" => Included::ContactMethod(ContactMethod {
                label: attrs.label,
                value: attrs.value,
            }),
            _ => match attrs.adapter_type_name {
                Some(adapter_type_name) => Included::Adapter(AdapterRelationship {
                    adapter_type_name,
                    sync: attrs.sync,
                    orphaned: attrs.orphaned,
                    remote_id: attrs.remote_id,
                }),
                None => Included::Other,
            },
        }
    }
}

impl Included {
    pub fn as_adapter(&self) -> Option<&AdapterRelationship> {
        match self {
            Included::Adapter(a) => Some(a),
            _ => None,
        }
    }
}

/// Organization detail resource (`/organizations/{id}`)
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationResource {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: OrganizationAttributes,
}

/// Contact resource as returned with its relationships expanded
#[derive(Debug, Clone, Deserialize)]
pub struct ContactResource {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: ContactAttributes,
}

/// Entry of the structured `contact-emails` / `contact-phones` lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListEntry {
    #[serde(default)]
    pub value: Option<String>,
}

/// Contact attributes: structured lists plus legacy flat fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactAttributes {
    #[serde(rename = "first-name", default)]
    pub first_name: Option<String>,
    #[serde(rename = "last-name", default)]
    pub last_name: Option<String>,
    #[serde(rename = "contact-emails", default, deserialize_with = "null_as_default")]
    pub contact_emails: Vec<ContactListEntry>,
    #[serde(rename = "contact-phones", default, deserialize_with = "null_as_default")]
    pub contact_phones: Vec<ContactListEntry>,

    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
    #[serde(rename = "emailAddress2", default)]
    pub email_address2: Option<String>,
    #[serde(rename = "emailAddress3", default)]
    pub email_address3: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "mobilePhone", default)]
    pub mobile_phone: Option<String>,
    #[serde(rename = "alternatePhone", default)]
    pub alternate_phone: Option<String>,
    #[serde(rename = "faxNumber", default)]
    pub fax_number: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl ContactAttributes {
    /// Legacy flat email fields in declaration order
    pub fn legacy_emails(&self) -> [Option<&str>; 3] {
        [
            self.email_address.as_deref(),
            self.email_address2.as_deref(),
            self.email_address3.as_deref(),
        ]
    }

    /// Legacy flat phone fields in declaration order
    pub fn legacy_phones(&self) -> [Option<&str>; 5] {
        [
            self.phone.as_deref(),
            self.mobile_phone.as_deref(),
            self.alternate_phone.as_deref(),
            self.fax_number.as_deref(),
            self.extension.as_deref(),
        ]
    }
}

/// A contact with everything fetched alongside it
#[derive(Debug, Clone)]
pub struct ContactDetail {
    pub id: String,
    pub attributes: ContactAttributes,
    pub included: Vec<Included>,
}

impl From<Document<ContactResource>> for ContactDetail {
    fn from(doc: Document<ContactResource>) -> Self {
        Self {
            id: doc.data.id,
            attributes: doc.data.attributes,
            included: doc.included,
        }
    }
}

impl From<Document<OrganizationResource>> for Organization {
    fn from(doc: Document<OrganizationResource>) -> Self {
        Self {
            id: doc.data.id,
            name: doc.data.attributes.name,
            adapters: doc
                .included
                .iter()
                .filter_map(Included::as_adapter)
                .cloned()
                .collect(),
        }
    }
}
