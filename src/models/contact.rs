//! Contact model representing a person or business in the directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serde adapter that carries the profile image as a base64 string.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .filter(|s| !s.is_empty())
            .map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// A contact record in the directory.
///
/// Identifiers are assigned by the record store; an `id` of `0` on a new
/// contact asks the store to pick the next free one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier for the contact
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Company/organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Profile image file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    /// Raw profile image bytes (base64 on the wire)
    #[serde(with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub profile_image_bytes: Option<Vec<u8>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<String>,

    /// First street address line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    /// Second street address line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Contact {
    /// Create a new contact with a first and last name.
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    /// Full name built from first and last name.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last).trim().to_string(),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Whether an email was supplied (non-blank).
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.trim().is_empty())
    }

    /// Whether the contact carries image bytes.
    pub fn has_image(&self) -> bool {
        self.profile_image_bytes
            .as_ref()
            .is_some_and(|bytes| !bytes.is_empty())
    }
}
