//! Field accessors and wildcard substring matching.

use crate::models::Contact;

/// Searchable text fields of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    WorkPhone,
    HomePhone,
    City,
    State,
}

impl ContactField {
    /// Read the field from a contact. Unset fields never match.
    pub fn read(self, contact: &Contact) -> Option<&str> {
        match self {
            Self::Email => contact.email.as_deref(),
            Self::WorkPhone => contact.work_phone.as_deref(),
            Self::HomePhone => contact.home_phone.as_deref(),
            Self::City => contact.city.as_deref(),
            Self::State => contact.state.as_deref(),
        }
    }
}

/// Unanchored, case-insensitive substring matcher (`%needle%`).
///
/// The needle is taken literally; no character in it acts as a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardMatcher {
    needle: String,
}

impl WildcardMatcher {
    /// Build a matcher from an optional criterion.
    ///
    /// Returns `None` when the criterion is absent, empty or only whitespace,
    /// meaning the dimension is unconstrained.
    pub fn new(criterion: Option<&str>) -> Option<Self> {
        let criterion = criterion?;
        if criterion.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: criterion.to_lowercase(),
        })
    }

    /// Whether `value` contains the needle, ignoring case.
    pub fn is_match(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}
