//! Caller-facing search criteria and their compilation into a [`ContactFilter`].

use super::compiler::{ContactFilter, Pagination};
use super::matcher::ContactField;
use serde::Deserialize;

/// A search dimension and the contact fields it inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Email,
    Phone,
    City,
    State,
}

impl Dimension {
    /// Fields consulted for this dimension; any one matching is enough.
    pub fn fields(self) -> &'static [ContactField] {
        match self {
            Self::Email => &[ContactField::Email],
            Self::Phone => &[ContactField::WorkPhone, ContactField::HomePhone],
            Self::City => &[ContactField::City],
            Self::State => &[ContactField::State],
        }
    }

    fn criterion(self, criteria: &SearchCriteria) -> Option<&str> {
        match self {
            Self::Email => criteria.email.as_deref(),
            Self::Phone => criteria.phone.as_deref(),
            Self::City => criteria.city.as_deref(),
            Self::State => criteria.state.as_deref(),
        }
    }
}

/// Which dimensions a query entry point honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Email and phone lookups
    EmailPhone,
    /// Location lookups
    CityState,
}

impl SearchScope {
    pub fn dimensions(self) -> &'static [Dimension] {
        match self {
            Self::EmailPhone => &[Dimension::Email, Dimension::Phone],
            Self::CityState => &[Dimension::State, Dimension::City],
        }
    }
}

/// Optional search parameters for one query.
///
/// Every field is independently optional and an all-empty criteria set is a
/// legal query that returns everything (subject to skip/take).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl SearchCriteria {
    /// Criteria for the email/phone entry point.
    pub fn email_phone(
        email: Option<String>,
        phone: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Self {
        Self {
            email,
            phone,
            skip,
            take,
            ..Default::default()
        }
    }

    /// Criteria for the city/state entry point.
    pub fn city_state(
        city: Option<String>,
        state: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Self {
        Self {
            city,
            state,
            skip,
            take,
            ..Default::default()
        }
    }

    /// Compile the dimensions active in `scope` into a filter.
    ///
    /// Criteria outside the scope are ignored.
    pub fn compile(&self, scope: SearchScope) -> ContactFilter {
        scope
            .dimensions()
            .iter()
            .fold(ContactFilter::new(), |filter, dimension| {
                filter.with_criterion(dimension.fields(), dimension.criterion(self))
            })
            .paginate(Pagination::from_signed(self.skip, self.take))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_email_phone_ignores_location() {
        let criteria = SearchCriteria {
            email: Some("rose".to_string()),
            city: Some("Pawnee".to_string()),
            ..Default::default()
        };
        let filter = criteria.compile(SearchScope::EmailPhone);
        assert_eq!(filter.clauses().len(), 1);
        assert_eq!(filter.clauses()[0].fields(), &[ContactField::Email]);
    }

    #[test]
    fn test_compile_phone_covers_both_numbers() {
        let criteria = SearchCriteria::email_phone(None, Some("555".to_string()), None, None);
        let filter = criteria.compile(SearchScope::EmailPhone);
        assert_eq!(
            filter.clauses()[0].fields(),
            &[ContactField::WorkPhone, ContactField::HomePhone]
        );
    }

    #[test]
    fn test_compile_city_state() {
        let criteria = SearchCriteria::city_state(
            Some("York".to_string()),
            Some("NY".to_string()),
            Some(0),
            Some(10),
        );
        let filter = criteria.compile(SearchScope::CityState);
        assert_eq!(filter.clauses().len(), 2);
        assert_eq!(filter.pagination(), Pagination::new(Some(0), Some(10)));
    }

    #[test]
    fn test_compile_empty_criteria() {
        let filter = SearchCriteria::default().compile(SearchScope::CityState);
        assert!(filter.is_unconstrained());
        assert_eq!(filter.pagination(), Pagination::default());
    }

    #[test]
    fn test_deserialize_partial_criteria() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"phone":"333","take":2}"#).unwrap();
        assert_eq!(criteria.phone.as_deref(), Some("333"));
        assert_eq!(criteria.take, Some(2));
        assert!(criteria.email.is_none());
    }
}
