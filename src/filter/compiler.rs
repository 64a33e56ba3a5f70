//! Predicate composition and skip/take pagination over contacts.

use super::matcher::{ContactField, WildcardMatcher};
use crate::models::Contact;

/// One search dimension: matches when ANY of its fields contains the needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClause {
    fields: Vec<ContactField>,
    matcher: WildcardMatcher,
}

impl FieldClause {
    /// Whether the contact satisfies this clause.
    pub fn matches(&self, contact: &Contact) -> bool {
        self.fields.iter().any(|field| {
            field
                .read(contact)
                .map(|value| self.matcher.is_match(value))
                .unwrap_or(false)
        })
    }

    pub fn fields(&self) -> &[ContactField] {
        &self.fields
    }
}

/// Skip/take window applied after filtering.
///
/// `None` means "not supplied": no skip drops nothing, no take keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl Pagination {
    pub fn new(skip: Option<usize>, take: Option<usize>) -> Self {
        Self { skip, take }
    }

    /// Build a window from signed caller input.
    ///
    /// Negative values clamp to zero: a negative skip drops nothing and a
    /// negative take returns nothing.
    pub fn from_signed(skip: Option<i64>, take: Option<i64>) -> Self {
        let clamp = |n: i64| usize::try_from(n.max(0)).unwrap_or(usize::MAX);
        Self {
            skip: skip.map(clamp),
            take: take.map(clamp),
        }
    }

    /// Apply the window to an already-filtered sequence, preserving order.
    pub fn apply<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: Iterator,
    {
        items
            .skip(self.skip.unwrap_or(0))
            .take(self.take.unwrap_or(usize::MAX))
    }
}

/// A compiled contact query: AND across clauses, then pagination.
///
/// The filter never reorders; results come back in the order the record
/// source yields them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    clauses: Vec<FieldClause>,
    page: Pagination,
}

impl ContactFilter {
    /// An unconstrained filter that returns everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension matching `criterion` against any of `fields`.
    ///
    /// Blank criteria add nothing.
    pub fn with_criterion(mut self, fields: &[ContactField], criterion: Option<&str>) -> Self {
        if let Some(matcher) = WildcardMatcher::new(criterion) {
            self.clauses.push(FieldClause {
                fields: fields.to_vec(),
                matcher,
            });
        }
        self
    }

    /// Set the skip/take window.
    pub fn paginate(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    /// Whether the contact satisfies every clause.
    pub fn matches(&self, contact: &Contact) -> bool {
        self.clauses.iter().all(|clause| clause.matches(contact))
    }

    /// Filter then paginate `contacts`, cloning the survivors.
    pub fn apply<'a, I>(&self, contacts: I) -> Vec<Contact>
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        self.page
            .apply(contacts.into_iter().filter(|c| self.matches(c)))
            .cloned()
            .collect()
    }

    pub fn clauses(&self) -> &[FieldClause] {
        &self.clauses
    }

    pub fn pagination(&self) -> Pagination {
        self.page
    }

    /// True when no clause constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }
}
