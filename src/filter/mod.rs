//! Contact query filtering.
//!
//! Turns loosely-specified search criteria (partial email, phone, city or
//! state) into a [`ContactFilter`]: a conjunction of case-insensitive
//! substring clauses plus a skip/take window. Record sources apply the filter
//! in their natural order.

pub mod compiler;
pub mod criteria;
pub mod matcher;

pub use compiler::{ContactFilter, FieldClause, Pagination};
pub use criteria::{Dimension, SearchCriteria, SearchScope};
pub use matcher::{ContactField, WildcardMatcher};
