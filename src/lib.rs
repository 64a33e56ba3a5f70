//! Contact Directory - an MCP server over a directory of contact records.
//!
//! The interesting logic lives in two places: the query filter, which turns
//! optional partial email/phone/city/state criteria into a deterministic,
//! paginated result set, and the email validator, which normalizes
//! internationalized domains and checks address shape under hard time budgets.
//!
//! # Architecture
//!
//! - **models**: The contact record
//! - **filter**: Search criteria, wildcard matching and skip/take pagination
//! - **validation**: Time-bounded email validation
//! - **repositories**: Record store abstraction and the in-memory implementation
//! - **services**: Lookup, search and validated writes
//! - **server**: MCP protocol server
//! - **observability**: Counters and timers
//! - **config** / **error**: Environment configuration and error types

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{ConfigError, DirectoryError, DirectoryResult};
pub use filter::{ContactFilter, Pagination, SearchCriteria, SearchScope};
pub use models::Contact;
pub use observability::MetricsTracker;
pub use repositories::{ContactRepository, InMemoryContactRepository};
pub use server::ContactDirectoryServer;
pub use services::{ContactService, ContactServiceImpl};
pub use validation::{EmailValidator, ValidationOutcome};
