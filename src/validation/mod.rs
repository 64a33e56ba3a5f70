//! Input validation for contact writes.

pub mod bounded;
pub mod email;

pub use bounded::{run_bounded, StageOutcome};
pub use email::{has_email_shape, normalize_domain, EmailValidator, ValidationOutcome};
