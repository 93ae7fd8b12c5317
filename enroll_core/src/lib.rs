//! Common code for the course registration client: the draft record, server
//! errors, and the one HTTP call that submits it.

/// Identifiers for the fields on the registration form.
pub mod field;
pub use field::Field;

/// The in-progress registration record.
pub mod draft;
pub use draft::Draft;

/// Per-field validation messages from the server.
pub mod error_map;
pub use error_map::ErrorMap;

/// Form state: draft, errors, and where a submission is in its lifecycle.
pub mod form;
pub use form::Form;

/// Date formats and Bulgarian calendar names.
pub mod locale;

/// Sending a draft and interpreting the server's answer.
pub mod submission;
pub use submission::{submit, SubmissionResult};

/// Talk to the registration server.
pub mod sync;

#[cfg(test)]
mod test;
