use crate::{draft::InvalidDate, Draft, ErrorMap, Field, SubmissionResult};
use chrono::NaiveDate;

/// Everything the registration form knows: what the user typed, what the
/// server said about it, and whether a submission is in flight.
///
/// Lifecycle: `Idle -> Submitting -> Idle`. A successful submission resets
/// the form to a fresh, empty draft. Concurrent submissions are allowed; the
/// last result handled wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Form {
    /// What the user has entered
    draft: Draft,

    /// Messages from the last rejected submission
    errors: ErrorMap,

    /// Message from the last successful submission
    success: Option<String>,

    /// How many submissions haven't come back yet
    in_flight: usize,
}

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing outstanding
    Idle,

    /// Waiting to hear back from the server
    Submitting,
}

impl Form {
    /// A fresh, empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// The current draft
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// All current validation messages
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The message to show next to a field, if any.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.first(field)
    }

    /// The success banner, if the last accepted submission sent one.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Whether we're waiting on the server
    pub fn status(&self) -> Status {
        if self.in_flight == 0 {
            Status::Idle
        } else {
            Status::Submitting
        }
    }

    /// Update a single field from text input.
    ///
    /// ## Errors
    ///
    /// Same as `Draft::set`.
    pub fn update(&mut self, field: Field, value: &str) -> Result<(), InvalidDate> {
        tracing::trace!(%field, "updating field");
        self.draft.set(field, value)
    }

    /// Update the birth date from the date picker.
    pub fn set_birth_date(&mut self, date: Option<NaiveDate>) {
        tracing::trace!("updating birth date");
        self.draft.set_birth_date(date);
    }

    /// Mark a submission as started and get the draft to send. Any banner
    /// from an earlier registration goes away.
    pub fn begin_submit(&mut self) -> Draft {
        self.in_flight += 1;
        self.success = None;
        self.draft.clone()
    }

    /// Apply the result of a submission started with `begin_submit`.
    ///
    /// - `Registered`: reset to a fresh form, then show the message. Any
    ///   other submissions still in flight are forgotten along with the rest.
    /// - `Rejected`: replace all errors with the server's and drop any banner.
    ///   This applies even when it arrives after a reset, since the last
    ///   result handled wins.
    /// - `Failed`: change nothing else.
    pub fn finish(&mut self, result: SubmissionResult) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            SubmissionResult::Registered(message) => {
                self.reset();
                self.success = Some(message);
            }
            SubmissionResult::Rejected(errors) => {
                self.errors = errors;
                self.success = None;
            }
            SubmissionResult::Failed(_) => {}
        }
    }

    /// Throw everything away and start over with an empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
