use crate::{
    sync::{self, register, Client},
    Draft, ErrorMap,
};

/// How a submission attempt ended, from the form's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The server accepted the registration and sent this message back.
    Registered(String),

    /// The server rejected the registration with per-field messages.
    Rejected(ErrorMap),

    /// Anything else: no response, a response we couldn't read, or a failure
    /// without field errors. The reason is for logs only; the form doesn't
    /// show it.
    Failed(String),
}

/// Send a draft to the server and sort the answer into one of the three
/// outcomes. The birth date goes out as `YYYY-MM-DD` (or an empty string).
///
/// There are no retries or timeouts beyond what `http` is configured with.
pub async fn submit(http: &reqwest::Client, client: &Client, draft: &Draft) -> SubmissionResult {
    tracing::info!(server = %client.server, "submitting registration");

    match client.register(http, &register::Req::from(draft)).await {
        Ok(resp) => {
            tracing::info!("registration accepted");
            SubmissionResult::Registered(resp.message)
        }
        Err(sync::Error::Validation(errors)) => {
            tracing::info!(fields = ?errors.fields().collect::<Vec<_>>(), "registration rejected");
            SubmissionResult::Rejected(errors)
        }
        Err(problem) => {
            tracing::warn!(?problem, "registration failed without field errors");
            SubmissionResult::Failed(problem.to_string())
        }
    }
}
