use super::{registration_form::TITLE, Action};
use enroll_core::{submit, sync::Client, Draft};
use notify_rust::Notification;

/// Connections to external services that effects use. We keep these around
/// to have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,

    /// Where registrations go
    client: Client,
}

impl EffectContext {
    /// Get a new `EffectContext` talking to the given server
    pub fn new(server: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client: Client::new(server),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Send a registration to the server
    Submit(Draft),

    /// Let the desktop know a registration went through
    NotifyRegistered(String),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self {
            Self::Submit(draft) => {
                let result = submit(&conn.http, &conn.client, &draft).await;

                Some(Action::Submitted(result))
            }

            Self::NotifyRegistered(message) => {
                tracing::debug!("notifying about registration");

                // We don't care if the notification failed to show.
                let _ = Notification::new().summary(TITLE).body(&message).show();

                None
            }
        }
    }
}
