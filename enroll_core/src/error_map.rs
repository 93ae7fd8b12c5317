use crate::Field;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Validation messages from the server, keyed by field. Each field can have
/// several messages; only the first is meant for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<Field, Vec<String>>);

/// The body the server sends when it rejects a registration.
#[derive(Debug, Deserialize)]
struct ErrorResp {
    /// Field key to messages. Left loosely typed so that an unfamiliar key,
    /// or one with an odd value, doesn't sink the whole response.
    errors: BTreeMap<String, serde_json::Value>,
}

impl ErrorMap {
    /// Pull an error map out of a response body shaped like
    /// `{"errors": {"email": ["..."]}}`. Anything else, including invalid JSON,
    /// gives `None`. Keys that don't name a form field, and values that aren't
    /// a list of messages, are dropped.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let resp: ErrorResp = match serde_json::from_slice(body) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(?err, "response body is not an error map");
                return None;
            }
        };

        Some(
            resp.errors
                .into_iter()
                .filter_map(|(key, value)| {
                    let field = match key.parse::<Field>() {
                        Ok(field) => field,
                        Err(unknown) => {
                            tracing::debug!(%unknown, "ignoring error for a field we don't have");
                            return None;
                        }
                    };

                    match serde_json::from_value::<Vec<String>>(value) {
                        Ok(messages) => Some((field, messages)),
                        Err(err) => {
                            tracing::debug!(%field, ?err, "ignoring errors that aren't a list of messages");
                            None
                        }
                    }
                })
                .collect(),
        )
    }

    /// The message to display for a field, if it has one.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.0
            .get(&field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Are there no messages to display?
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Fields with at least one message, in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, _)| *field)
    }
}

impl FromIterator<(Field, Vec<String>)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (Field, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
