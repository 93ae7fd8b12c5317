use super::error::{self, Error};
use super::register;
use crate::ErrorMap;
use reqwest::header::{HeaderValue, ACCEPT};
use url::Url;

/// The server the original form talks to.
pub const DEFAULT_SERVER: &str = "https://admin.perfectconsult.bg";

/// Client for the registration API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://admin.perfectconsult.bg`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Register for a course.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`, plus `Error::UrlParse` if
    /// `server` isn't a valid base URL.
    pub async fn register(
        &self,
        client: &reqwest::Client,
        req: &register::Req<'_>,
    ) -> error::Result<register::Resp> {
        let url = Url::parse(&self.server)?.join(register::PATH)?;

        Self::handle_response(
            client
                .post(url)
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .json(req),
        )
        .await
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx). A body without a
    ///   readable `message` still counts; the message is just empty.
    /// - `Error::Validation` if the server returned anything else with an
    ///   `errors` map in the body
    /// - `Error::Unexpected` if the server returned anything else
    /// - `Error::Http` if we never got a complete response
    async fn handle_response(req: reqwest::RequestBuilder) -> error::Result<register::Resp> {
        let resp = req.send().await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body).unwrap_or_else(|err| {
                tracing::debug!(?err, "success response had no readable message");
                register::Resp::default()
            }))
        } else {
            match ErrorMap::from_body(&body) {
                Some(errors) => Err(Error::Validation(errors)),
                None => Err(Error::Unexpected(status)),
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test::FakeServer, Draft, Field};
    use axum::http::StatusCode;

    #[test_log::test(tokio::test)]
    async fn posts_json() {
        let server = FakeServer::replying(StatusCode::OK, r#"{"message": "OK"}"#);
        let client = Client::new(server.start().await);
        let draft = Draft::new();

        let resp = client
            .register(&reqwest::Client::new(), &register::Req::from(&draft))
            .await
            .unwrap();

        assert_eq!(resp.message, "OK");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(requests[0].body["birth_date"], "");
    }

    #[test_log::test(tokio::test)]
    async fn success_without_message() {
        let server = FakeServer::replying(StatusCode::CREATED, "created");
        let client = Client::new(server.start().await);

        let resp = client
            .register(&reqwest::Client::new(), &register::Req::from(&Draft::new()))
            .await
            .unwrap();

        assert_eq!(resp.message, "");
    }

    #[test_log::test(tokio::test)]
    async fn validation_errors() {
        let server = FakeServer::replying(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "The given data was invalid.", "errors": {"email": ["Invalid email"]}}"#,
        );
        let client = Client::new(server.start().await);

        let err = client
            .register(&reqwest::Client::new(), &register::Req::from(&Draft::new()))
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.first(Field::Email), Some("Invalid email"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn server_error_without_map() {
        let server = FakeServer::replying(StatusCode::INTERNAL_SERVER_ERROR, "<h1>oops</h1>");
        let client = Client::new(server.start().await);

        let err = client
            .register(&reqwest::Client::new(), &register::Req::from(&Draft::new()))
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Unexpected(StatusCode::INTERNAL_SERVER_ERROR)),
            "{err:?}"
        );
    }

    #[test_log::test(tokio::test)]
    async fn bad_server_url() {
        let client = Client::new("not a url".to_string());

        let err = client
            .register(&reqwest::Client::new(), &register::Req::from(&Draft::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UrlParse(_)), "{err:?}");
    }
}
