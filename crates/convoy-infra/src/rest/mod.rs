//! REST clients for the managed backend.
//!
//! The store (PostgREST-style, under `/rest/v1`) and the identity provider
//! (GoTrue-style, under `/auth/v1`) share one base URL and one credential,
//! which is sent both as the `apikey` header and as a bearer token.

pub mod conversations;
pub mod identity;

use std::time::Duration;

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

pub use conversations::{RestConnector, RestConversationStore};
pub use identity::RestIdentityProvider;

/// Upper bound on how much of an error body is kept for logs.
const ERROR_BODY_LIMIT: usize = 512;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

fn build_client(request_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .user_agent(concat!("convoy/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn with_credential(builder: RequestBuilder, key: &SecretString) -> RequestBuilder {
    builder
        .header("apikey", key.expose_secret())
        .bearer_auth(key.expose_secret())
}

fn truncate_body(mut body: String) -> String {
    if body.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}
