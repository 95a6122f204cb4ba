// vCloud API HTTP client
//
// Wraps `reqwest::Client` with XML request/response handling: documents are
// encoded through `crate::xml`, shown to the payload observer, sent with
// their media type, and every response is status-checked before decoding.
// Resource handles (edge gateways, tasks) hold a clone of this client.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::observer::{NoopObserver, PayloadObserver};
use crate::transport::TransportConfig;
use crate::types::TaskError;
use crate::xml::{self, XmlDocument, floor_char_boundary};

/// Raw HTTP client for the vCloud API.
///
/// Cheap to clone: the underlying connection pool and the payload observer
/// are shared between clones.
#[derive(Debug, Clone)]
pub struct VcaClient {
    http: reqwest::Client,
    observer: Arc<dyn PayloadObserver>,
}

impl VcaClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// The session token in the config (if any) is sent on every request.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the payload observer.
    pub fn with_observer(mut self, observer: Arc<dyn PayloadObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the XML body.
    pub(crate) async fn get_xml<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let body = check_response(resp).await?;

        xml::decode(&body)
    }

    /// Encode `doc`, send it with its media type, and return the raw
    /// response body once the status has been checked.
    ///
    /// `accept` overrides the client-wide `Accept` header for this request.
    pub(crate) async fn send_xml<D: XmlDocument>(
        &self,
        method: Method,
        url: Url,
        doc: &D,
        accept: Option<&str>,
    ) -> Result<String, Error> {
        let payload = xml::encode(doc)?;
        self.observer.outbound(&method, &url, &payload);

        debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, D::MEDIA_TYPE)
            .body(payload);
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        check_response(resp).await
    }
}

/// Pass the body through on 2xx; otherwise turn the response into
/// `Error::Api`, preferring the message from a vCloud `<Error>` body.
async fn check_response(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if status.is_success() {
        trace!(status = status.as_u16(), len = body.len(), "response ok");
        return Ok(body);
    }

    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &str) -> Error {
    match xml::decode::<TaskError>(body) {
        Ok(err) if !err.message.is_empty() => Error::Api {
            status: status.as_u16(),
            message: err.message,
            code: Some(err.minor_error_code).filter(|c| !c.is_empty()),
        },
        _ => Error::Api {
            status: status.as_u16(),
            message: if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            } else {
                body[..floor_char_boundary(body, 200)].to_owned()
            },
            code: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vcloud_error_body_is_parsed() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error xmlns="http://www.vmware.com/vcloud/v1.5" majorErrorCode="400" message="The NAT rule is invalid." minorErrorCode="BAD_REQUEST"/>"#;

        match api_error(StatusCode::BAD_REQUEST, body) {
            Error::Api {
                status,
                message,
                code,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The NAT rule is invalid.");
                assert_eq!(code.as_deref(), Some("BAD_REQUEST"));
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn plain_body_becomes_preview() {
        match api_error(StatusCode::BAD_GATEWAY, "upstream down") {
            Error::Api { message, code, .. } => {
                assert_eq!(message, "upstream down");
                assert!(code.is_none());
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        match api_error(StatusCode::UNAUTHORIZED, "") {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }
}
