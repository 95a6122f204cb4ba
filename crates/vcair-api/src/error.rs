use thiserror::Error;

/// Top-level error type for the `vcair-api` crate.
///
/// Covers every failure mode of an edge gateway operation: transport,
/// remote API rejections, XML encoding/decoding, and the gateway-level
/// refresh/submit phases. The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote API ──────────────────────────────────────────────────
    /// Non-2xx response. `message` comes from the vCloud `<Error>` body
    /// when one is present, otherwise from a preview of the raw body.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// The vCloud `minorErrorCode` (e.g. `BAD_REQUEST`, `ACCESS_TO_RESOURCE_IS_FORBIDDEN`).
        code: Option<String>,
    },

    // ── Documents ───────────────────────────────────────────────────
    /// An outbound document could not be encoded as XML.
    #[error("XML serialization error: {message}")]
    Serialization { message: String },

    /// XML deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Edge gateway ────────────────────────────────────────────────
    /// The in-memory resource has no canonical address to refresh from.
    #[error("cannot refresh, object is empty (no href)")]
    MissingHref,

    /// Re-fetching the gateway failed; the operation was aborted.
    #[error("error retrieving edge gateway: {source}")]
    Refresh {
        #[source]
        source: Box<Error>,
    },

    /// A named gateway component does not exist.
    #[error("{kind} '{name}' not found on edge gateway")]
    NotFound { kind: &'static str, name: String },

    /// Caller-supplied input was rejected before any request was sent.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Submitting a reconfiguration to the gateway failed.
    #[error("error reconfiguring edge gateway ({operation}): {source}")]
    Submission {
        operation: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// The submission was accepted but its task document could not be read.
    #[error("error decoding task response: {source}")]
    TaskDecode {
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns `true` if this is a "not found" error, either a missing
    /// gateway component or an HTTP 404 from the API.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Refresh { source } | Self::Submission { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying by the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502..=504),
            Self::Refresh { source } | Self::Submission { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// Returns `true` if the API rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api { status: 401, .. } => true,
            Self::Refresh { source } | Self::Submission { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }

    /// Extract the vCloud minor error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            Self::Refresh { source } | Self::Submission { source, .. } => source.api_error_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> Error {
        Error::Api {
            status,
            message: "boom".into(),
            code: Some("BAD_REQUEST".into()),
        }
    }

    #[test]
    fn not_found_sees_through_wrappers() {
        let err = Error::Refresh {
            source: Box::new(api(404)),
        };
        assert!(err.is_not_found());
        assert!(
            Error::NotFound {
                kind: "gateway interface",
                name: "internet".into()
            }
            .is_not_found()
        );
        assert!(!api(500).is_not_found());
    }

    #[test]
    fn gateway_errors_are_transient() {
        let err = Error::Submission {
            operation: "configureServices",
            source: Box::new(api(503)),
        };
        assert!(err.is_transient());
        assert!(!api(400).is_transient());
    }

    #[test]
    fn api_code_is_exposed_through_submission() {
        let err = Error::Submission {
            operation: "configureServices",
            source: Box::new(api(400)),
        };
        assert_eq!(err.api_error_code(), Some("BAD_REQUEST"));
        assert!(err.to_string().contains("configureServices"));
    }
}
