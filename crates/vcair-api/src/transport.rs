// Shared transport configuration for building reqwest::Client instances.
//
// Carries TLS, timeout, API version and the pre-issued session token so the
// gateway client never has to know how the session was established.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the vCloud session token on every request.
pub const AUTH_HEADER: &str = "x-vcloud-authorization";

/// API version negotiated on ordinary reads and configuration submissions.
pub const DEFAULT_API_VERSION: &str = "5.6";

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (lab installs with self-signed endpoints).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub api_version: String,
    pub auth_token: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            api_version: DEFAULT_API_VERSION.into(),
            auth_token: None,
        }
    }
}

impl TransportConfig {
    /// Attach a session token, sent as `x-vcloud-authorization`.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// The default `Accept` value: any vCloud XML media type at `api_version`.
    pub fn accept_header(&self) -> String {
        format!("application/*+xml;version={}", self.api_version)
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("vcair/", env!("CARGO_PKG_VERSION")))
            .default_headers(self.default_headers()?);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        let accept = HeaderValue::from_str(&self.accept_header())
            .map_err(|e| Error::Tls(format!("invalid api_version: {e}")))?;
        headers.insert(ACCEPT, accept);

        if let Some(ref token) = self.auth_token {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|e| Error::Tls(format!("invalid session token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTH_HEADER, value);
        }

        Ok(headers)
    }
}
