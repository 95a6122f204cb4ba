//! CLI error types with miette diagnostics.
//!
//! Maps `vcair_api::Error` and `vcair_config::ConfigError` into user-facing
//! errors with actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use vcair_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(vcair::connection_failed),
        help(
            "Check that the vCloud endpoint is reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(vcair::tls_error),
        help(
            "Use --insecure (-k) to accept self-signed certificates,\n\
             or configure ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The session token was rejected: {message}")]
    #[diagnostic(
        code(vcair::auth_failed),
        help(
            "vCloud session tokens expire. Log in again and pass the new\n\
             x-vcloud-authorization value with --token or VCAIR_TOKEN."
        )
    )]
    AuthFailed { message: String },

    #[error("No session token configured for profile '{profile}'")]
    #[diagnostic(
        code(vcair::no_credentials),
        help(
            "Pass --token, set VCAIR_TOKEN, or set token_env in the profile.\n\
             Configure a profile with: vcair config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vcair::not_found),
        help("Run: vcair {list_command} to see what the gateway has")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}{}): {message}", .code.as_deref().map(|c| format!(", {c}")).unwrap_or_default())]
    #[diagnostic(code(vcair::api_error))]
    ApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("{context}")]
    #[diagnostic(code(vcair::protocol))]
    Protocol {
        context: String,
        #[source]
        source: vcair_api::Error,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vcair::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid XML in {path}")]
    #[diagnostic(
        code(vcair::xml),
        help(
            "Expected an <EdgeGatewayServiceConfiguration> document.\n\
             Start from: vcair firewall export > services.xml"
        )
    )]
    InvalidXml {
        path: String,
        #[source]
        source: vcair_api::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vcair::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vcair config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No edge gateway configured")]
    #[diagnostic(
        code(vcair::no_config),
        help(
            "Pass --gateway, or create a profile with: vcair config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(vcair::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vcair::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(vcair::timeout),
        help("Increase timeout with --timeout or check the endpoint's responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(vcair::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::InvalidXml { .. }
            | Self::NoConfig { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── vcair_api::Error → CliError mapping ──────────────────────────────

impl From<vcair_api::Error> for CliError {
    fn from(err: vcair_api::Error) -> Self {
        use vcair_api::Error as E;

        // Phase wrappers carry the useful cause; unwrap the transport and
        // auth cases so they get their own exit codes.
        let inner = match &err {
            E::Refresh { source } | E::Submission { source, .. } | E::TaskDecode { source } => {
                Some(source.as_ref())
            }
            _ => None,
        };

        match inner.unwrap_or(&err) {
            E::Transport(e) if e.is_timeout() => return Self::Timeout,
            E::Transport(e) if e.is_connect() => {
                return Self::ConnectionFailed {
                    url: e.url().map(ToString::to_string).unwrap_or_default(),
                    source: err.to_string().into(),
                };
            }
            E::Api {
                status: 401 | 403,
                message,
                ..
            } => {
                return Self::AuthFailed {
                    message: message.clone(),
                };
            }
            _ => {}
        }

        match err {
            E::NotFound { kind, name } => Self::NotFound {
                resource_type: kind.into(),
                identifier: name,
                list_command: "gateway interfaces".into(),
            },
            E::InvalidArgument { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },
            E::Tls(reason) => Self::TlsError { reason },
            E::Api {
                status,
                message,
                code,
            } => Self::ApiError {
                status,
                code,
                message,
            },
            other => Self::Protocol {
                context: other.to_string(),
                source: other,
            },
        }
    }
}
