//! Error types for the backend subsystem.
//!
//! Each error variant carries a stable error code (SCREAMING_SNAKE_CASE)
//! that is included in the Display output and accessible via
//! [`BackendError::code()`]. Codes are part of the public API contract and
//! will not change.

/// Stable error codes for programmatic error handling.
///
/// Use these for distinguishing errors rather than parsing Display output.
pub mod error_codes {
    /// Invalid or missing backend configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Authentication failed (invalid/missing API key).
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// Network or transport failure reaching the backend.
    pub const TRANSPORT_FAILED: &str = "TRANSPORT_FAILED";

    /// The attempt exceeded its wall-clock timeout.
    pub const TIMEOUT_EXCEEDED: &str = "TIMEOUT_EXCEEDED";

    /// Generated content failed safety validation.
    pub const SAFETY_REJECTED: &str = "SAFETY_REJECTED";

    /// Backend returned an unusable or empty response body.
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

    /// Backend-specific error not covered by other variants.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
}

/// Errors produced by backend attempts.
///
/// Every variant counts as a failure against the backend's circuit
/// breaker; [`is_transient`](BackendError::is_transient) only affects how
/// the failure is logged and whether retrying later is plausible.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Invalid or missing backend configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    /// Authentication failed (invalid/missing API key).
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    Auth(String),

    /// Network or transport failure reaching the backend.
    #[error("[{}] {}", error_codes::TRANSPORT_FAILED, .0)]
    Transport(String),

    /// The attempt exceeded its wall-clock timeout.
    #[error("[{}] {}", error_codes::TIMEOUT_EXCEEDED, .0)]
    Timeout(String),

    /// Generated content failed safety validation.
    #[error("[{}] {}", error_codes::SAFETY_REJECTED, .0)]
    SafetyRejected(String),

    /// Backend returned an unusable or empty response body.
    #[error("[{}] {}", error_codes::INVALID_RESPONSE, .0)]
    InvalidResponse(String),

    /// Backend-specific error not covered by other variants.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    Provider(String),
}

impl BackendError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Auth(_) => error_codes::AUTH_FAILED,
            Self::Transport(_) => error_codes::TRANSPORT_FAILED,
            Self::Timeout(_) => error_codes::TIMEOUT_EXCEEDED,
            Self::SafetyRejected(_) => error_codes::SAFETY_REJECTED,
            Self::InvalidResponse(_) => error_codes::INVALID_RESPONSE,
            Self::Provider(_) => error_codes::PROVIDER_ERROR,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m)
            | Self::Auth(m)
            | Self::Transport(m)
            | Self::Timeout(m)
            | Self::SafetyRejected(m)
            | Self::InvalidResponse(m)
            | Self::Provider(m) => m,
        }
    }

    /// Returns true if this failure is plausibly transient (network,
    /// timeout, rate limit, server error) rather than structural (bad
    /// config, bad credentials, policy rejection).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Config(_) | Self::Auth(_) | Self::SafetyRejected(_) => false,
            Self::Transport(_) | Self::Timeout(_) | Self::Provider(_) => true,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Convenience alias for backend results.
pub type Result<T> = std::result::Result<T, BackendError>;
