//! Backend subsystem — adapters, health tracking, and safety validation.
//!
//! Everything the orchestrator needs to call response-producing backends:
//!
//! - [`adapter`] — the single [`BackendAdapter`] trait all backends satisfy
//! - [`error`] — [`BackendError`] with stable error codes
//! - [`template`] — the always-available rule-based backend
//! - [`remote`] — chat-completions-compatible HTTP backend
//! - [`health`] — per-backend circuit breakers and health snapshots
//! - [`safety`] — validation of externally generated candidates

pub mod adapter;
pub mod error;
pub mod health;
pub mod remote;
pub mod safety;
pub mod template;

pub use adapter::{BackendAdapter, BackendKind, GenerationPrompt};
pub use error::BackendError;
pub use health::{AcquireDecision, BackendHealth, BreakerRegistry, CircuitState};
pub use remote::{RemoteBackend, RemoteBackendConfig};
pub use safety::{AllowAllPolicy, BlocklistPolicy, ContentPolicy, SafetyValidator};
pub use template::{TemplateBackend, TEMPLATE_BACKEND_ID};
