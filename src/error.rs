//! Error types for the engine pipeline.

/// Top-level error type for the classification and orchestration engine.
///
/// Individual backend failures never surface here — the orchestrator
/// recovers them locally. The only failure a caller can observe from a
/// processed request is [`EngineError::Exhausted`], which the template
/// floor makes unreachable in a correctly configured engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or oversized input that could not be clamped.
    #[error("input error: {0}")]
    Input(String),

    /// Crisis detector failure. Callers degrade this to elevated severity.
    #[error("crisis detector error: {0}")]
    Detector(String),

    /// Every backend in the fallback chain failed, including the template
    /// floor. Treated as a fatal configuration defect.
    #[error("all backends exhausted: {0}")]
    Exhausted(String),

    /// Configuration load, parse, or validation error.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EngineError>;
