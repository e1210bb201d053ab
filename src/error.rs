use thiserror::Error;

/// Failures raised by the calendar and scoring engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed birth date/time or an out-of-range calendar field.
    #[error("invalid input: {0}")]
    Validation(String),
    /// The catalog collaborator failed or returned nothing.
    #[error("category catalog unavailable: {0}")]
    CatalogUnavailable(String),
    /// A closed-enumeration or numeric invariant did not hold.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable(message.into())
    }
}

/// Error surfaced by the `saju` binary, carrying its process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let exit_code = match err {
            EngineError::Validation(_) => 2,
            EngineError::CatalogUnavailable(_) => 3,
            EngineError::InvariantViolation(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Report a broken invariant: loud in debug builds, logged in release builds.
///
/// Callers substitute a neutral value after this returns.
pub(crate) fn invariant_violation(message: &str) {
    debug_assert!(false, "internal invariant violated: {message}");
    tracing::error!(%message, "internal invariant violated; substituting neutral value");
}
