//! Typed errors for validation, file output, and backend failures.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Failure modes of a render call.
///
/// Validation errors are raised before any drawing occurs; no output
/// file is produced on a validation failure. I/O and backend errors
/// propagate unmodified.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Input validation failed (shape mismatch, bad label array,
    /// legend name count mismatch).
    #[error("{0}")]
    InvalidArgument(String),

    /// The output directory or file could not be created or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The PDF backend failed while rendering.
    #[error("pdf backend error: {0}")]
    Backend(String),
}

impl PlotError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlotError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_displays_message_verbatim() {
        let err = PlotError::invalid("group must not None when series is not None.");
        assert_eq!(
            err.to_string(),
            "group must not None when series is not None."
        );
    }

    #[test]
    fn io_errors_pass_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PlotError = io.into();
        assert!(matches!(err, PlotError::Io(_)));
    }
}
