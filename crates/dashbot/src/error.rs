use thiserror::Error;

use crate::bot::LoopPhase;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Target process exited")]
    ProcessExited,

    #[error("Cannot start control loop from {0} state")]
    InvalidLoopTransition(LoopPhase),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Faults that end the control loop rather than degrading a single read
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ProcessExited | Error::InvalidLoopTransition(_)
        )
    }

    pub(crate) fn read_failed(address: u64, message: impl Into<String>) -> Self {
        Error::MemoryReadFailed {
            address,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_read_failure_is_not_fatal() {
        assert!(!Error::read_failed(0x10, "unmapped").is_fatal());
        assert!(Error::ProcessExited.is_fatal());
        assert!(Error::InvalidLoopTransition(LoopPhase::Stopped).is_fatal());
    }

    #[test]
    fn test_read_failure_display() {
        let err = Error::read_failed(0x5000, "unmapped");
        assert_eq!(
            err.to_string(),
            "Failed to read process memory at address 0x5000: unmapped"
        );
    }
}
