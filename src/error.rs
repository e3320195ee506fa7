use thiserror::Error;

/// Status code used when the underlying failure carries no OS error code.
pub const STATUS_GENERIC: u32 = 0x1;

/// Errors surfaced by probing and streaming operations.
///
/// Every failure of the underlying media pipeline is mapped to exactly one of
/// these four categories before it reaches the caller. Messages embed the
/// originating status code in hexadecimal for diagnosis.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported audio format: {message} (0x{status:X})")]
    UnsupportedFormat { message: String, status: u32 },

    #[error("I/O error: {message} (0x{status:X})")]
    Io { message: String, status: u32 },

    #[error("Invalid argument: {message} (0x{status:X})")]
    InvalidArgument { message: String, status: u32 },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl MediaError {
    pub fn unsupported(message: impl Into<String>, status: u32) -> Self {
        MediaError::UnsupportedFormat {
            message: message.into(),
            status,
        }
    }

    pub fn io(message: impl Into<String>, status: u32) -> Self {
        MediaError::Io {
            message: message.into(),
            status,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        MediaError::InvalidArgument {
            message: message.into(),
            status: STATUS_GENERIC,
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        MediaError::FileNotFound { path: path.into() }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            MediaError::UnsupportedFormat { message, .. } => {
                format!("The audio resource cannot be decoded: {}", message)
            }
            MediaError::Io { message, .. } => {
                format!("The audio stream failed: {}", message)
            }
            MediaError::InvalidArgument { message, .. } => {
                format!("Invalid parameter: {}", message)
            }
            MediaError::FileNotFound { path } => {
                format!("No audio resource exists at '{}'", path)
            }
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MediaError::UnsupportedFormat { .. } => ErrorSeverity::Warning,
            MediaError::Io { .. } => ErrorSeverity::Error,
            MediaError::InvalidArgument { .. } => ErrorSeverity::Warning,
            MediaError::FileNotFound { .. } => ErrorSeverity::Error,
        }
    }
}

impl From<MediaError> for std::io::Error {
    fn from(err: MediaError) -> Self {
        let kind = match &err {
            MediaError::FileNotFound { .. } => std::io::ErrorKind::NotFound,
            MediaError::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}

/// Error severity levels for logging and user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "INFO",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }

    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
            ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Extract a status code from an I/O error, falling back to the generic code.
pub(crate) fn io_status(err: &std::io::Error) -> u32 {
    err.raw_os_error().map(|c| c as u32).unwrap_or(STATUS_GENERIC)
}
