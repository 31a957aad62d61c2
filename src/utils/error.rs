use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Errors that can only come from bad inputs or settings and abort startup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Io(_) | AppError::Parse(_) | AppError::Configuration(_)
        )
    }

    /// Map a filesystem error on `path`, keeping missing files distinct.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("{}", path.display()))
        } else {
            AppError::Io(format!("{}: {}", path.display(), err))
        }
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Connectivity(msg) => {
            eprintln!("🌐 {}", OutputStyle::error(&format!("Connectivity: {}", msg)));
        }
        AppError::Unexpected(msg) => {
            eprintln!("⚠️  {}", OutputStyle::warning(msg));
        }
        other => {
            eprintln!("❌ {}", OutputStyle::error(&other.to_string()));
        }
    }
}
