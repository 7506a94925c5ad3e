use crate::migrations::Direction;
use thiserror::Error;

pub mod context;

pub type Result<T> = std::result::Result<T, Error>;

// Re-export context helpers
pub use context::ErrorContext;

/// Main error type for the migration source
#[derive(Error, Debug)]
pub enum Error {
    #[error("Migration not found: {0}")]
    NotFound(String),

    // Index construction errors
    #[error("Invalid migration version in '{entry}': {reason}")]
    InvalidVersion { entry: String, reason: String },

    #[error("Duplicate migration version {version}: '{entry}' conflicts with '{existing}'")]
    DuplicateVersion {
        version: u64,
        entry: String,
        existing: String,
    },

    #[error("Duplicate {direction} migration for version {version}: '{entry}' conflicts with '{existing}'")]
    DuplicateMigration {
        version: u64,
        direction: Direction,
        entry: String,
        existing: String,
    },

    #[error("Migration root '{root}' cannot be listed: {source}")]
    RootUnavailable {
        root: String,
        #[source]
        source: std::io::Error,
    },

    // Location and wiring errors
    #[error("Invalid source location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("No migration source registered for scheme '{0}'")]
    UnknownScheme(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Error with context chain
    #[error("{message}")]
    WithContext {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_version(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    pub fn root_unavailable(root: impl Into<String>, source: std::io::Error) -> Self {
        Self::RootUnavailable {
            root: root.into(),
            source,
        }
    }

    pub fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    // Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            message: context.into(),
            source: Box::new(self),
        }
    }

    /// True when the error only signals the end of the chain or a missing
    /// script in the requested direction.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// True for errors that abort building the migration index
    pub fn is_construction_error(&self) -> bool {
        match self {
            Error::InvalidVersion { .. }
            | Error::DuplicateVersion { .. }
            | Error::DuplicateMigration { .. }
            | Error::RootUnavailable { .. } => true,
            Error::WithContext { source, .. } => source.is_construction_error(),
            _ => false,
        }
    }

    /// Get a stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "E_NOT_FOUND",
            Error::InvalidVersion { .. } => "E_INVALID_VERSION",
            Error::DuplicateVersion { .. } => "E_DUPLICATE_VERSION",
            Error::DuplicateMigration { .. } => "E_DUPLICATE_MIGRATION",
            Error::RootUnavailable { .. } => "E_ROOT_UNAVAILABLE",
            Error::InvalidLocation { .. } => "E_INVALID_LOCATION",
            Error::UnknownScheme(_) => "E_UNKNOWN_SCHEME",
            Error::Configuration(_) => "E_CONFIGURATION",
            #[cfg(feature = "config")]
            Error::Toml(_) => "E_TOML",
            Error::Io(_) => "E_IO",
            Error::WithContext { source, .. } => source.error_code(),
        }
    }
}
