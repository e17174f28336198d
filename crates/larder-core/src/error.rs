use std::{io, sync::PoisonError};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(larder_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(larder_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(larder_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("IO error: {0}")]
    #[diagnostic(code(larder_config::io))]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Diagnostic, Debug)]
pub enum LarderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(larder::invalid_argument))]
    InvalidArgument(String),

    #[error("Invalid path")]
    #[diagnostic(
        code(larder::invalid_path),
        help("Provide a non-empty file or directory path")
    )]
    InvalidPath,

    #[error("Failed to open database at {path}: {source}")]
    #[diagnostic(
        code(larder::database_open),
        help("Check that the parent directory exists and is writable")
    )]
    OpenFailed {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQLite database error: {0}")]
    #[diagnostic(code(larder::database))]
    Database(#[from] rusqlite::Error),

    #[error("Package {0} not found")]
    #[diagnostic(
        code(larder::package_not_found),
        help("Use 'larder search' to list the packages the registry knows about")
    )]
    PackageNotFound(String),

    #[error("Package {0} already exists")]
    #[diagnostic(
        code(larder::package_exists),
        help("Use 'larder update' to modify the existing record")
    )]
    PackageExists(String),

    #[error("{action}: {source}")]
    #[diagnostic(code(larder::io))]
    IoError {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("Environment variable error: {0}")]
    #[diagnostic(code(larder::env_var))]
    VarError(#[from] std::env::VarError),

    #[error("Lock poisoned")]
    #[diagnostic(code(larder::poisoned_lock))]
    PoisonError,

    #[error("{0}")]
    #[diagnostic(code(larder::custom))]
    Custom(String),
}

impl<T> From<PoisonError<T>> for LarderError {
    fn from(_: PoisonError<T>) -> Self {
        Self::PoisonError
    }
}

pub trait ErrorContext<T> {
    fn with_context<F>(self, context: F) -> Result<T, LarderError>
    where
        F: FnOnce() -> String;
}

impl<T> ErrorContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, context: F) -> Result<T, LarderError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| LarderError::IoError {
            action: context(),
            source: err,
        })
    }
}
