use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all ape operations outside the ordering core.
#[derive(Debug, Error, Diagnostic)]
pub enum ApeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file the operation depends on does not exist.
    #[error("File does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A JSON document (feature_order.json, product_spec.json) could not be parsed.
    #[error("Invalid JSON in {}: {source}", path.display())]
    #[diagnostic(help("Check the file for syntax errors"))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A FeatureIDE model.xml could not be parsed.
    #[error("Invalid feature model: {message}")]
    Xml { message: String },

    /// A required environment variable is missing.
    #[error("Environment incomplete: {variable} is not set")]
    #[diagnostic(help("Activate your ape environment before running this command"))]
    EnvironmentIncomplete { variable: String },

    /// The named container does not exist below the ape root.
    #[error("No such container: {name}")]
    ContainerNotFound { name: String },

    /// The named product does not exist in its container.
    #[error("No such product: {name}")]
    ProductNotFound { name: String },

    /// A feature referenced by a constraint is missing from the feature list.
    #[error("Feature not found: {name}")]
    FeatureNotFound { name: String },

    /// A product of interest could not be parsed.
    #[error("Unable to parse product of interest '{poi}'")]
    #[diagnostic(help("Use the format <container_name>:<product_name>"))]
    InvalidPoi { poi: String },

    /// Validation found violations.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ApeResult<T> = miette::Result<T>;
