//! Error types for the scaffolding core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the template and manifest operations
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Template directory not found: {}", path.display())]
    TemplateDirectoryNotFound { path: PathBuf },

    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed, but its shape is not a `package.json` object
    #[error("Invalid manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to parse template manifest {}: {source}", path.display())]
    TemplateManifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
