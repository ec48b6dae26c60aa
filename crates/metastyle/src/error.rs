//! Error types for stylesheet loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::style::ColorError;

/// Errors that can occur when loading a meta-style sheet.
#[derive(Debug, Error)]
pub enum StylesheetError {
    /// The document is not valid YAML.
    #[error("failed to parse stylesheet: {message}")]
    Parse { message: String },

    /// The stylesheet file could not be read.
    #[error("failed to read stylesheet {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A colour value could not be parsed.
    #[error("invalid color in '{bundle}.{slot}': {source}")]
    InvalidColor {
        bundle: String,
        slot: String,
        #[source]
        source: ColorError,
    },

    /// A key that is not part of the format.
    #[error("unknown attribute '{attribute}' in '{bundle}'")]
    UnknownAttribute { bundle: String, attribute: String },

    /// A structurally invalid definition.
    #[error("invalid definition for '{bundle}': {message}")]
    InvalidDefinition { bundle: String, message: String },

    /// An alias names a bundle that does not exist.
    #[error("bundle '{from}' aliases non-existent bundle '{to}'")]
    UnresolvedAlias { from: String, to: String },

    /// Aliases form a loop.
    #[error("cycle detected in bundle aliases: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },
}

/// Result type for stylesheet operations.
pub type Result<T> = std::result::Result<T, StylesheetError>;
