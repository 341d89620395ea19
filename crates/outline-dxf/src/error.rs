//! Error types for the outline/drill to DXF pipeline.
//!
//! The extractors themselves never fail; these errors belong to the layers
//! that validate caller input and touch the filesystem.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the conversion pipeline and its front ends.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Hole diameter bounds are negative or inverted.
    #[error("invalid hole filter: {0}")]
    InvalidFilter(String),

    /// The outline Gerber text was empty.
    #[error("empty outline input")]
    EmptyInput,

    /// No board outline Gerber could be located.
    #[error("no edge-cuts/profile Gerber found in {}", .0.display())]
    NoOutline(PathBuf),

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
