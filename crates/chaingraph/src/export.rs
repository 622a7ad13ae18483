//! Export of built chains: DOT text and rendered images.
//!
//! # Pipeline Position
//!
//! ```text
//! XML document
//!     ↓ parse
//! Chain records
//!     ↓ structure
//! Chain graphs
//!     ↓ export (this module)
//! <name>.dot + <name>.<format>
//! ```
//!
//! # Available Backends
//!
//! - [`dot`] - DOT text via [`dot::DotExporter`]
//! - [`render`] - external image rendering via [`render::Renderer`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`ChaingraphError::Export`] at the crate boundary.
//!
//! [`ChaingraphError::Export`]: crate::ChaingraphError::Export

pub mod dot;
pub mod render;

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Errors that can occur while writing artifacts or rendering images.
#[derive(Debug, Error)]
pub enum Error {
    /// An artifact could not be written.
    #[error("failed to write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The renderer executable does not exist.
    #[error("renderer `{program}` was not found, install Graphviz or set `render.command`")]
    ToolNotFound { program: String },

    /// The renderer could not be started for another reason.
    #[error("failed to run renderer `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    /// The renderer ran and reported failure.
    #[error("renderer `{program}` failed with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
