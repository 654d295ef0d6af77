//! Error types for window setup and resource loading.
//!
//! User actions never fail: invalid requests are ignored by the session.
//! Only the things that touch the OS can go wrong.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    /// The platform event loop could not be created or exited abnormally.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed.
    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),

    /// Pixel surface creation or presentation failed.
    #[error("Surface error: {0}")]
    Surface(#[from] pixels::Error),

    /// A file given on the command line could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font file was read but is not a usable TrueType/OpenType font.
    #[error("Invalid font file: {}", .0.display())]
    InvalidFont(PathBuf),
}
