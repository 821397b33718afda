//! Startup and runtime errors.  Every one of them is fatal.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Terminal or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An asset could not be opened or decoded
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An asset decoded to zero pixels
    #[error("image {0} has no pixels")]
    EmptyTexture(PathBuf),

    /// Unreadable or inconsistent settings
    #[error("configuration error: {0}")]
    Config(String),

    /// The terminal cannot hold a single cell of canvas
    #[error("surface too small: {width}x{height}")]
    SurfaceTooSmall { width: u16, height: u16 },
}

pub type Result<T> = std::result::Result<T, GameError>;
