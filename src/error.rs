use thiserror::Error;

/// Errors surfaced by the drawing engine and its boundaries
#[derive(Error, Debug)]
pub enum PaintError {
    /// A snapshot taken from a surface of different dimensions was written back
    #[error("snapshot is {actual:?} but surface is {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while exporting the surface
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type PaintResult<T> = Result<T, PaintError>;
