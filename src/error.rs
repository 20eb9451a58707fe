//! Error type shared by surfaces, masks and configuration

/// Error type for raster operations
#[derive(Debug, Clone, PartialEq)]
pub enum BlitError {
    /// A color was given with an unsupported number of channels
    InvalidColorFormat(String),
    /// Mask access outside `[0, width) x [0, height)`
    IndexOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Raw pixel buffer does not match `width * height * 4`
    BufferSize { expected: usize, actual: usize },
    /// Image decode/encode error
    Image(String),
    /// File I/O error
    Io(String),
    /// Config parse/serialize error
    Config(String),
}

pub type Result<T> = std::result::Result<T, BlitError>;

impl std::fmt::Display for BlitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlitError::InvalidColorFormat(msg) => write!(f, "Invalid color format: {}", msg),
            BlitError::IndexOutOfBounds { x, y, width, height } => write!(
                f,
                "Index out of bounds: ({}, {}) in {}x{} mask",
                x, y, width, height
            ),
            BlitError::BufferSize { expected, actual } => write!(
                f,
                "Pixel buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            BlitError::Image(msg) => write!(f, "Image error: {}", msg),
            BlitError::Io(msg) => write!(f, "I/O error: {}", msg),
            BlitError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for BlitError {}

impl From<std::io::Error> for BlitError {
    fn from(e: std::io::Error) -> Self {
        BlitError::Io(e.to_string())
    }
}

impl From<image::ImageError> for BlitError {
    fn from(e: image::ImageError) -> Self {
        BlitError::Image(e.to_string())
    }
}

impl From<ron::error::SpannedError> for BlitError {
    fn from(e: ron::error::SpannedError) -> Self {
        BlitError::Config(e.to_string())
    }
}

impl From<ron::Error> for BlitError {
    fn from(e: ron::Error) -> Self {
        BlitError::Config(e.to_string())
    }
}
