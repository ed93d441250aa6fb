//! Crate-wide error type.

use std::fmt;

/// Everything that can go wrong outside the per-polygon pipeline.
///
/// Degenerate geometry inside a frame is never an error; the affected
/// primitive is skipped where it is found.
#[derive(Debug)]
pub enum RenderError {
    /// File I/O error
    Io(std::io::Error),
    /// Texture decode or image export failure
    Image(image::ImageError),
    /// Malformed RON configuration
    Config(ron::error::SpannedError),
    /// OBJ import failure
    Obj(tobj::LoadError),
    /// Malformed scene asset line (1-based line number)
    Parse { line: usize, message: String },
    /// A camera kind name that is neither `euler` nor `uvn`
    UnknownCameraKind(String),
    /// A polygon refers to a vertex the object does not have
    InvalidVertexIndex { index: usize, count: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "I/O error: {}", e),
            RenderError::Image(e) => write!(f, "Image error: {}", e),
            RenderError::Config(e) => write!(f, "Config error: {}", e),
            RenderError::Obj(e) => write!(f, "OBJ error: {}", e),
            RenderError::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            RenderError::UnknownCameraKind(kind) => write!(f, "Unknown camera kind: {:?}", kind),
            RenderError::InvalidVertexIndex { index, count } => write!(
                f,
                "Vertex index {} out of range for object with {} vertices",
                index, count
            ),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::Image(e) => Some(e),
            RenderError::Config(e) => Some(e),
            RenderError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<ron::error::SpannedError> for RenderError {
    fn from(e: ron::error::SpannedError) -> Self {
        RenderError::Config(e)
    }
}

impl From<tobj::LoadError> for RenderError {
    fn from(e: tobj::LoadError) -> Self {
        RenderError::Obj(e)
    }
}
