//! Error type for input validation and export

/// Result alias for fallible furshell operations
pub type FurResult<T> = Result<T, FurError>;

/// Validation and export errors
///
/// Builders never return these: they take already-validated inputs and
/// treat contract violations as programming errors.
#[derive(Debug, thiserror::Error)]
pub enum FurError {
    /// Mesh has no vertices or no indices
    #[error("mesh has no vertices or no indices")]
    EmptyMesh,

    /// Index list length is not a multiple of 3
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    /// Triangle references a vertex that does not exist
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Layer count below 1
    #[error("invalid layer count {0} (must be at least 1)")]
    InvalidLayerCount(u32),

    /// Negative or non-finite strand length
    #[error("invalid strand length {0} (must be finite and non-negative)")]
    NegativeLength(f32),

    /// Density outside [0, 1]
    #[error("invalid strand density {0} (must be within 0.0..=1.0)")]
    InvalidDensity(f32),

    /// Zero-sized texture
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
