use std::fmt;

/// Failure to map a point back through the view transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformError {
    /// The forward matrix has no inverse (a zero or vanishing zoom factor was
    /// folded in).
    Singular { determinant: f32 },
    /// The inverse exists but mapping the point produced NaN or infinity.
    NonFinite,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Singular { determinant } => {
                write!(f, "view transform is singular (determinant {determinant})")
            }
            TransformError::NonFinite => f.write_str("inverse mapping produced a non-finite point"),
        }
    }
}

impl std::error::Error for TransformError {}
