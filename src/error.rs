// Error types for IntSar-xform

/// Precondition violations reported by the fallible (`try_*`) entry points.
///
/// The unchecked entry points treat the same conditions as programmer errors:
/// they `debug_assert!` and otherwise let inf/NaN propagate.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InverseError {
    /// `|det|` at or below `InverseConfig::singular_epsilon`, or a determinant
    /// that overflowed to inf (or went NaN) while being computed.
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    #[error("output buffer aliases the input buffer")]
    AliasedBuffers,

    #[error("buffer at {address:#x} is not 32-byte aligned")]
    MisalignedBuffer { address: usize },

    #[error("null matrix buffer")]
    NullBuffer,

    #[error("row index {index} out of range")]
    RowOutOfRange { index: usize },
}

pub type Result<T> = std::result::Result<T, InverseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_error_display() {
        let err = InverseError::SingularMatrix { determinant: 0.0 };
        assert_eq!(err.to_string(), "matrix is singular (determinant 0)");

        let err = InverseError::AliasedBuffers;
        assert_eq!(err.to_string(), "output buffer aliases the input buffer");

        let err = InverseError::MisalignedBuffer { address: 0x1004 };
        assert_eq!(err.to_string(), "buffer at 0x1004 is not 32-byte aligned");

        let err = InverseError::NullBuffer;
        assert_eq!(err.to_string(), "null matrix buffer");

        let err = InverseError::RowOutOfRange { index: 4 };
        assert_eq!(err.to_string(), "row index 4 out of range");
    }
}
