//! Math-layer error types.

/// Errors produced by vector and matrix operations.
///
/// The math layer fails fast on domain violations instead of letting NaN or
/// Inf leak into downstream matrices. The one deliberate exception is the
/// projection builders, which tolerate degenerate parameters by contract —
/// see [`Mat4::perspective_rh`](crate::Mat4::perspective_rh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// An operation that divides by a vector's length was given a
    /// zero-length vector.
    #[error("{op}: zero-length vector")]
    ZeroLength {
        /// The operation that was attempted (e.g. `"normalize"`).
        op: &'static str,
    },

    /// A slice had the wrong number of components for the target vector type.
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// Number of components the target type requires.
        expected: usize,
        /// Number of components actually supplied.
        actual: usize,
    },
}
