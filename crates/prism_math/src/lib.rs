//! # prism_math
//!
//! Math core for the prism rendering engine: fixed-size vector types over
//! `f32`/`u32`/`f64` scalars, 4×4 homogeneous matrix builders (translate,
//! rotate, scale, look-at, perspective, orthographic), and the cached
//! [`Transformation`] component that lazily rebuilds an entity's model
//! matrix.
//!
//! Everything here is a synchronous, bounded-time value computation. Domain
//! violations (zero-length normalize, degenerate look-at bases) fail fast
//! with [`MathError`] instead of leaking NaN into the frame; the projection
//! builders are the documented exception and tolerate degenerate parameters
//! by propagating non-finite values.

pub mod error;
pub mod matrix;
pub mod scalar;
pub mod transform;
pub mod vector;

pub use error::MathError;
pub use matrix::Mat4;
pub use scalar::{Scalar, clamp};
pub use transform::Transformation;
pub use vector::{
    Vector2, Vector2d, Vector2f, Vector2i, Vector3, Vector3f, Vector3i, Vector4, Vector4f,
    surface_normal,
};
