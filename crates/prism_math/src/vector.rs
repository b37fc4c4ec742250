//! Fixed-size vector types.
//!
//! Each vector is a small value type over a [`Scalar`] kind, addressable both
//! by named component (`v.x`) and by position (`v[0]`) — the named fields are
//! the storage, and the index operators map onto the same fields, so the two
//! views can never disagree. Lower-dimension slices (`xy`, `xz`, `yz`) are
//! explicit copies, never views into the parent.
//!
//! Construction always copies the supplied values; a vector never aliases a
//! caller's buffer.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::matrix::Mat4;
use crate::scalar::Scalar;

macro_rules! vector_type {
    (
        $(#[$meta:meta])*
        $Vector:ident, $n:expr, $fmt:literal,
        [$($field:ident / $setter:ident : $idx:tt),+]
    ) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
        #[serde(bound = "")]
        pub struct $Vector<T: Scalar> {
            $(pub $field: T,)+
        }

        impl<T: Scalar> $Vector<T> {
            /// The all-zeros vector.
            pub const ZERO: Self = Self { $($field: T::ZERO,)+ };

            /// The all-ones vector.
            pub const ONE: Self = Self { $($field: T::ONE,)+ };

            /// Number of components.
            pub const DIM: usize = $n;

            /// Create a vector from its components.
            #[must_use]
            pub const fn new($($field: T),+) -> Self {
                Self { $($field),+ }
            }

            /// Copy a vector out of a component slice.
            ///
            /// This is the boundary constructor for raw data coming from the
            /// mesh loader; the slice length must match [`Self::DIM`].
            pub fn try_from_slice(values: &[T]) -> Result<Self, MathError> {
                if values.len() != $n {
                    return Err(MathError::DimensionMismatch {
                        expected: $n,
                        actual: values.len(),
                    });
                }
                Ok(Self { $($field: values[$idx],)+ })
            }

            /// Copy the components into an array.
            #[must_use]
            pub fn to_array(self) -> [T; $n] {
                [$(self.$field),+]
            }

            $(
                #[doc = concat!(
                    "Set the `", stringify!($field),
                    "` component, coercing the value into the vector's scalar kind."
                )]
                pub fn $setter(&mut self, value: f64) {
                    self.$field = T::from_f64(value);
                }
            )+

            /// Dot product.
            #[must_use]
            pub fn dot(self, other: Self) -> T {
                let mut sum = T::ZERO;
                $(sum = sum + self.$field * other.$field;)+
                sum
            }

            /// Euclidean length, `sqrt(sum(v_i^2))`.
            #[must_use]
            pub fn length(self) -> f64 {
                let mut sum = 0.0;
                $(sum += self.$field.to_f64() * self.$field.to_f64();)+
                sum.sqrt()
            }

            /// Return this vector scaled to unit length.
            ///
            /// Fails with [`MathError::ZeroLength`] rather than producing NaN
            /// components when the vector has zero length.
            pub fn normalized(self) -> Result<Self, MathError> {
                let len = self.length();
                if len == 0.0 {
                    return Err(MathError::ZeroLength { op: "normalize" });
                }
                Ok(Self {
                    $($field: T::from_f64(self.$field.to_f64() / len),)+
                })
            }

            /// Normalize this vector in place.
            pub fn normalize_in_place(&mut self) -> Result<(), MathError> {
                *self = self.normalized()?;
                Ok(())
            }

            /// Project this vector onto the plane whose normal is `normal`:
            /// `u − (dot(u,n)/dot(n,n))·n`.
            ///
            /// Fails with [`MathError::ZeroLength`] when `normal` is the zero
            /// vector.
            pub fn projected_onto_plane(self, normal: Self) -> Result<Self, MathError> {
                let bot = normal.dot(normal);
                if bot == T::ZERO {
                    return Err(MathError::ZeroLength { op: "plane projection" });
                }
                let top = self.dot(normal);
                Ok(self - normal * (top / bot))
            }

            /// Sum the given vectors and divide the sum by its own length.
            ///
            /// Note this is NOT the arithmetic mean: the result has unit
            /// magnitude whenever the sum is non-zero. It is the direction of
            /// the mean, which is what the flocking/steering callers want.
            ///
            /// Fails with [`MathError::ZeroLength`] when the sum cancels to
            /// zero (which includes an empty input).
            pub fn sum_direction(vectors: &[Self]) -> Result<Self, MathError> {
                let mut sum = Self::ZERO;
                for v in vectors {
                    sum += *v;
                }
                let len = sum.length();
                if len == 0.0 {
                    return Err(MathError::ZeroLength { op: "sum direction" });
                }
                Ok(sum / T::from_f64(len))
            }
        }

        impl<T: Scalar> Index<usize> for $Vector<T> {
            type Output = T;

            fn index(&self, index: usize) -> &T {
                match index {
                    $($idx => &self.$field,)+
                    _ => panic!("component index {index} out of range for a {}-vector", $n),
                }
            }
        }

        impl<T: Scalar> IndexMut<usize> for $Vector<T> {
            fn index_mut(&mut self, index: usize) -> &mut T {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => panic!("component index {index} out of range for a {}-vector", $n),
                }
            }
        }

        impl<T: Scalar> Add for $Vector<T> {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field,)+ }
            }
        }

        impl<T: Scalar> Add<[T; $n]> for $Vector<T> {
            type Output = Self;

            fn add(self, rhs: [T; $n]) -> Self {
                Self { $($field: self.$field + rhs[$idx],)+ }
            }
        }

        impl<T: Scalar> AddAssign for $Vector<T> {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field = self.$field + rhs.$field;)+
            }
        }

        impl<T: Scalar> Sub for $Vector<T> {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field,)+ }
            }
        }

        impl<T: Scalar> Sub<[T; $n]> for $Vector<T> {
            type Output = Self;

            fn sub(self, rhs: [T; $n]) -> Self {
                Self { $($field: self.$field - rhs[$idx],)+ }
            }
        }

        impl<T: Scalar> SubAssign for $Vector<T> {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field = self.$field - rhs.$field;)+
            }
        }

        impl<T: Scalar> Mul<T> for $Vector<T> {
            type Output = Self;

            fn mul(self, rhs: T) -> Self {
                Self { $($field: self.$field * rhs,)+ }
            }
        }

        impl<T: Scalar> Div<T> for $Vector<T> {
            type Output = Self;

            fn div(self, rhs: T) -> Self {
                Self { $($field: self.$field / rhs,)+ }
            }
        }

        impl<T: Scalar + Neg<Output = T>> Neg for $Vector<T> {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field,)+ }
            }
        }

        impl<T: Scalar> From<[T; $n]> for $Vector<T> {
            fn from(values: [T; $n]) -> Self {
                Self { $($field: values[$idx],)+ }
            }
        }

        impl<T: Scalar> fmt::Display for $Vector<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $fmt, $(self.$field),+)
            }
        }
    };
}

vector_type!(
    /// A 2-component vector.
    Vector2, 2, "({}, {})",
    [x / set_x: 0, y / set_y: 1]
);

vector_type!(
    /// A 3-component vector.
    ///
    /// The workhorse of the engine: positions, rotations (degrees per axis),
    /// scales, and mesh vertex data are all `Vector3<f32>`.
    Vector3, 3, "({}, {}, {})",
    [x / set_x: 0, y / set_y: 1, z / set_z: 2]
);

vector_type!(
    /// A 4-component homogeneous vector.
    ///
    /// The `w` component distinguishes points (`w = 1`, moved by translation)
    /// from directions (`w = 0`, unaffected by it).
    Vector4, 4, "({}, {}, {}, {})",
    [x / set_x: 0, y / set_y: 1, z / set_z: 2, w / set_w: 3]
);

/// 2-component `f32` vector.
pub type Vector2f = Vector2<f32>;
/// 2-component `u32` vector.
pub type Vector2i = Vector2<u32>;
/// 2-component `f64` vector.
pub type Vector2d = Vector2<f64>;
/// 3-component `f32` vector.
pub type Vector3f = Vector3<f32>;
/// 3-component `u32` vector.
pub type Vector3i = Vector3<u32>;
/// 4-component `f32` homogeneous vector.
pub type Vector4f = Vector4<f32>;

impl<T: Scalar> Vector3<T> {
    /// The unit x-axis.
    pub const X_AXIS: Self = Self {
        x: T::ONE,
        y: T::ZERO,
        z: T::ZERO,
    };

    /// The unit y-axis.
    pub const Y_AXIS: Self = Self {
        x: T::ZERO,
        y: T::ONE,
        z: T::ZERO,
    };

    /// The unit z-axis.
    pub const Z_AXIS: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ONE,
    };

    /// Extend a 2-vector with an explicit `z` component.
    #[must_use]
    pub const fn from_xy(v: Vector2<T>, z: T) -> Self {
        Self { x: v.x, y: v.y, z }
    }

    /// Copy of the x and y components as an independent 2-vector.
    #[must_use]
    pub const fn xy(self) -> Vector2<T> {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }

    /// Copy of the x and z components as an independent 2-vector.
    #[must_use]
    pub const fn xz(self) -> Vector2<T> {
        Vector2 {
            x: self.x,
            y: self.z,
        }
    }

    /// Copy of the y and z components as an independent 2-vector.
    #[must_use]
    pub const fn yz(self) -> Vector2<T> {
        Vector2 {
            x: self.y,
            y: self.z,
        }
    }

    /// Extend to a homogeneous 4-vector with the given `w`.
    #[must_use]
    pub const fn extended(self, w: T) -> Vector4<T> {
        Vector4 {
            x: self.x,
            y: self.y,
            z: self.z,
            w,
        }
    }
}

impl<T: Scalar> From<Vector2<T>> for Vector3<T> {
    /// Extend a 2-vector with a zeroed trailing `z` component.
    fn from(v: Vector2<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: T::ZERO,
        }
    }
}

impl<T: Scalar + Neg<Output = T>> Vector3<T> {
    /// Cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vector3f {
    /// Apply a 4×4 matrix to this vector as a point.
    ///
    /// The vector is promoted to homogeneous form `(x, y, z, 1)`, multiplied
    /// through the matrix rows, and the first three result components are
    /// returned.
    #[must_use]
    pub fn transform(self, m: &Mat4) -> Self {
        let h = [self.x, self.y, self.z, 1.0];
        let mut out = [0.0_f32; 3];
        for (o, row) in out.iter_mut().zip(m.rows.iter()) {
            *o = row[0] * h[0] + row[1] * h[1] + row[2] * h[2] + row[3] * h[3];
        }
        Self::new(out[0], out[1], out[2])
    }
}

impl<T: Scalar> Vector4<T> {
    /// Promote a 3-vector to a homogeneous point (`w = 1`).
    #[must_use]
    pub const fn from_point(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: T::ONE,
        }
    }

    /// Promote a 3-vector to a homogeneous direction (`w = 0`).
    #[must_use]
    pub const fn from_direction(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: T::ZERO,
        }
    }

    /// Copy of the x, y, z components as an independent 3-vector.
    #[must_use]
    pub const fn xyz(self) -> Vector3<T> {
        Vector3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl Vector4f {
    /// Apply a 4×4 matrix to this homogeneous vector.
    ///
    /// Unlike [`Vector3f::transform`] no promotion happens: `w` is taken as
    /// stored, so a direction (`w = 0`) passes through the translation row
    /// untouched while a point (`w = 1`) is moved by it.
    #[must_use]
    pub fn transform(self, m: &Mat4) -> Self {
        let h = self.to_array();
        let mut out = [0.0_f32; 4];
        for (o, row) in out.iter_mut().zip(m.rows.iter()) {
            *o = row[0] * h[0] + row[1] * h[1] + row[2] * h[2] + row[3] * h[3];
        }
        Self::new(out[0], out[1], out[2], out[3])
    }
}

// SAFETY: repr(C) structs of two/three/four f32 fields have no padding and
// every bit pattern is a valid value.
unsafe impl bytemuck::Zeroable for Vector2<f32> {}
unsafe impl bytemuck::Pod for Vector2<f32> {}
unsafe impl bytemuck::Zeroable for Vector3<f32> {}
unsafe impl bytemuck::Pod for Vector3<f32> {}
unsafe impl bytemuck::Zeroable for Vector4<f32> {}
unsafe impl bytemuck::Pod for Vector4<f32> {}

/// Unnormalized face normal of the triangle `p1 p2 p3`:
/// the cross product `(p2 − p1) × (p3 − p1)`.
///
/// Invoked on raw vertex positions from the mesh loader; callers normalize
/// the result themselves if they need a unit normal (a degenerate triangle
/// yields the zero vector).
#[must_use]
pub fn surface_normal(p1: Vector3f, p2: Vector3f, p3: Vector3f) -> Vector3f {
    (p2 - p1).cross(p3 - p1)
}
