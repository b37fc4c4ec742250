//! Scalar domain of the vector types.
//!
//! The engine stores vectors in one of three scalar kinds: `f32` (the default
//! for everything the renderer touches), `u32` (index-like data), and `f64`
//! (high-precision intermediates). [`Scalar`] is sealed — those three types
//! are the whole domain.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

use serde::{Serialize, de::DeserializeOwned};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for u32 {}
    impl Sealed for f64 {}
}

/// A numeric component type a vector can be made of.
///
/// `from_f64`/`to_f64` use `as`-cast semantics: float→uint truncates toward
/// zero and saturates at the type's bounds. This is the coercion applied when
/// a component setter is handed a value outside the vector's scalar kind.
pub trait Scalar:
    sealed::Sealed
    + Copy
    + Default
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Coerce an `f64` into this scalar kind.
    fn from_f64(value: f64) -> Self;

    /// Widen this scalar to `f64`.
    fn to_f64(self) -> f64;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for u32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn from_f64(value: f64) -> Self {
        value as u32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Force `value` into the inclusive range `[min, max]`.
#[must_use]
pub fn clamp<T: Scalar>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
