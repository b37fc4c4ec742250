//! Cached per-entity transformation component.
//!
//! [`Transformation`] composes position, rotation, and scale into a single
//! model matrix, recomputing it lazily: setters only mark the cache dirty,
//! and the matrix is rebuilt on the next read. The renderer reads the result
//! every frame while mutation is comparatively rare, so the cache pays for
//! itself quickly.

use prism_ecs::Component;
use serde::{Deserialize, Serialize};

use crate::matrix::Mat4;
use crate::vector::Vector3f;

/// Position, rotation, and scale of an entity, with a lazily cached model
/// matrix.
///
/// Rotation is in degrees about each coordinate axis, composed in the fixed
/// order y, z, x (rotation composition is non-commutative, so the order is
/// part of the contract).
///
/// The cache invariant: whenever [`Transformation::is_dirty`] returns
/// `false`, the cached matrix matches the current position/rotation/scale.
/// Every setter marks the cache dirty; there is no way to read a stale
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transformation {
    position: Vector3f,
    /// Degrees about each axis.
    rotation: Vector3f,
    scale: Vector3f,
    matrix: Mat4,
    dirty: bool,
}

impl Transformation {
    /// Create a transformation from position, rotation (degrees), and scale.
    ///
    /// Starts dirty, so the first matrix read performs the initial
    /// computation.
    #[must_use]
    pub fn new(position: Vector3f, rotation: Vector3f, scale: Vector3f) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: Mat4::IDENTITY,
            dirty: true,
        }
    }

    /// Create a transformation at `position` with no rotation and unit scale.
    #[must_use]
    pub fn from_position(position: Vector3f) -> Self {
        Self::new(position, Vector3f::ZERO, Vector3f::ONE)
    }

    /// Recompute the cached model matrix if any field changed since the last
    /// computation. Returns `true` if a recompute happened.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        let r = self.rotation;
        let mut m = Mat4::IDENTITY.translated(self.position);
        if r.y != 0.0 {
            m = m.rotated_about_unit(r.y, Vector3f::Y_AXIS);
        }
        if r.z != 0.0 {
            m = m.rotated_about_unit(r.z, Vector3f::Z_AXIS);
        }
        if r.x != 0.0 {
            m = m.rotated_about_unit(r.x, Vector3f::X_AXIS);
        }
        self.matrix = m.scaled(self.scale);
        self.dirty = false;
        true
    }

    /// The model matrix, recomputed first if the cache is stale.
    ///
    /// When the cache is clean this is a pure read.
    pub fn matrix(&mut self) -> &Mat4 {
        self.update();
        &self.matrix
    }

    /// The cached model matrix, or `None` if it is stale.
    ///
    /// This is the read-phase accessor: a renderer that runs after all
    /// mutation for the frame has been flushed through [`Transformation::update`]
    /// can take `&self` here.
    #[must_use]
    pub fn cached_matrix(&self) -> Option<&Mat4> {
        if self.dirty { None } else { Some(&self.matrix) }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vector3f {
        self.position
    }

    /// Move the entity; marks the cache dirty.
    pub fn set_position(&mut self, position: Vector3f) {
        self.position = position;
        self.dirty = true;
    }

    /// Current rotation in degrees about each axis.
    #[must_use]
    pub fn rotation(&self) -> Vector3f {
        self.rotation
    }

    /// Rotate the entity (degrees about each axis); marks the cache dirty.
    pub fn set_rotation(&mut self, rotation: Vector3f) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Current per-axis scale.
    #[must_use]
    pub fn scale(&self) -> Vector3f {
        self.scale
    }

    /// Scale the entity; marks the cache dirty.
    pub fn set_scale(&mut self, scale: Vector3f) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Whether the cached matrix is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::from_position(Vector3f::ZERO)
    }
}

impl Component for Transformation {
    fn type_name() -> &'static str {
        "Transformation"
    }
}
