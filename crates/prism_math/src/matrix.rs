//! 4×4 homogeneous matrices and the transform/view/projection builders.
//!
//! ## Layout convention
//!
//! [`Mat4`] is stored as four rows of four `f32`. Rows 0–2 of columns 0–2
//! carry the linear (rotation + scale) part and row 3 carries the
//! translation. This is the GLM column-major memory layout read row-wise:
//! [`Mat4::to_array`] hands the flat 16 floats straight to a GPU pipeline
//! that expects column-major data, and applying a matrix to a column vector
//! on the CPU goes through [`Mat4::transpose`] first (see
//! [`Vector3f::transform`]).
//!
//! Every builder returns a new matrix; none mutates its input. Angles are in
//! degrees and converted to radians internally.

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::vector::Vector3f;

const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// A 4×4 matrix of `f32`.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct Mat4 {
    /// Row-major storage; `rows[3]` is the translation row.
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// The all-zeros matrix.
    pub const ZERO: Self = Self {
        rows: [[0.0; 4]; 4],
    };

    /// Build a matrix from its rows.
    #[must_use]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// A single row.
    #[must_use]
    pub const fn row(&self, index: usize) -> [f32; 4] {
        self.rows[index]
    }

    /// Flatten into 16 floats, row by row.
    ///
    /// With this crate's layout convention the result is exactly what a
    /// column-major GPU uniform expects.
    #[must_use]
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, row) in self.rows.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        out
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                r.rows[i][j] = self.rows[j][i];
            }
        }
        r
    }

    /// Compose a translation by `v` onto this matrix.
    ///
    /// The translation row is recomputed as
    /// `row0·v.x + row1·v.y + row2·v.z + row3`, so the existing translation
    /// is the additive base; translating an already-transformed matrix
    /// composes as expected.
    #[must_use]
    pub fn translated(&self, v: Vector3f) -> Self {
        let mut r = *self;
        for j in 0..4 {
            r.rows[3][j] = self.rows[0][j] * v.x
                + self.rows[1][j] * v.y
                + self.rows[2][j] * v.z
                + self.rows[3][j];
        }
        r
    }

    /// Compose a rotation of `angle_deg` degrees about `axis` onto this
    /// matrix.
    ///
    /// The axis is normalized before use; a zero-length axis fails with
    /// [`MathError::ZeroLength`]. The rotation touches rows 0–2 only; the
    /// translation row is carried through unchanged.
    pub fn rotated(&self, angle_deg: f32, axis: Vector3f) -> Result<Self, MathError> {
        let axis = axis
            .normalized()
            .map_err(|_| MathError::ZeroLength { op: "rotation axis" })?;
        Ok(self.rotated_about_unit(angle_deg, axis))
    }

    /// Rotation composition for an axis already known to be unit length.
    ///
    /// Rodrigues form: with `c = cos`, `s = sin`, `t = (1 − c)·axis`, the
    /// 3×3 block is `t⊗axis + c·I ± s·[axis]×`, right-composed onto rows 0–2.
    pub(crate) fn rotated_about_unit(&self, angle_deg: f32, axis: Vector3f) -> Self {
        let rad = angle_deg * DEG_TO_RAD;
        let c = rad.cos();
        let s = rad.sin();
        let t = axis * (1.0 - c);

        let rot = [
            [c + t.x * axis.x, t.x * axis.y + s * axis.z, t.x * axis.z - s * axis.y],
            [t.y * axis.x - s * axis.z, c + t.y * axis.y, t.y * axis.z + s * axis.x],
            [t.z * axis.x + s * axis.y, t.z * axis.y - s * axis.x, c + t.z * axis.z],
        ];

        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..4 {
                r.rows[i][j] = self.rows[0][j] * rot[i][0]
                    + self.rows[1][j] * rot[i][1]
                    + self.rows[2][j] * rot[i][2];
            }
        }
        r.rows[3] = self.rows[3];
        r
    }

    /// Compose a per-axis scale onto this matrix.
    ///
    /// Rows 0–2 are scaled element-wise by `v.x`, `v.y`, `v.z`; the
    /// translation row is unchanged.
    #[must_use]
    pub fn scaled(&self, v: Vector3f) -> Self {
        let mut r = Self::ZERO;
        let factors = [v.x, v.y, v.z];
        for (i, factor) in factors.iter().enumerate() {
            for j in 0..4 {
                r.rows[i][j] = self.rows[i][j] * factor;
            }
        }
        r.rows[3] = self.rows[3];
        r
    }

    /// Right-handed view matrix from `eye`, `center`, `up`.
    ///
    /// Basis: `f = normalize(center − eye)`, `s = normalize(f × up)`,
    /// `u = s × f`, with `−f` as the z-basis column. Fails with
    /// [`MathError::ZeroLength`] when `center == eye` or `up` is parallel
    /// to the view direction.
    pub fn look_at_rh(eye: Vector3f, center: Vector3f, up: Vector3f) -> Result<Self, MathError> {
        let f = (center - eye)
            .normalized()
            .map_err(|_| MathError::ZeroLength { op: "look-at forward" })?;
        let s = f
            .cross(up)
            .normalized()
            .map_err(|_| MathError::ZeroLength { op: "look-at side" })?;
        let u = s.cross(f);

        let mut r = Self::IDENTITY;
        r.rows[0][0] = s.x;
        r.rows[1][0] = s.y;
        r.rows[2][0] = s.z;
        r.rows[0][1] = u.x;
        r.rows[1][1] = u.y;
        r.rows[2][1] = u.z;
        r.rows[0][2] = -f.x;
        r.rows[1][2] = -f.y;
        r.rows[2][2] = -f.z;
        r.rows[3][0] = -s.dot(eye);
        r.rows[3][1] = -u.dot(eye);
        r.rows[3][2] = f.dot(eye);
        Ok(r)
    }

    /// Left-handed view matrix from `eye`, `center`, `up`.
    ///
    /// Differs from [`Mat4::look_at_rh`] in the cross-product order
    /// (`s = up × f`) and the sign of the z-basis column (`+f`). The two
    /// must never be mixed with projection matrices of the other handedness
    /// or the scene mirrors.
    pub fn look_at_lh(eye: Vector3f, center: Vector3f, up: Vector3f) -> Result<Self, MathError> {
        let f = (center - eye)
            .normalized()
            .map_err(|_| MathError::ZeroLength { op: "look-at forward" })?;
        let s = up
            .cross(f)
            .normalized()
            .map_err(|_| MathError::ZeroLength { op: "look-at side" })?;
        let u = s.cross(f);

        let mut r = Self::IDENTITY;
        r.rows[0][0] = s.x;
        r.rows[1][0] = s.y;
        r.rows[2][0] = s.z;
        r.rows[0][1] = u.x;
        r.rows[1][1] = u.y;
        r.rows[2][1] = u.z;
        r.rows[0][2] = f.x;
        r.rows[1][2] = f.y;
        r.rows[2][2] = f.z;
        r.rows[3][0] = -s.dot(eye);
        r.rows[3][1] = -u.dot(eye);
        r.rows[3][2] = -f.dot(eye);
        Ok(r)
    }

    /// Right-handed perspective projection with a [0, 1] depth range.
    ///
    /// `fovy_deg` is the vertical field of view in degrees. Degenerate
    /// parameters (`znear == zfar`, zero aspect) are the caller's problem by
    /// contract: the resulting matrix will contain Inf or NaN rather than
    /// this function failing. A warning is logged when that happens.
    #[must_use]
    pub fn perspective_rh(fovy_deg: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        warn_if_degenerate("perspective_rh", aspect, znear, zfar);
        let tan_half_fovy = (fovy_deg * DEG_TO_RAD * 0.5).tan();

        let mut r = Self::ZERO;
        r.rows[0][0] = 1.0 / (aspect * tan_half_fovy);
        r.rows[1][1] = 1.0 / tan_half_fovy;
        r.rows[2][3] = -1.0;
        r.rows[2][2] = zfar / (znear - zfar);
        r.rows[3][2] = -(zfar * znear) / (zfar - znear);
        r
    }

    /// Left-handed perspective projection with a [0, 1] depth range.
    ///
    /// Same contract as [`Mat4::perspective_rh`].
    #[must_use]
    pub fn perspective_lh(fovy_deg: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        warn_if_degenerate("perspective_lh", aspect, znear, zfar);
        let tan_half_fovy = (fovy_deg * DEG_TO_RAD * 0.5).tan();

        let mut r = Self::ZERO;
        r.rows[0][0] = 1.0 / (aspect * tan_half_fovy);
        r.rows[1][1] = 1.0 / tan_half_fovy;
        r.rows[2][3] = 1.0;
        r.rows[2][2] = zfar / (zfar - znear);
        r.rows[3][2] = -(zfar * znear) / (zfar - znear);
        r
    }

    /// Right-handed orthographic projection with a [0, 1] depth range.
    ///
    /// Degenerate extents propagate Inf/NaN, as with the perspective
    /// builders.
    #[must_use]
    pub fn ortho_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        if znear == zfar {
            tracing::warn!(znear, zfar, "degenerate depth range in ortho_rh");
        }
        let mut r = Self::IDENTITY;
        r.rows[0][0] = 2.0 / (right - left);
        r.rows[1][1] = 2.0 / (top - bottom);
        r.rows[3][0] = -(right + left) / (right - left);
        r.rows[3][1] = -(top + bottom) / (top - bottom);
        r.rows[2][2] = -1.0 / (zfar - znear);
        r.rows[3][2] = -znear / (zfar - znear);
        r
    }

    /// Orthographic projection for pure 2D rendering.
    ///
    /// No depth scaling: the z row is pinned to `−1`.
    #[must_use]
    pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let mut r = Self::IDENTITY;
        r.rows[0][0] = 2.0 / (right - left);
        r.rows[1][1] = 2.0 / (top - bottom);
        r.rows[2][2] = -1.0;
        r.rows[3][0] = -(right + left) / (right - left);
        r.rows[3][1] = -(top + bottom) / (top - bottom);
        r
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    /// Standard row-major matrix product.
    fn mul(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for (k, rhs_row) in rhs.rows.iter().enumerate() {
                    sum += self.rows[i][k] * rhs_row[j];
                }
                r.rows[i][j] = sum;
            }
        }
        r
    }
}

impl std::ops::Index<usize> for Mat4 {
    type Output = [f32; 4];

    fn index(&self, index: usize) -> &[f32; 4] {
        &self.rows[index]
    }
}

impl std::ops::IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, index: usize) -> &mut [f32; 4] {
        &mut self.rows[index]
    }
}

fn warn_if_degenerate(builder: &'static str, aspect: f32, znear: f32, zfar: f32) {
    if znear == zfar || aspect == 0.0 {
        tracing::warn!(
            builder,
            aspect,
            znear,
            zfar,
            "degenerate projection parameters; matrix will contain non-finite values"
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn assert_mat_relative_eq(a: &Mat4, b: &Mat4) {
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(a.rows[i][j], b.rows[i][j], max_relative = 1e-5, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_from_rows_matches_builder_output() {
        let built = Mat4::IDENTITY.translated(Vector3f::new(1.0, 2.0, 3.0));
        let expected = Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 2.0, 3.0, 1.0],
        ]);
        assert_eq!(built, expected);
    }

    #[test]
    fn test_translated_writes_translation_row() {
        let m = Mat4::IDENTITY.translated(Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(m.rows[3], [1.0, 2.0, 3.0, 1.0]);
        // Linear part untouched.
        assert_eq!(m.rows[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_translated_composes_onto_existing_translation() {
        let m = Mat4::IDENTITY
            .translated(Vector3f::new(1.0, 0.0, 0.0))
            .translated(Vector3f::new(0.0, 2.0, 0.0));
        assert_eq!(m.rows[3], [1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rotated_by_zero_degrees_is_identity() {
        let m = Mat4::IDENTITY
            .rotated(0.0, Vector3f::new(0.3, 0.5, 0.7))
            .unwrap();
        assert_mat_relative_eq(&m, &Mat4::IDENTITY);
    }

    #[test]
    fn test_rotated_preserves_translation_row() {
        let m = Mat4::IDENTITY
            .translated(Vector3f::new(1.0, 2.0, 3.0))
            .rotated(90.0, Vector3f::Y_AXIS)
            .unwrap();
        assert_eq!(m.rows[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_rotated_quarter_turn_about_x() {
        // 90° about x maps the y basis row onto z.
        let m = Mat4::IDENTITY.rotated(90.0, Vector3f::X_AXIS).unwrap();
        let v = Vector3f::new(0.0, 1.0, 0.0).transform(&m.transpose());
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotated_normalizes_axis() {
        let a = Mat4::IDENTITY.rotated(30.0, Vector3f::new(0.0, 10.0, 0.0)).unwrap();
        let b = Mat4::IDENTITY.rotated(30.0, Vector3f::Y_AXIS).unwrap();
        assert_mat_relative_eq(&a, &b);
    }

    #[test]
    fn test_rotated_zero_axis_fails() {
        assert_eq!(
            Mat4::IDENTITY.rotated(45.0, Vector3f::ZERO),
            Err(MathError::ZeroLength { op: "rotation axis" })
        );
    }

    #[test]
    fn test_scaled_by_one_is_noop() {
        let m = Mat4::IDENTITY
            .translated(Vector3f::new(1.0, 2.0, 3.0))
            .rotated(30.0, Vector3f::Z_AXIS)
            .unwrap();
        assert_eq!(m.scaled(Vector3f::ONE), m);
    }

    #[test]
    fn test_scaled_multiplies_linear_rows() {
        let m = Mat4::IDENTITY.scaled(Vector3f::new(2.0, 3.0, 4.0));
        assert_eq!(m.rows[0][0], 2.0);
        assert_eq!(m.rows[1][1], 3.0);
        assert_eq!(m.rows[2][2], 4.0);
        assert_eq!(m.rows[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_transform_composition_matches_matrix_product() {
        let m1 = Mat4::IDENTITY
            .translated(Vector3f::new(1.0, 0.0, 2.0))
            .rotated(40.0, Vector3f::Y_AXIS)
            .unwrap();
        let m2 = Mat4::IDENTITY
            .scaled(Vector3f::new(2.0, 2.0, 2.0))
            .rotated(25.0, Vector3f::X_AXIS)
            .unwrap();
        let v = Vector3f::new(0.5, -1.5, 3.0);

        let stepwise = v.transform(&m1).transform(&m2);
        let composed = v.transform(&(m2 * m1));
        assert_relative_eq!(stepwise.x, composed.x, max_relative = 1e-5);
        assert_relative_eq!(stepwise.y, composed.y, max_relative = 1e-5);
        assert_relative_eq!(stepwise.z, composed.z, max_relative = 1e-5);
    }

    #[test]
    fn test_look_at_rh_maps_eye_to_origin() {
        let eye = Vector3f::new(4.0, 3.0, 8.0);
        let view = Mat4::look_at_rh(eye, Vector3f::ZERO, Vector3f::Y_AXIS).unwrap();
        let mapped = eye.transform(&view.transpose());
        assert_relative_eq!(mapped.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_handedness_flips_z_basis() {
        let eye = Vector3f::new(0.0, 0.0, 5.0);
        let rh = Mat4::look_at_rh(eye, Vector3f::ZERO, Vector3f::Y_AXIS).unwrap();
        let lh = Mat4::look_at_lh(eye, Vector3f::ZERO, Vector3f::Y_AXIS).unwrap();
        // Forward is -z; the z-basis column carries opposite signs.
        assert_relative_eq!(rh.rows[2][2], -lh.rows[2][2]);
    }

    #[test]
    fn test_look_at_degenerate_inputs_fail() {
        let eye = Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(
            Mat4::look_at_rh(eye, eye, Vector3f::Y_AXIS),
            Err(MathError::ZeroLength { op: "look-at forward" })
        );
        // Up parallel to the view direction collapses the side basis.
        assert_eq!(
            Mat4::look_at_rh(Vector3f::ZERO, Vector3f::Y_AXIS, Vector3f::Y_AXIS),
            Err(MathError::ZeroLength { op: "look-at side" })
        );
    }

    #[test]
    fn test_perspective_rh_coefficients() {
        let fovy = 70.0_f32;
        let aspect = 16.0 / 9.0;
        let (znear, zfar) = (0.1, 1000.0);
        let m = Mat4::perspective_rh(fovy, aspect, znear, zfar);

        let tan_half = (fovy.to_radians() * 0.5).tan();
        assert_relative_eq!(m.rows[0][0], 1.0 / (aspect * tan_half), max_relative = 1e-5);
        assert_relative_eq!(m.rows[1][1], 1.0 / tan_half, max_relative = 1e-5);
        assert_eq!(m.rows[2][3], -1.0);
        assert_relative_eq!(m.rows[2][2], zfar / (znear - zfar), max_relative = 1e-5);
        assert_relative_eq!(
            m.rows[3][2],
            -(zfar * znear) / (zfar - znear),
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_perspective_lh_flips_w_row() {
        let m = Mat4::perspective_lh(70.0, 1.0, 0.1, 100.0);
        assert_eq!(m.rows[2][3], 1.0);
        assert!(m.rows[2][2] > 0.0);
    }

    #[test]
    fn test_perspective_degenerate_params_propagate_nonfinite() {
        // znear == zfar is documented as caller error; no panic, no Err.
        let m = Mat4::perspective_rh(70.0, 1.0, 1.0, 1.0);
        assert!(!m.rows[3][2].is_finite());
    }

    #[test]
    fn test_ortho_rh_zero_to_one_depth() {
        let m = Mat4::ortho_rh(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0);
        assert_relative_eq!(m.rows[2][2], -0.1);
        assert_relative_eq!(m.rows[3][2], 0.0);
        assert_relative_eq!(m.rows[0][0], 1.0);
    }

    #[test]
    fn test_ortho_2d_pins_depth() {
        let m = Mat4::ortho_2d(0.0, 800.0, 0.0, 600.0);
        assert_eq!(m.rows[2][2], -1.0);
        assert_relative_eq!(m.rows[0][0], 2.0 / 800.0);
        assert_relative_eq!(m.rows[1][1], 2.0 / 600.0);
        assert_relative_eq!(m.rows[3][0], -1.0);
        assert_relative_eq!(m.rows[3][1], -1.0);
    }

    #[test]
    fn test_transpose_involution() {
        let m = Mat4::IDENTITY
            .translated(Vector3f::new(1.0, 2.0, 3.0))
            .scaled(Vector3f::new(2.0, 2.0, 2.0));
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_to_array_is_row_by_row() {
        let m = Mat4::IDENTITY.translated(Vector3f::new(1.0, 2.0, 3.0));
        let flat = m.to_array();
        assert_eq!(&flat[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(flat[0], 1.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = Mat4::perspective_rh(60.0, 1.5, 0.1, 100.0);
        let bytes = rmp_serde::to_vec(&m).unwrap();
        let restored: Mat4 = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(m, restored);
    }
}
