// 3x3 transpose and inverses for IntSar-xform
//
// Every routine copies its input into locals before touching `out`, so a
// caller holding the same storage on both sides (through a raw copy or the
// by-value wrappers) still gets the right answer.

use log::debug;

use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::matrix::Mat3x3;
use crate::vector::{invf, Vec3};

/// `out[c][r] = m[r][c]`.
#[inline]
pub fn transpose(m: &Mat3x3, out: &mut Mat3x3) {
    let [c0, c1, c2] = m.cols;
    out.cols = [
        Vec3::new(c0.x, c1.x, c2.x),
        Vec3::new(c0.y, c1.y, c2.y),
        Vec3::new(c0.z, c1.z, c2.z),
    ];
}

/// Adjugate of `m`: the inverse scaled by `det(m)`.
///
/// Exact only when `det(m) == 1` (rotations). Anything else comes out scaled,
/// which is harmless for directions that get renormalized afterwards.
#[inline]
pub fn inverse_unscaled(m: &Mat3x3, out: &mut Mat3x3) {
    // rows of `m` as columns
    let mut t = Mat3x3::ZERO;
    transpose(m, &mut t);
    let [r0, r1, r2] = t.cols;

    out.cols = [r1.cross(r2), r2.cross(r0), r0.cross(r1)];
}

/// Inverse of a non-singular `m`.
///
/// `det(m) == 0` is a precondition violation: debug builds panic, release
/// builds write inf/NaN.
#[inline]
pub fn inverse(m: &Mat3x3, out: &mut Mat3x3) {
    let determinant = m.determinant();
    debug_assert!(
        determinant != 0.0,
        "mat3::inverse: matrix is singular and cannot be inverted"
    );
    scale_adjugate(m, invf(determinant), out);
}

/// Checked [`inverse`]. `out` is left untouched on error.
pub fn try_inverse(m: &Mat3x3, out: &mut Mat3x3, config: &InverseConfig) -> Result<()> {
    let determinant = m.determinant();
    if config.is_singular(determinant) {
        debug!("rejecting singular 3x3 matrix, det = {determinant}");
        return Err(InverseError::SingularMatrix { determinant });
    }
    scale_adjugate(m, invf(determinant), out);
    Ok(())
}

#[inline(always)]
fn scale_adjugate(m: &Mat3x3, inv_det: f32, out: &mut Mat3x3) {
    inverse_unscaled(m, out);
    for col in out.cols.iter_mut() {
        *col *= inv_det;
    }
}

/// Adjugate of a 3x3 matrix, usable only for transforming directions.
///
/// Produced by [`Mat3x3::inverse_unscaled`]. It carries the missing
/// `det` factor, so the only vector operation it offers renormalizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionInverse(Mat3x3);

impl DirectionInverse {
    /// Transforms `dir` and renormalizes. Zero-length results stay zero.
    #[inline]
    pub fn transform_direction(&self, dir: Vec3) -> Vec3 {
        self.0.mul_vec3(dir).normalize_or_zero()
    }

    /// Restores the exact inverse given `1 / det` of the source matrix.
    pub fn scaled_by(&self, inv_det: f32) -> Mat3x3 {
        self.0.scaled(inv_det)
    }

    /// The raw adjugate, off by a factor of `det`.
    pub fn into_unscaled(self) -> Mat3x3 {
        self.0
    }
}

impl Mat3x3 {
    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        transpose(self, &mut out);
        out
    }

    /// Unchecked inverse, see [`inverse`].
    pub fn inverse(&self) -> Self {
        let mut out = Self::ZERO;
        inverse(self, &mut out);
        out
    }

    pub fn try_inverse(&self) -> Result<Self> {
        self.try_inverse_with(&InverseConfig::default())
    }

    pub fn try_inverse_with(&self, config: &InverseConfig) -> Result<Self> {
        let mut out = Self::ZERO;
        try_inverse(self, &mut out, config)?;
        Ok(out)
    }

    pub fn inverse_unscaled(&self) -> DirectionInverse {
        let mut out = Self::ZERO;
        inverse_unscaled(self, &mut out);
        DirectionInverse(out)
    }
}
