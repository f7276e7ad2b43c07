// General 4x4 inverse for IntSar-xform
//
// Cofactor expansion in four-wide form. Eighteen 2x2 sub-determinants of the
// lower row pairs are packed into six factor vectors, combined with FMA into
// the adjugate, and a sign mask restores the checkerboard. The same cofactors
// feed the inverse-transpose, which only differs in how they are written out.

use log::debug;

use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::matrix::Mat4x4;
use crate::vector::{fma4, fmaf, invf, Vec4};

const SIGN_A: Vec4 = Vec4::new(1.0, -1.0, 1.0, -1.0);
const SIGN_B: Vec4 = Vec4::new(-1.0, 1.0, -1.0, 1.0);

/// Signed adjugate of a 4x4 matrix, column-major, plus its determinant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cofactors {
    pub adjugate: [Vec4; 4],
    pub determinant: f32,
}

impl Cofactors {
    pub(crate) fn of(m: &Mat4x4) -> Self {
        let [c0, c1, c2, c3] = m.cols;
        let (m00, m01, m02, m03) = (c0.x, c0.y, c0.z, c0.w);
        let (m10, m11, m12, m13) = (c1.x, c1.y, c1.z, c1.w);
        let (m20, m21, m22, m23) = (c2.x, c2.y, c2.z, c2.w);
        let (m30, m31, m32, m33) = (c3.x, c3.y, c3.z, c3.w);

        // rows 2,3 / 1,3 / 1,2 of columns 2,3
        let coef00 = fmaf(m22, m33, -(m32 * m23));
        let coef02 = fmaf(m12, m33, -(m32 * m13));
        let coef03 = fmaf(m12, m23, -(m22 * m13));

        // columns 1,3
        let coef04 = fmaf(m21, m33, -(m31 * m23));
        let coef06 = fmaf(m11, m33, -(m31 * m13));
        let coef07 = fmaf(m11, m23, -(m21 * m13));

        // columns 1,2
        let coef08 = fmaf(m21, m32, -(m31 * m22));
        let coef10 = fmaf(m11, m32, -(m31 * m12));
        let coef11 = fmaf(m11, m22, -(m21 * m12));

        // columns 0,3
        let coef12 = fmaf(m20, m33, -(m30 * m23));
        let coef14 = fmaf(m10, m33, -(m30 * m13));
        let coef15 = fmaf(m10, m23, -(m20 * m13));

        // columns 0,2
        let coef16 = fmaf(m20, m32, -(m30 * m22));
        let coef18 = fmaf(m10, m32, -(m30 * m12));
        let coef19 = fmaf(m10, m22, -(m20 * m12));

        // columns 0,1
        let coef20 = fmaf(m20, m31, -(m30 * m21));
        let coef22 = fmaf(m10, m31, -(m30 * m11));
        let coef23 = fmaf(m10, m21, -(m20 * m11));

        let fac0 = Vec4::new(coef00, coef00, coef02, coef03);
        let fac1 = Vec4::new(coef04, coef04, coef06, coef07);
        let fac2 = Vec4::new(coef08, coef08, coef10, coef11);
        let fac3 = Vec4::new(coef12, coef12, coef14, coef15);
        let fac4 = Vec4::new(coef16, coef16, coef18, coef19);
        let fac5 = Vec4::new(coef20, coef20, coef22, coef23);

        let vec0 = Vec4::new(m10, m00, m00, m00);
        let vec1 = Vec4::new(m11, m01, m01, m01);
        let vec2 = Vec4::new(m12, m02, m02, m02);
        let vec3 = Vec4::new(m13, m03, m03, m03);

        let inv0 = fma4(vec3, fac2, fma4(vec1, fac0, -(vec2 * fac1)));
        let inv1 = fma4(vec3, fac4, fma4(vec0, fac0, -(vec2 * fac3)));
        let inv2 = fma4(vec3, fac5, fma4(vec0, fac1, -(vec1 * fac3)));
        let inv3 = fma4(vec2, fac5, fma4(vec0, fac2, -(vec1 * fac4)));

        let adjugate = [inv0 * SIGN_A, inv1 * SIGN_B, inv2 * SIGN_A, inv3 * SIGN_B];

        // column 0 of the input against row 0 of the adjugate
        let row0 = Vec4::new(adjugate[0].x, adjugate[1].x, adjugate[2].x, adjugate[3].x);
        let determinant = fmaf(
            m00,
            row0.x,
            fmaf(m01, row0.y, fmaf(m02, row0.z, m03 * row0.w)),
        );

        Self {
            adjugate,
            determinant,
        }
    }

    /// Adjugate columns scaled by `inv_det`: the inverse.
    #[inline]
    pub(crate) fn write_inverse(&self, inv_det: f32, out: &mut Mat4x4) {
        for (dst, src) in out.cols.iter_mut().zip(self.adjugate.iter()) {
            *dst = *src * inv_det;
        }
    }

    /// Adjugate rows scaled by `inv_det`: the inverse-transpose.
    #[inline]
    pub(crate) fn write_inverse_transpose(&self, inv_det: f32, out: &mut Mat4x4) {
        let [a0, a1, a2, a3] = self.adjugate;
        out.cols = [
            Vec4::new(a0.x, a1.x, a2.x, a3.x) * inv_det,
            Vec4::new(a0.y, a1.y, a2.y, a3.y) * inv_det,
            Vec4::new(a0.z, a1.z, a2.z, a3.z) * inv_det,
            Vec4::new(a0.w, a1.w, a2.w, a3.w) * inv_det,
        ];
    }
}

/// Full cofactor inverse of a non-singular `m`, regardless of structure.
///
/// `out` must not alias `m`; the borrow checker enforces that here and
/// [`crate::inverse::inverse_raw`] checks it at the pointer boundary.
/// `det(m) == 0` panics in debug builds and writes inf/NaN in release.
pub fn inverse(m: &Mat4x4, out: &mut Mat4x4) {
    let cofactors = Cofactors::of(m);
    debug_assert!(
        cofactors.determinant != 0.0,
        "general::inverse: matrix is singular and cannot be inverted"
    );
    cofactors.write_inverse(invf(cofactors.determinant), out);
}

/// Checked [`inverse`]. `out` is left untouched on error.
pub fn try_inverse(m: &Mat4x4, out: &mut Mat4x4, config: &InverseConfig) -> Result<()> {
    let cofactors = Cofactors::of(m);
    let determinant = cofactors.determinant;
    if config.is_singular(determinant) {
        debug!("rejecting singular 4x4 matrix, det = {determinant}");
        return Err(InverseError::SingularMatrix { determinant });
    }
    cofactors.write_inverse(invf(determinant), out);
    Ok(())
}

/// Determinant through the same cofactor expansion the inverse uses.
pub fn determinant(m: &Mat4x4) -> f32 {
    Cofactors::of(m).determinant
}
