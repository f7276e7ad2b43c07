// Affine block inverse for IntSar-xform
//
//   A = [ M  b ]        inv(A) = [ inv(M)  -inv(M) * b / w ]
//       [ 0  w ]                 [   0           1 / w     ]
//
// det(A) = det(M) * w, so one 3x3 inverse plus a vector transform replaces
// the full cofactor expansion. With w == 1 the reciprocal is skipped.

use log::debug;

use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::mat3;
use crate::matrix::{Mat3x3, Mat4x4};
use crate::vector::invf;

/// Inverse of a matrix whose bottom row is `(0, 0, 0, w)`, `w != 0`.
///
/// Callers check [`Mat4x4::is_affine_block`] first; feeding anything else
/// silently drops the bottom row. A singular upper-left block panics in debug
/// builds like [`mat3::inverse`].
pub fn inverse(m: &Mat4x4, out: &mut Mat4x4) {
    debug_assert!(
        m.is_affine_block(),
        "affine::inverse: bottom row is not (0, 0, 0, w)"
    );
    let mut inv_m = Mat3x3::ZERO;
    mat3::inverse(&m.upper_left(), &mut inv_m);
    assemble(m, &inv_m, out);
}

/// Checked [`inverse`]. A singular 3x3 block (or `w` so small that
/// `det(M) * w` vanishes) is reported and `out` is left untouched.
pub fn try_inverse(m: &Mat4x4, out: &mut Mat4x4, config: &InverseConfig) -> Result<()> {
    debug_assert!(m.is_affine_block());
    let block = m.upper_left();
    let w = m.cols[3].w;
    let determinant = block.determinant() * w;
    if config.is_singular(determinant) {
        debug!("rejecting singular affine matrix, det = {determinant}");
        return Err(InverseError::SingularMatrix { determinant });
    }
    let mut inv_m = Mat3x3::ZERO;
    mat3::inverse(&block, &mut inv_m);
    assemble(m, &inv_m, out);
    Ok(())
}

#[inline(always)]
fn assemble(m: &Mat4x4, inv_m: &Mat3x3, out: &mut Mat4x4) {
    let w = m.cols[3].w;
    let moved = inv_m.mul_vec3(m.translation());
    let (translation, inv_w) = if w == 1.0 {
        (-moved, 1.0)
    } else {
        let inv_w = invf(w);
        (moved * -inv_w, inv_w)
    };

    out.cols = [
        inv_m.cols[0].extend(0.0),
        inv_m.cols[1].extend(0.0),
        inv_m.cols[2].extend(0.0),
        translation.extend(inv_w),
    ];
}
