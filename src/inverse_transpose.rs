// Inverse-transpose for IntSar-xform
//
// Normals transform by transpose(inverse(M)). The general cofactors are
// written out row-wise, so there is no second pass over the result.

use log::debug;

use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::general::Cofactors;
use crate::matrix::{Mat3x3, Mat4x4};
use crate::vector::invf;

/// `out = transpose(inverse(m))` for a non-singular `m`.
///
/// Same preconditions as [`crate::general::inverse`].
pub fn inverse_transpose(m: &Mat4x4, out: &mut Mat4x4) {
    let cofactors = Cofactors::of(m);
    debug_assert!(
        cofactors.determinant != 0.0,
        "inverse_transpose: matrix is singular and cannot be inverted"
    );
    cofactors.write_inverse_transpose(invf(cofactors.determinant), out);
}

/// Checked [`inverse_transpose`]. `out` is left untouched on error.
pub fn try_inverse_transpose(
    m: &Mat4x4,
    out: &mut Mat4x4,
    config: &InverseConfig,
) -> Result<()> {
    let cofactors = Cofactors::of(m);
    let determinant = cofactors.determinant;
    if config.is_singular(determinant) {
        debug!("rejecting singular matrix for inverse-transpose, det = {determinant}");
        return Err(InverseError::SingularMatrix { determinant });
    }
    cofactors.write_inverse_transpose(invf(determinant), out);
    Ok(())
}

/// Upper-left 3x3 of the inverse-transpose: the normal matrix of a
/// model-view transform.
pub fn normal_matrix(m: &Mat4x4) -> Mat3x3 {
    let mut out = Mat4x4::ZERO;
    inverse_transpose(m, &mut out);
    out.upper_left()
}

impl Mat4x4 {
    pub fn inverse_transpose(&self) -> Self {
        let mut out = Self::ZERO;
        inverse_transpose(self, &mut out);
        out
    }

    pub fn try_inverse_transpose(&self) -> Result<Self> {
        let mut out = Self::ZERO;
        try_inverse_transpose(self, &mut out, &InverseConfig::default())?;
        Ok(out)
    }
}
