// 4x4 inverse entry points for IntSar-xform
//
// Picks the affine block path when the bottom row allows it and falls back to
// the full cofactor expansion otherwise. Three flavours:
//   - `inverse`: unchecked, debug assertions only, for validated hot loops
//   - `try_inverse`: returns `InverseError` instead of writing inf/NaN
//   - `inverse_raw`: the same checks plus null/alignment/aliasing for
//     platform-owned pointers

use std::mem;

use log::debug;

use crate::affine;
use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::general;
use crate::matrix::Mat4x4;

const BUFFER_ALIGN: usize = 32;

/// Inverse of a non-singular `m`.
///
/// Singular input panics in debug builds and writes inf/NaN in release.
/// Entries large enough to overflow the determinant are not caught here and
/// come back as zeros; use [`try_inverse`] when the input is not validated.
#[inline]
pub fn inverse(m: &Mat4x4, out: &mut Mat4x4) {
    if m.is_affine_block() {
        affine::inverse(m, out);
    } else {
        general::inverse(m, out);
    }
}

/// Checked inverse. `out` is left untouched on error.
pub fn try_inverse(m: &Mat4x4, out: &mut Mat4x4, config: &InverseConfig) -> Result<()> {
    if config.affine_fast_path && m.is_affine_block() {
        affine::try_inverse(m, out, config)
    } else {
        general::try_inverse(m, out, config)
    }
}

/// Checked inverse between two platform-owned buffers.
///
/// Reports `NullBuffer`, `MisalignedBuffer` (the matrices must sit on a
/// 32-byte boundary) and `AliasedBuffers` (any overlap, not just equal
/// pointers) before reading anything.
///
/// # Safety
///
/// Non-null `src` must point to a readable `Mat4x4` and non-null `dst` to a
/// writable one, neither touched by anyone else for the duration of the call.
pub unsafe fn inverse_raw(
    src: *const Mat4x4,
    dst: *mut Mat4x4,
    config: &InverseConfig,
) -> Result<()> {
    if src.is_null() || dst.is_null() {
        return Err(InverseError::NullBuffer);
    }
    for address in [src as usize, dst as usize] {
        if address % BUFFER_ALIGN != 0 {
            debug!("misaligned matrix buffer at {address:#x}");
            return Err(InverseError::MisalignedBuffer { address });
        }
    }
    if (src as usize).abs_diff(dst as usize) < mem::size_of::<Mat4x4>() {
        debug!("refusing overlapping 4x4 buffers at {:p} and {:p}", src, dst);
        return Err(InverseError::AliasedBuffers);
    }

    // SAFETY: both pointers are non-null, aligned and at least one matrix
    // apart; validity is the caller's contract.
    let (m, out) = unsafe { (&*src, &mut *dst) };
    try_inverse(m, out, config)
}

impl Mat4x4 {
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

    /// Determinant through the general cofactor expansion.
    pub fn determinant(&self) -> f32 {
        general::determinant(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Vec3, Vec4};
    use approx::assert_relative_eq;

    fn perspective() -> Mat4x4 {
        glam::Mat4::perspective_rh_gl(1.0, 16.0 / 9.0, 0.1, 100.0).into()
    }

    #[test]
    fn dispatch_inverts_both_shapes() {
        let affine = Mat4x4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(glam::Mat4::from(affine.inverse() * affine)
            .abs_diff_eq(glam::Mat4::IDENTITY, 1e-6));

        let proj = perspective();
        assert!(!proj.is_affine_block());
        let inv: glam::Mat4 = proj.inverse().into();
        assert!(inv.abs_diff_eq(glam::Mat4::from(proj).inverse(), 1e-4));
    }

    #[test]
    fn disabling_fast_path_gives_the_same_answer() {
        let m = Mat4x4::from_rotation_x(0.9) * Mat4x4::from_translation(Vec3::new(-2.0, 0.5, 8.0));
        let fast = m.try_inverse().unwrap();
        let slow = m
            .try_inverse_with(&InverseConfig::default().with_affine_fast_path(false))
            .unwrap();
        assert!(glam::Mat4::from(fast).abs_diff_eq(slow.into(), 1e-5));
    }

    #[test]
    fn raw_rejects_aliasing() {
        let mut m = Mat4x4::from_translation(Vec3::X);
        let p: *mut Mat4x4 = &mut m;
        let err = unsafe { inverse_raw(p, p, &InverseConfig::default()) }.unwrap_err();
        assert_eq!(err, InverseError::AliasedBuffers);
        assert_eq!(m, Mat4x4::from_translation(Vec3::X));
    }

    #[test]
    fn overflowing_determinant_is_rejected_on_both_paths() {
        let huge = Mat4x4::from_scale(Vec3::splat(1.0e13));
        assert!(matches!(
            huge.try_inverse(),
            Err(InverseError::SingularMatrix { determinant }) if determinant.is_infinite()
        ));
        let slow = InverseConfig::default().with_affine_fast_path(false);
        assert!(matches!(
            huge.try_inverse_with(&slow),
            Err(InverseError::SingularMatrix { .. })
        ));

        // one order of magnitude less stays finite and inverts
        let large = Mat4x4::from_scale(Vec3::splat(1.0e12));
        let inv = large.try_inverse().unwrap();
        assert_relative_eq!(inv.cols[0].x, 1.0e-12, max_relative = 1e-6);
    }

    #[test]
    fn raw_rejects_partially_overlapping_buffers() {
        let mut storage = [Mat4x4::from_scale(Vec3::splat(2.0)); 2];
        let base = storage.as_mut_ptr();
        let config = InverseConfig::default();

        // half a matrix apart: still 32-byte aligned, but sharing two columns
        let shifted = unsafe { (base as *mut u8).add(32) } as *mut Mat4x4;
        let err = unsafe { inverse_raw(base, shifted, &config) }.unwrap_err();
        assert_eq!(err, InverseError::AliasedBuffers);
        let err = unsafe { inverse_raw(shifted, base, &config) }.unwrap_err();
        assert_eq!(err, InverseError::AliasedBuffers);
        assert_eq!(unsafe { *base.add(1) }, Mat4x4::from_scale(Vec3::splat(2.0)));

        // adjacent elements do not overlap
        let next = unsafe { base.add(1) };
        unsafe { inverse_raw(base, next, &config) }.unwrap();
        assert_eq!(storage[1], Mat4x4::from_scale(Vec3::splat(0.5)));
    }

    #[test]
    fn raw_rejects_null_and_misaligned() {
        let m = Mat4x4::IDENTITY;
        let config = InverseConfig::default();
        let err = unsafe { inverse_raw(&m, std::ptr::null_mut(), &config) }.unwrap_err();
        assert_eq!(err, InverseError::NullBuffer);

        let mut storage = [Mat4x4::IDENTITY; 2];
        let base = storage.as_mut_ptr() as *mut u8;
        let shifted = unsafe { base.add(4) } as *mut Mat4x4;
        let err = unsafe { inverse_raw(&m, shifted, &config) }.unwrap_err();
        assert_eq!(
            err,
            InverseError::MisalignedBuffer {
                address: shifted as usize
            }
        );
    }

    #[test]
    fn raw_inverts_between_distinct_buffers() {
        let src = Mat4x4::from_scale(Vec3::new(2.0, 4.0, 8.0));
        let mut dst = Mat4x4::ZERO;
        unsafe { inverse_raw(&src, &mut dst, &InverseConfig::default()) }.unwrap();
        assert_eq!(dst, Mat4x4::from_scale(Vec3::new(0.5, 0.25, 0.125)));
    }

    #[test]
    fn determinant_of_w_scaled_affine() {
        let mut m = Mat4x4::from_scale(Vec3::splat(2.0));
        m.cols[3] = Vec4::new(1.0, 1.0, 1.0, 3.0);
        assert_eq!(m.determinant(), 24.0);
    }
}
