// Vector primitives for IntSar-xform
//
// Dot, cross, add, sub, scale, normalize, clamp and negate come straight from
// glam. This module only adds the scalar primitives the inverse routines are
// sequenced around.

pub use glam::{Vec3, Vec4};

/// Fused multiply-add: `a * b + c` with a single rounding.
#[inline(always)]
pub fn fmaf(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Lane-wise fused multiply-add on four-wide vectors.
#[inline(always)]
pub fn fma4(a: Vec4, b: Vec4, c: Vec4) -> Vec4 {
    Vec4::new(
        fmaf(a.x, b.x, c.x),
        fmaf(a.y, b.y, c.y),
        fmaf(a.z, b.z, c.z),
        fmaf(a.w, b.w, c.w),
    )
}

/// Reciprocal primitive used for every determinant and `w` division.
///
/// Never traps. `invf(0.0)` is unspecified but non-panicking (±inf with the
/// exact reciprocal, NaN with `fast-recip`).
#[inline(always)]
pub fn invf(x: f32) -> f32 {
    #[cfg(feature = "fast-recip")]
    {
        invf_approx(x)
    }
    #[cfg(not(feature = "fast-recip"))]
    {
        x.recip()
    }
}

/// Approximate `1/x`: bit-level seed, two Newton-Raphson steps, then one
/// fused correction step.
///
/// The fused step lands on the correctly rounded reciprocal for nearly every
/// normal input and always for powers of two, so `invf_approx(1.0) == 1.0`.
#[inline]
pub fn invf_approx(x: f32) -> f32 {
    let magnitude = x.abs();
    let mut y = f32::from_bits(0x7EF3_11C3_u32.wrapping_sub(magnitude.to_bits()));
    y *= 2.0 - magnitude * y;
    y *= 2.0 - magnitude * y;
    let residual = fmaf(-magnitude, y, 1.0);
    y = fmaf(y, residual, y);
    y.copysign(x)
}

/// Reflects `incident` about the plane with unit `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Clamps every component into `[0, 1]`.
#[inline]
pub fn clamp01(v: Vec3) -> Vec3 {
    v.clamp(Vec3::ZERO, Vec3::ONE)
}
