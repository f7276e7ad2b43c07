// Concrete inversion scenarios with known answers

use std::f32::consts::FRAC_PI_2;

use intsar_xform::{affine, general, inverse, mat3};
use intsar_xform::{InverseConfig, InverseError, Mat3x3, Mat4x4, TransformRegister, Vec3, Vec4};

#[test]
fn identities_invert_to_themselves_exactly() {
    assert_eq!(Mat3x3::IDENTITY.inverse(), Mat3x3::IDENTITY);
    assert_eq!(Mat4x4::IDENTITY.inverse(), Mat4x4::IDENTITY);

    let mut out = Mat4x4::ZERO;
    general::inverse(&Mat4x4::IDENTITY, &mut out);
    assert_eq!(out, Mat4x4::IDENTITY);
    assert_eq!(Mat4x4::IDENTITY.inverse_transpose(), Mat4x4::IDENTITY);
}

#[test]
fn translation_inverts_to_opposite_translation() {
    let t = Mat4x4::from_translation(Vec3::new(1.5, -2.0, 7.0));
    let expected = Mat4x4::from_translation(Vec3::new(-1.5, 2.0, -7.0));
    assert_eq!(t.inverse(), expected);

    let mut full = Mat4x4::ZERO;
    general::inverse(&t, &mut full);
    assert_eq!(full, expected);
}

#[test]
fn quarter_turn_about_z_inverts_to_its_transpose() {
    let r = Mat3x3::from_rows(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    );
    assert_eq!(r.inverse(), r.transpose());
    assert_eq!(r.inverse_unscaled().into_unscaled(), r.transpose());

    let r4 = Mat4x4::from_mat3(&r);
    assert_eq!(r4.inverse(), r4.transpose());

    let trig = Mat4x4::from_rotation_z(FRAC_PI_2);
    assert!(glam::Mat4::from(trig.inverse()).abs_diff_eq(trig.transpose().into(), 1e-6));
}

#[test]
fn uniform_scale_inverts_to_reciprocal_scale_on_every_path() {
    let s = 4.0;
    assert_eq!(Mat3x3::from_scale(s).inverse(), Mat3x3::from_scale(0.25));

    let m = Mat4x4::from_scale(Vec3::splat(s));
    let expected = Mat4x4::from_scale(Vec3::splat(0.25));

    let mut fast = Mat4x4::ZERO;
    let mut full = Mat4x4::ZERO;
    affine::inverse(&m, &mut fast);
    general::inverse(&m, &mut full);
    assert_eq!(fast, expected);
    assert_eq!(full, expected);
    assert_eq!(fast, full);

    let slow_config = InverseConfig::default().with_affine_fast_path(false);
    assert_eq!(m.try_inverse_with(&slow_config).unwrap(), expected);
}

#[test]
fn homogeneous_w_of_two_halves_and_negates_translation() {
    let m = Mat4x4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(6.0, -4.0, 1.0, 2.0));
    assert!(m.is_affine_block());

    let inv = m.inverse();
    assert_eq!(inv.cols[3], Vec4::new(-3.0, 2.0, -0.5, 0.5));
    assert_eq!(inv.upper_left(), Mat3x3::IDENTITY);

    let mut full = Mat4x4::ZERO;
    general::inverse(&m, &mut full);
    assert!(glam::Mat4::from(full).abs_diff_eq(inv.into(), 1e-6));
}

#[test]
fn repeated_columns_are_singular_on_checked_paths() {
    let config = InverseConfig::default();

    let c = Vec3::new(1.0, 2.0, 3.0);
    let m3 = Mat3x3::from_cols(c, Vec3::Y, c);
    let mut out3 = Mat3x3::IDENTITY;
    assert!(matches!(
        mat3::try_inverse(&m3, &mut out3, &config),
        Err(InverseError::SingularMatrix { .. })
    ));

    let c4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
    let m4 = Mat4x4::from_cols(c4, c4, Vec4::Z, Vec4::W);
    assert!(matches!(
        m4.try_inverse(),
        Err(InverseError::SingularMatrix { .. })
    ));
    assert!(m4.try_inverse_transpose().is_err());

    // affine shape, singular upper block
    let flat = Mat4x4::from_cols(
        Vec4::new(1.0, 1.0, 0.0, 0.0),
        Vec4::new(1.0, 1.0, 0.0, 0.0),
        Vec4::Z,
        Vec4::W,
    );
    assert!(flat.is_affine_block());
    let mut out4 = Mat4x4::IDENTITY;
    assert!(inverse::try_inverse(&flat, &mut out4, &config).is_err());
    assert_eq!(out4, Mat4x4::IDENTITY);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "singular")]
fn repeated_columns_trip_the_debug_assertion() {
    let c4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
    let _ = Mat4x4::from_cols(c4, c4, Vec4::Z, Vec4::W).inverse();
}

#[test]
fn aliased_platform_buffers_are_refused() {
    let mut m = Mat4x4::from_scale(Vec3::splat(3.0));
    let p: *mut Mat4x4 = &mut m;
    let result = unsafe { inverse::inverse_raw(p, p, &InverseConfig::default()) };
    assert_eq!(result, Err(InverseError::AliasedBuffers));
}

#[test]
fn register_round_trip_for_view_and_normals() {
    let mut register = TransformRegister::new();
    register.apply_look_at(Vec3::new(0.0, -0.00001, 30.0), Vec3::ZERO, Vec3::Z);
    register.translate(0.0, -10.0, -10.0);
    register.apply_rotation_x(std::f32::consts::PI * 0.75 - 0.1);
    register.apply_rotation_y(std::f32::consts::FRAC_PI_4);

    let model_view = register.snapshot();
    let mut inv = Mat4x4::ZERO;
    register.store_inverse(&mut inv);
    let mut inv_t = Mat4x4::ZERO;
    register.store_inverse_transpose(&mut inv_t);

    assert!(glam::Mat4::from(inv * model_view).abs_diff_eq(glam::Mat4::IDENTITY, 1e-4));
    assert!(glam::Mat4::from(inv_t).abs_diff_eq(inv.transpose().into(), 1e-4));

    // rigid model-view: the normal matrix is the rotation itself
    let normal = intsar_xform::normal_matrix(&model_view);
    assert!(glam::Mat3::from(normal).abs_diff_eq(model_view.upper_left().into(), 1e-5));
}
