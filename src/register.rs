// Active transform register for IntSar-xform
//
// The platform keeps one "current transform" that scene code builds up with
// translate/rotate/apply calls and then reads back for projection and lighting.
// Here it is an ordinary value owned by whoever drives the frame: mutation
// needs `&mut self`, so two mutators cannot race without an explicit lock.

use log::trace;

use crate::config::InverseConfig;
use crate::error::{InverseError, Result};
use crate::inverse;
use crate::inverse_transpose;
use crate::mat3::{self, DirectionInverse};
use crate::matrix::{Mat3x3, Mat4x4};
use crate::vector::{Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformRegister {
    active: Mat4x4,
}

impl TransformRegister {
    /// A register holding the identity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrix(m: &Mat4x4) -> Self {
        Self { active: *m }
    }

    // --- loading ---

    pub fn init_identity(&mut self) {
        self.active = Mat4x4::IDENTITY;
    }

    pub fn load(&mut self, m: &Mat4x4) {
        trace!("register load {:?}", m);
        self.active = *m;
    }

    /// Loads `m` into the upper-left block; the rest becomes identity.
    pub fn load_3x3(&mut self, m: &Mat3x3) {
        trace!("register load 3x3 {:?}", m);
        self.active = Mat4x4::from_mat3(m);
    }

    pub fn load_transpose(&mut self, m: &Mat4x4) {
        self.active = m.transpose();
    }

    // --- reading ---

    pub fn store(&self, out: &mut Mat4x4) {
        *out = self.active;
    }

    pub fn store_3x3(&self, out: &mut Mat3x3) {
        *out = self.active.upper_left();
    }

    pub fn snapshot(&self) -> Mat4x4 {
        self.active
    }

    /// Row `index` of the active matrix.
    ///
    /// Panics past row 3 in every build profile (vector indexing is
    /// bounds-checked); [`Self::try_read_row`] reports it instead.
    pub fn read_row(&self, index: usize) -> Vec4 {
        self.active.row(index)
    }

    pub fn try_read_row(&self, index: usize) -> Result<Vec4> {
        if index < 4 {
            Ok(self.active.row(index))
        } else {
            Err(InverseError::RowOutOfRange { index })
        }
    }

    // --- inverses of the active state ---

    /// Inverse of the upper-left 3x3, unchecked.
    pub fn inverse_3x3(&self, out: &mut Mat3x3) {
        mat3::inverse(&self.active.upper_left(), out);
    }

    /// Adjugate of the upper-left 3x3, for directions that get renormalized.
    pub fn inverse_3x3_unscaled(&self) -> DirectionInverse {
        self.active.upper_left().inverse_unscaled()
    }

    pub fn try_inverse_3x3(&self, out: &mut Mat3x3, config: &InverseConfig) -> Result<()> {
        mat3::try_inverse(&self.active.upper_left(), out, config)
    }

    pub fn store_inverse(&self, out: &mut Mat4x4) {
        inverse::inverse(&self.active, out);
    }

    pub fn try_store_inverse(&self, out: &mut Mat4x4, config: &InverseConfig) -> Result<()> {
        inverse::try_inverse(&self.active, out, config)
    }

    pub fn store_inverse_transpose(&self, out: &mut Mat4x4) {
        inverse_transpose::inverse_transpose(&self.active, out);
    }

    pub fn try_store_inverse_transpose(
        &self,
        out: &mut Mat4x4,
        config: &InverseConfig,
    ) -> Result<()> {
        inverse_transpose::try_inverse_transpose(&self.active, out, config)
    }

    // --- building up the active state (post-multiplied) ---

    /// `active = active * m`.
    pub fn apply(&mut self, m: &Mat4x4) {
        self.active = self.active * *m;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.apply(&Mat4x4::from_translation(Vec3::new(x, y, z)));
    }

    pub fn apply_scale(&mut self, x: f32, y: f32, z: f32) {
        self.apply(&Mat4x4::from_scale(Vec3::new(x, y, z)));
    }

    pub fn apply_rotation_x(&mut self, angle: f32) {
        self.apply(&Mat4x4::from_rotation_x(angle));
    }

    pub fn apply_rotation_y(&mut self, angle: f32) {
        self.apply(&Mat4x4::from_rotation_y(angle));
    }

    pub fn apply_rotation_z(&mut self, angle: f32) {
        self.apply(&Mat4x4::from_rotation_z(angle));
    }

    /// Right-handed OpenGL-style perspective, `fov_y` in radians.
    pub fn apply_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.apply(&glam::Mat4::perspective_rh_gl(fov_y, aspect, near, far).into());
    }

    /// Right-handed view matrix looking from `eye` at `target`.
    pub fn apply_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.apply(&glam::Mat4::look_at_rh(eye, target, up).into());
    }

    // --- transforming through the active state ---

    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        self.active.mul_vec4(v)
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.active.transform_point3(p)
    }

    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.active.transform_vector3(d)
    }
}
