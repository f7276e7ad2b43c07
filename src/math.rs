// Math utilities for IntSar-xform

use glam::Quat;

use crate::error::Result;
use crate::inverse_transpose;
use crate::matrix::{Mat3x3, Mat4x4};
use crate::vector::Vec3;

/// Represents a 3D transformation
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Create a new transform
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4x4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
            .into()
    }

    /// World-to-object matrix. Always affine, so this takes the block path.
    pub fn inverse_matrix(&self) -> Result<Mat4x4> {
        self.matrix().try_inverse()
    }

    /// Matrix for object-space normals, transpose(inverse(M)) of the 3x3 part.
    ///
    /// Fails when a scale component is zero.
    pub fn normal_matrix(&self) -> Result<Mat3x3> {
        let mut out = Mat4x4::ZERO;
        inverse_transpose::try_inverse_transpose(&self.matrix(), &mut out, &Default::default())?;
        Ok(out.upper_left())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
