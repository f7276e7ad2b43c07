// Matrix types for IntSar-xform
//
// Both types are column-major: `cols[c]` is column `c` and `cols[c][r]` is the
// entry in row `r`. The bottom row of a `Mat4x4` is therefore
// `(cols[0].w, cols[1].w, cols[2].w, cols[3].w)` and the translation lives in
// `cols[3].xyz`.

use std::ops::{Index, IndexMut, Mul};

use crate::vector::{Vec3, Vec4};

/// A 3x3 column-major matrix, aligned for the platform's vector loads.
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3x3 {
    pub cols: [Vec3; 3],
}

/// A 4x4 column-major matrix, aligned for the platform's vector loads.
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4x4 {
    pub cols: [Vec4; 4],
}

impl Mat3x3 {
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Builds a matrix from nine column-major floats.
    pub fn from_cols_array(m: &[f32; 9]) -> Self {
        Self::from_cols(
            Vec3::new(m[0], m[1], m[2]),
            Vec3::new(m[3], m[4], m[5]),
            Vec3::new(m[6], m[7], m[8]),
        )
    }

    pub fn to_cols_array(&self) -> [f32; 9] {
        let [c0, c1, c2] = self.cols;
        [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z]
    }

    /// Builds a matrix from rows, for tests and literals written row by row.
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(r0.x, r1.x, r2.x),
            Vec3::new(r0.y, r1.y, r2.y),
            Vec3::new(r0.z, r1.z, r2.z),
        )
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vec3 {
        self.cols[index]
    }

    #[inline]
    pub fn row(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
        )
    }

    pub fn from_diagonal(diagonal: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(diagonal.x, 0.0, 0.0),
            Vec3::new(0.0, diagonal.y, 0.0),
            Vec3::new(0.0, 0.0, diagonal.z),
        )
    }

    pub fn from_scale(s: f32) -> Self {
        Self::from_diagonal(Vec3::splat(s))
    }

    pub fn from_rotation_x(angle: f32) -> Self {
        glam::Mat3::from_rotation_x(angle).into()
    }

    pub fn from_rotation_y(angle: f32) -> Self {
        glam::Mat3::from_rotation_y(angle).into()
    }

    pub fn from_rotation_z(angle: f32) -> Self {
        glam::Mat3::from_rotation_z(angle).into()
    }

    /// `dot(col0, cross(col1, col2))`.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.cols[0].dot(self.cols[1].cross(self.cols[2]))
    }

    #[inline]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Multiplies every column by `s`.
    #[inline]
    pub fn scaled(&self, s: f32) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s, self.cols[2] * s)
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|c| c.is_finite())
    }
}

impl Default for Mat3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4x4 {
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO; 4],
    };

    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Builds a matrix from sixteen column-major floats.
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        Self::from_cols(
            Vec4::new(m[0], m[1], m[2], m[3]),
            Vec4::new(m[4], m[5], m[6], m[7]),
            Vec4::new(m[8], m[9], m[10], m[11]),
            Vec4::new(m[12], m[13], m[14], m[15]),
        )
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        *bytemuck::cast_ref(self)
    }

    /// Builds a matrix from rows, for tests and literals written row by row.
    pub fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        let mut m = Self::from_cols(r0, r1, r2, r3);
        m.transpose_in_place();
        m
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vec4 {
        self.cols[index]
    }

    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    /// `(cols[0].w, cols[1].w, cols[2].w, cols[3].w)`.
    #[inline]
    pub fn bottom_row(&self) -> Vec4 {
        self.row(3)
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Bottom row is `(0, 0, 0, w)` with `w != 0`.
    ///
    /// Reads the `w` lane of each column. A row-major matrix handed over by
    /// mistake keeps its translation in exactly these lanes and fails the test.
    #[inline]
    pub fn is_affine_block(&self) -> bool {
        self.cols[0].w == 0.0
            && self.cols[1].w == 0.0
            && self.cols[2].w == 0.0
            && self.cols[3].w != 0.0
    }

    /// Upper-left 3x3 block.
    #[inline]
    pub fn upper_left(&self) -> Mat3x3 {
        Mat3x3::from_cols(
            self.cols[0].truncate(),
            self.cols[1].truncate(),
            self.cols[2].truncate(),
        )
    }

    /// Embeds `m` in the upper-left block, identity elsewhere.
    pub fn from_mat3(m: &Mat3x3) -> Self {
        Self::from_cols(
            m.cols[0].extend(0.0),
            m.cols[1].extend(0.0),
            m.cols[2].extend(0.0),
            Vec4::W,
        )
    }

    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = t.extend(1.0);
        m
    }

    pub fn from_scale(s: Vec3) -> Self {
        Self::from_mat3(&Mat3x3::from_diagonal(s))
    }

    pub fn from_rotation_x(angle: f32) -> Self {
        glam::Mat4::from_rotation_x(angle).into()
    }

    pub fn from_rotation_y(angle: f32) -> Self {
        glam::Mat4::from_rotation_y(angle).into()
    }

    pub fn from_rotation_z(angle: f32) -> Self {
        glam::Mat4::from_rotation_z(angle).into()
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut m = *self;
        m.transpose_in_place();
        m
    }

    pub fn transpose_in_place(&mut self) {
        for c in 0..4 {
            for r in (c + 1)..4 {
                let upper = self.cols[c][r];
                self.cols[c][r] = self.cols[r][c];
                self.cols[r][c] = upper;
            }
        }
    }

    #[inline]
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }

    /// Transforms a point (`w = 1`) without the perspective divide.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(p.extend(1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        self.mul_vec4(v.extend(0.0)).truncate()
    }

    #[inline]
    pub fn scaled(&self, s: f32) -> Self {
        Self::from_cols(
            self.cols[0] * s,
            self.cols[1] * s,
            self.cols[2] * s,
            self.cols[3] * s,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|c| c.is_finite())
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, rhs: Mat3x3) -> Mat3x3 {
        Mat3x3::from_cols(
            self.mul_vec3(rhs.cols[0]),
            self.mul_vec3(rhs.cols[1]),
            self.mul_vec3(rhs.cols[2]),
        )
    }
}

impl Mul<Vec3> for Mat3x3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}

impl Mul<Mat4x4> for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Mat4x4 {
        Mat4x4::from_cols(
            self.mul_vec4(rhs.cols[0]),
            self.mul_vec4(rhs.cols[1]),
            self.mul_vec4(rhs.cols[2]),
            self.mul_vec4(rhs.cols[3]),
        )
    }
}

impl Mul<Vec4> for Mat4x4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mul_vec4(rhs)
    }
}

impl Index<usize> for Mat3x3 {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat3x3 {
    fn index_mut(&mut self, index: usize) -> &mut Vec3 {
        &mut self.cols[index]
    }
}

impl Index<usize> for Mat4x4 {
    type Output = Vec4;

    fn index(&self, index: usize) -> &Vec4 {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat4x4 {
    fn index_mut(&mut self, index: usize) -> &mut Vec4 {
        &mut self.cols[index]
    }
}

impl From<glam::Mat3> for Mat3x3 {
    fn from(m: glam::Mat3) -> Self {
        Self::from_cols(m.x_axis, m.y_axis, m.z_axis)
    }
}

impl From<Mat3x3> for glam::Mat3 {
    fn from(m: Mat3x3) -> Self {
        glam::Mat3::from_cols(m.cols[0], m.cols[1], m.cols[2])
    }
}

impl From<glam::Mat4> for Mat4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols(m.x_axis, m.y_axis, m.z_axis, m.w_axis)
    }
}

impl From<Mat4x4> for glam::Mat4 {
    fn from(m: Mat4x4) -> Self {
        glam::Mat4::from_cols(m.cols[0], m.cols[1], m.cols[2], m.cols[3])
    }
}
