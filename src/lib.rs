// IntSar-xform: transpose and inverse kernels for 3x3 and 4x4 matrices
//
// The pure routines (`mat3`, `affine`, `general`, `inverse_transpose`,
// `inverse`) take caller-owned buffers and never allocate. The only mutable
// state lives in `register::TransformRegister`, owned by whoever drives the
// frame.

pub mod affine;
pub mod config;
pub mod error;
pub mod general;
pub mod inverse;
pub mod inverse_transpose;
pub mod mat3;
pub mod math;
pub mod matrix;
pub mod register;
pub mod scene;
pub mod vector;

pub use config::InverseConfig;
pub use error::InverseError;
pub use inverse_transpose::normal_matrix;
pub use mat3::DirectionInverse;
pub use matrix::{Mat3x3, Mat4x4};
pub use register::TransformRegister;
pub use vector::{Vec3, Vec4};
