// Scene module for IntSar-xform

use log::{debug, warn};

use crate::config::InverseConfig;
use crate::error::Result;
use crate::math::Transform;
use crate::matrix::{Mat3x3, Mat4x4};
use crate::register::TransformRegister;
use crate::vector::Vec3;

/// Represents an object within the 3D scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
}

impl SceneObject {
    /// Creates a new scene object with a given name and transform.
    pub fn new(name: String, transform: Transform) -> Self {
        Self { name, transform }
    }

    /// Derives this object's per-frame matrices through `register`.
    ///
    /// The register ends up holding the object's MVP, ready for vertex
    /// transforms.
    pub fn frame_transforms(
        &self,
        camera: &Camera,
        register: &mut TransformRegister,
        config: &InverseConfig,
    ) -> Result<FrameTransforms> {
        register.init_identity();
        register.apply(&camera.view());
        register.apply(&self.transform.matrix());

        let mut model_view = Mat4x4::ZERO;
        register.store(&mut model_view);

        let mut inverse_transpose = Mat4x4::ZERO;
        register.try_store_inverse_transpose(&mut inverse_transpose, config)?;

        register.init_identity();
        register.apply(&camera.projection());
        register.apply(&model_view);

        Ok(FrameTransforms {
            model_view,
            normal: inverse_transpose.upper_left(),
            mvp: register.snapshot(),
        })
    }
}

/// Matrices one object needs for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub model_view: Mat4x4,
    /// transpose(inverse(model_view)), upper-left block.
    pub normal: Mat3x3,
    pub mvp: Mat4x4,
}

impl FrameTransforms {
    /// View-space normal, renormalized.
    pub fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.normal.mul_vec3(normal).normalize_or_zero()
    }
}

/// A right-handed perspective camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view(&self) -> Mat4x4 {
        glam::Mat4::look_at_rh(self.eye, self.target, self.up).into()
    }

    pub fn projection(&self) -> Mat4x4 {
        glam::Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far).into()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Represents the entire 3D scene.
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub camera: Camera,
}

impl Scene {
    /// Creates a new, empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Gets a mutable reference to an object by name.
    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    /// Gets an immutable reference to an object by name.
    pub fn get_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Frame matrices for every object that can be lit.
    ///
    /// Objects whose model-view cannot be inverted (a zero scale axis) are
    /// skipped with a warning instead of poisoning the frame with NaNs.
    pub fn frame_transforms(
        &self,
        register: &mut TransformRegister,
        config: &InverseConfig,
    ) -> Vec<(&str, FrameTransforms)> {
        let mut frames = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            match object.frame_transforms(&self.camera, register, config) {
                Ok(frame) => {
                    debug!("{}: model-view {:?}", object.name, frame.model_view);
                    frames.push((object.name.as_str(), frame));
                }
                Err(err) => warn!("skipping {}: {}", object.name, err),
            }
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new("cube".into(), Transform::identity()));
        scene.add_object(SceneObject::new(
            "teapot".into(),
            Transform::new(
                Vec3::new(0.0, -1.0, -2.0),
                Quat::from_rotation_x(0.75),
                Vec3::new(1.0, 3.0, 1.0),
            ),
        ));
        scene
    }

    #[test]
    fn lookup_by_name() {
        let mut scene = scene();
        assert!(scene.get_object("teapot").is_some());
        assert!(scene.get_object("missing").is_none());
        scene.get_object_mut("cube").unwrap().transform.position = Vec3::X;
        assert_eq!(scene.get_object("cube").unwrap().transform.position, Vec3::X);
    }

    #[test]
    fn frame_transforms_compose_view_and_projection() {
        let scene = scene();
        let mut register = TransformRegister::new();
        let frames = scene.frame_transforms(&mut register, &InverseConfig::default());
        assert_eq!(frames.len(), 2);

        let (name, frame) = frames[1];
        assert_eq!(name, "teapot");
        let model = scene.objects[1].transform.matrix();
        let expected_mv = scene.camera.view() * model;
        assert!(glam::Mat4::from(frame.model_view).abs_diff_eq(expected_mv.into(), 1e-5));

        let expected_mvp = scene.camera.projection() * expected_mv;
        assert!(glam::Mat4::from(frame.mvp).abs_diff_eq(expected_mvp.into(), 1e-4));
        assert_eq!(register.snapshot(), frame.mvp);
    }

    #[test]
    fn normals_stay_perpendicular_in_view_space() {
        let scene = scene();
        let mut register = TransformRegister::new();
        let frames = scene.frame_transforms(&mut register, &InverseConfig::default());
        let (_, frame) = frames[1];

        // surface spanned by X and Y has normal Z
        let tx = frame.model_view.transform_vector3(Vec3::X);
        let ty = frame.model_view.transform_vector3(Vec3::Y);
        let n = frame.transform_normal(Vec3::Z);
        assert!(n.dot(tx).abs() < 1e-5);
        assert!(n.dot(ty).abs() < 1e-5);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flattened_objects_are_skipped() {
        let mut scene = scene();
        scene.add_object(SceneObject::new(
            "decal".into(),
            Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::new(1.0, 1.0, 0.0)),
        ));
        let mut register = TransformRegister::new();
        let frames = scene.frame_transforms(&mut register, &InverseConfig::default());
        let names: Vec<_> = frames.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["cube", "teapot"]);
    }
}
