// IntSar-xform: headless frame loop deriving view and normal transforms

use glam::Quat;
use log::{debug, info, warn};

use intsar_xform::math::Transform;
use intsar_xform::scene::{Scene, SceneObject};
use intsar_xform::vector::{clamp01, reflect};
use intsar_xform::{InverseConfig, Mat4x4, TransformRegister, Vec3};

const FRAMES: u32 = 4;
const FRAME_TIME: f32 = 0.016; // ~60 FPS
const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.95, 0.8);

fn log_matrix(label: &str, m: &Mat4x4) {
    info!("{label}:");
    for r in 0..4 {
        let row = m.row(r);
        info!(
            " |{:12.4} |{:12.4} |{:12.4} |{:12.4} |",
            row.x, row.y, row.z, row.w
        );
    }
}

fn main() {
    // Initialize logging
    env_logger::init();

    let mut scene = Scene::new();
    scene.camera.eye = Vec3::new(0.0, -0.00001, 30.0);
    scene.camera.up = Vec3::Z;
    scene.add_object(SceneObject::new(
        "cube".into(),
        Transform::new(
            Vec3::new(0.0, -10.0, -10.0),
            Quat::IDENTITY,
            Vec3::splat(2.0),
        ),
    ));
    scene.add_object(SceneObject::new(
        "teapot".into(),
        Transform::new(Vec3::new(4.0, 0.0, 0.0), Quat::IDENTITY, Vec3::new(1.0, 1.0, 0.6)),
    ));

    let config = InverseConfig::default();
    let mut register = TransformRegister::new();

    for frame in 0..FRAMES {
        let elapsed = frame as f32 * FRAME_TIME * 30.0;
        if let Some(cube) = scene.get_object_mut("cube") {
            cube.transform.rotation = Quat::from_rotation_x(elapsed + std::f32::consts::PI * 0.75 - 0.1)
                * Quat::from_rotation_y(elapsed + std::f32::consts::FRAC_PI_4);
        }

        for (name, transforms) in scene.frame_transforms(&mut register, &config) {
            if frame == 0 {
                log_matrix(&format!("{name} MVP"), &transforms.mvp);
                log_matrix(&format!("{name} model-view"), &transforms.model_view);
            }
            let up = transforms.transform_normal(Vec3::Z);
            info!("frame {frame}: {name} view-space up normal {up:?}");

            // headlight shining down -Z in view space
            let to_light = Vec3::Z;
            let diffuse = clamp01(LIGHT_COLOR * up.dot(to_light).max(0.0) * 1.2);
            let mirror = reflect(-to_light, up);
            debug!("frame {frame}: {name} diffuse {diffuse:?}, reflected {mirror:?}");
        }

        // the camera's world position, recovered from the view matrix
        match scene.camera.view().try_inverse_with(&config) {
            Ok(camera_to_world) => info!(
                "frame {frame}: eye at {:?}",
                camera_to_world.transform_point3(Vec3::ZERO)
            ),
            Err(err) => warn!("frame {frame}: view matrix not invertible: {err}"),
        }
    }
}
