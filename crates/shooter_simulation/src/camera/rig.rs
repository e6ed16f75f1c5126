//! Camera boom геометрия + screen → world deprojection
//!
//! Оси Bevy: −Z forward, +Y up, +X right. Arm тянется назад (+Z)
//! от pivot'а персонажа в пространстве control rotation.

use bevy::prelude::*;

use crate::components::{CameraRig, ControlRotation, FollowCamera};

/// Размер viewport'а (пиксели)
///
/// Host обновляет при resize; headless → 1920×1080.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// World transform конца arm'а (до локального offset камеры)
pub fn arm_end(pivot: &Transform, control: &ControlRotation, rig: &CameraRig) -> Transform {
    let rotation = control.to_quat();
    let origin = pivot.translation + Vec3::Y * rig.pivot_height;
    let local = Vec3::Z * rig.arm_length + rig.socket_offset;
    Transform::from_translation(origin + rotation * local).with_rotation(rotation)
}

/// World transform follow camera
pub fn camera_world_transform(
    pivot: &Transform,
    control: &ControlRotation,
    rig: &CameraRig,
    camera: &FollowCamera,
) -> Transform {
    let end = arm_end(pivot, control, rig);
    Transform::from_translation(end.translation + end.rotation * camera.local_position)
        .with_rotation(end.rotation * camera.local_rotation)
}

/// Screen point → world ray (origin, direction)
///
/// `fov_degrees`: горизонтальный FOV. `None` для вырожденного viewport'а.
pub fn deproject_screen_to_world(
    screen: Vec2,
    viewport: &Viewport,
    camera: &Transform,
    fov_degrees: f32,
) -> Option<(Vec3, Vec3)> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }

    let ndc_x = 2.0 * screen.x / viewport.width - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y / viewport.height;

    let tan_h = (fov_degrees.to_radians() * 0.5).tan();
    let tan_v = tan_h * viewport.height / viewport.width;

    let local = Vec3::new(ndc_x * tan_h, ndc_y * tan_v, -1.0).normalize_or_zero();
    let direction = (camera.rotation * local).normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    Some((camera.translation, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_behind_character() {
        let pivot = Transform::from_xyz(0.0, 100.0, 0.0);
        let rig = CameraRig {
            arm_length: 300.0,
            socket_offset: Vec3::new(50.0, 50.0, 0.0),
            pivot_height: 0.0,
        };

        let end = arm_end(&pivot, &ControlRotation::default(), &rig);
        assert!(end.translation.abs_diff_eq(Vec3::new(50.0, 150.0, 300.0), 1e-4));
    }

    #[test]
    fn test_arm_follows_control_yaw() {
        let rig = CameraRig {
            arm_length: 300.0,
            socket_offset: Vec3::ZERO,
            pivot_height: 0.0,
        };
        let control = ControlRotation { yaw: 90.0, pitch: 0.0 };

        // forward = −X → arm тянется в +X
        let end = arm_end(&Transform::IDENTITY, &control, &rig);
        assert!(end.translation.abs_diff_eq(Vec3::new(300.0, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn test_aim_offset_moves_camera_forward() {
        let rig = CameraRig {
            arm_length: 300.0,
            socket_offset: Vec3::ZERO,
            pivot_height: 0.0,
        };
        let camera = FollowCamera {
            local_position: Vec3::new(0.0, 40.0, -180.0),
            ..Default::default()
        };

        let world = camera_world_transform(&Transform::IDENTITY, &ControlRotation::default(), &rig, &camera);
        assert!(world.translation.abs_diff_eq(Vec3::new(0.0, 40.0, 120.0), 1e-4));
    }

    #[test]
    fn test_viewport_centre_deprojects_to_camera_forward() {
        let viewport = Viewport::default();
        let camera = Transform::from_xyz(10.0, 20.0, 30.0)
            .with_rotation(Quat::from_rotation_y(0.7));

        let (origin, direction) =
            deproject_screen_to_world(viewport.centre(), &viewport, &camera, 90.0).unwrap();

        assert_eq!(origin, camera.translation);
        assert!(direction.abs_diff_eq(*camera.forward(), 1e-5));
    }

    #[test]
    fn test_right_edge_matches_half_fov() {
        let viewport = Viewport::default();
        let (_, direction) = deproject_screen_to_world(
            Vec2::new(viewport.width, viewport.height * 0.5),
            &viewport,
            &Transform::IDENTITY,
            90.0,
        )
        .unwrap();

        // 45° вправо от −Z
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!(direction.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_degenerate_viewport() {
        let viewport = Viewport { width: 0.0, height: 1080.0 };
        assert!(deproject_screen_to_world(Vec2::ZERO, &viewport, &Transform::IDENTITY, 90.0).is_none());
    }
}
