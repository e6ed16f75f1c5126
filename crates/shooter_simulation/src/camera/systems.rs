//! Camera systems

use bevy::prelude::*;

use super::interp::{interp_f32, interp_quat, interp_vec3};
use super::rig::camera_world_transform;
use crate::components::{AimState, CameraRig, CameraView, CameraZoom, ControlRotation, FollowCamera};

/// System: aim zoom interpolation (каждый tick, без snap)
pub fn camera_interp(
    time: Res<Time>,
    mut cameras: Query<(&AimState, &CameraZoom, &mut FollowCamera)>,
) {
    let dt = time.delta_secs();

    for (aim, zoom, mut camera) in cameras.iter_mut() {
        let target = zoom.target(aim.is_aiming);

        camera.local_position = interp_vec3(camera.local_position, target.offset, dt, zoom.interp_speed);
        camera.local_rotation = interp_quat(camera.local_rotation, target.rotation, dt, zoom.interp_speed);
        camera.fov = interp_f32(camera.fov, target.fov, dt, zoom.interp_speed);
    }
}

/// System: world transform камеры для traces и host'а
pub fn update_camera_view(
    mut rigs: Query<(&Transform, &ControlRotation, &CameraRig, &FollowCamera, &mut CameraView)>,
) {
    for (pivot, control, rig, camera, mut view) in rigs.iter_mut() {
        view.transform = camera_world_transform(pivot, control, rig, camera);
        view.fov = camera.fov;
    }
}
