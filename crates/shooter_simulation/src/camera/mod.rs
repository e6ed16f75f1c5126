//! Camera domain: boom + aim zoom + viewport deprojection
//!
//! Camera сама ничего не рендерит: `CameraView`: world transform + FOV,
//! который host применяет к своей камере, а crosshair trace использует
//! для deprojection центра экрана.

use bevy::prelude::*;

pub mod interp;
pub mod rig;
pub mod systems;

pub use interp::*;
pub use rig::*;
pub use systems::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>().add_systems(
            Update,
            (camera_interp, update_camera_view)
                .chain()
                .in_set(crate::GameplaySet::Camera),
        );
    }
}
