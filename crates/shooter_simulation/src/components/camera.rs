//! Camera rig: boom (spring arm) + follow camera + aim flag

use bevy::prelude::*;

use crate::config::CameraTuning;

/// Spring arm за спиной персонажа
///
/// Вращается по `ControlRotation`; camera сидит на конце arm'а
/// со смещением `socket_offset` (over-the-shoulder).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    pub arm_length: f32,
    pub socket_offset: Vec3,
    /// Высота pivot'а над origin персонажа (центр capsule)
    pub pivot_height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_tuning(&CameraTuning::default())
    }
}

impl CameraRig {
    pub fn from_tuning(tuning: &CameraTuning) -> Self {
        Self {
            arm_length: tuning.arm_length,
            socket_offset: tuning.socket_offset(),
            pivot_height: tuning.pivot_height,
        }
    }
}

/// Follow camera на конце boom'а
///
/// `local_*`: относительно конца arm'а; интерполируются каждый tick
/// к aim/hip targets (см. `camera::interp`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FollowCamera {
    pub local_position: Vec3,
    pub local_rotation: Quat,
    /// Горизонтальный FOV (градусы)
    pub fov: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
            fov: 90.0,
        }
    }
}

/// Target pose follow camera (относительно конца arm'а)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraPose {
    pub offset: Vec3,
    pub rotation: Quat,
    pub fov: f32,
}

impl CameraPose {
    /// `rotation`: (pitch, yaw, roll) в градусах
    pub fn new(offset: [f32; 3], rotation: [f32; 3], fov: f32) -> Self {
        let [pitch, yaw, roll] = rotation;
        Self {
            offset: Vec3::from_array(offset),
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                yaw.to_radians(),
                pitch.to_radians(),
                roll.to_radians(),
            ),
            fov,
        }
    }
}

/// Aim/hip targets + скорость интерполяции
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraZoom {
    pub aim: CameraPose,
    pub hip: CameraPose,
    pub interp_speed: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self::from_tuning(&CameraTuning::default())
    }
}

impl CameraZoom {
    pub fn from_tuning(tuning: &CameraTuning) -> Self {
        Self {
            aim: CameraPose::new(tuning.aim_offset, tuning.aim_rotation, tuning.aim_fov),
            hip: CameraPose::new(tuning.hip_offset, tuning.hip_rotation, tuning.hip_fov),
            interp_speed: tuning.zoom_interp_speed,
        }
    }

    pub fn target(&self, aiming: bool) -> CameraPose {
        if aiming {
            self.aim
        } else {
            self.hip
        }
    }
}

/// World transform follow camera (пересчитывается каждый tick)
///
/// Отсюда берутся crosshair traces; host ставит сюда свою камеру.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraView {
    pub transform: Transform,
    pub fov: f32,
}

/// Aiming flag (удерживается action "Aiming")
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AimState {
    pub is_aiming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_targets_from_tuning() {
        let zoom = CameraZoom::default();

        let aim = zoom.target(true);
        assert_eq!(aim.offset, Vec3::new(0.0, 40.0, -180.0));
        assert_eq!(aim.rotation, Quat::IDENTITY);
        assert_eq!(aim.fov, 75.0);

        let hip = zoom.target(false);
        assert_eq!(hip.offset, Vec3::ZERO);
        assert_eq!(hip.fov, 90.0);
        assert_eq!(zoom.interp_speed, 5.0);
    }
}
