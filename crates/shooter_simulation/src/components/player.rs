//! Player control: marker, controller (input gate), control rotation

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` filter.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Controller, владеющий персонажем
///
/// `input_enabled == false` → все axis/action события игнорируются
/// (ultimate ability выключает input на время montage).
/// Персонаж без `PlayerController` = "controller не существует":
/// movement input не применяется, ultimate не трогает input.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub input_enabled: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self { input_enabled: true }
    }
}

impl PlayerController {
    pub fn disable_input(&mut self) {
        self.input_enabled = false;
    }

    pub fn enable_input(&mut self) {
        self.input_enabled = true;
    }
}

/// Control rotation контроллера (градусы)
///
/// Camera boom вращается по ней; movement берёт только yaw.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees).rem_euclid(360.0);
    }

    pub fn add_pitch(&mut self, degrees: f32, limit: f32) {
        self.pitch = (self.pitch + degrees).clamp(-limit, limit);
    }

    /// Yaw-only rotation (для movement направлений)
    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Полная rotation (yaw, затем pitch) для camera boom
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), self.pitch.to_radians(), 0.0)
    }

    /// Forward по yaw (Bevy forward = −Z)
    pub fn yaw_forward(&self) -> Vec3 {
        self.yaw_quat() * Vec3::NEG_Z
    }

    pub fn yaw_right(&self) -> Vec3 {
        self.yaw_quat() * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_default_enabled() {
        let mut controller = PlayerController::default();
        assert!(controller.input_enabled);

        controller.disable_input();
        assert!(!controller.input_enabled);

        controller.enable_input();
        assert!(controller.input_enabled);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut rotation = ControlRotation::default();
        rotation.add_pitch(120.0, 89.0);
        assert_eq!(rotation.pitch, 89.0);

        rotation.add_pitch(-500.0, 89.0);
        assert_eq!(rotation.pitch, -89.0);
    }

    #[test]
    fn test_yaw_axes() {
        let mut rotation = ControlRotation::default();
        assert!(rotation.yaw_forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(rotation.yaw_right().abs_diff_eq(Vec3::X, 1e-5));

        // +90° yaw (против часовой сверху) → forward смотрит в −X
        rotation.add_yaw(90.0);
        assert!(rotation.yaw_forward().abs_diff_eq(Vec3::NEG_X, 1e-5));

        rotation.add_yaw(-450.0);
        assert!((rotation.yaw - 0.0).abs() < 1e-4);
    }
}
