//! Kinematic character movement
//!
//! Velocity интегрируем сами (как KinematicPositionBased в rapier):
//! - на земле горизонтальная скорость = input × max_walk_speed
//! - в воздухе горизонтальный импульс сохраняется (ultimate отдача)
//! - gravity × gravity_scale пока не grounded
//! - пол: плоскость y = 0 (stub до ground raycast)

use bevy::prelude::*;

use crate::components::{CharacterMovement, ControlRotation, MovementInput};

/// Угол (градусы) между yaw-rotation и −Z
fn yaw_of(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-6 {
        return None;
    }
    // forward = (−sin yaw, 0, −cos yaw)
    Some((-flat.x).atan2(-flat.z).to_degrees())
}

/// Повернуть `current` к `target` не больше чем на `max_step` градусов
pub fn step_yaw_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = (target - current + 180.0).rem_euclid(360.0) - 180.0;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step * delta.signum()
    }
}

/// System: накопленный input → горизонтальная velocity
pub fn apply_movement_input(mut query: Query<(&mut CharacterMovement, &mut MovementInput)>) {
    for (mut movement, mut input) in query.iter_mut() {
        let direction = input.consume();
        if !movement.grounded {
            continue;
        }

        let horizontal = Vec3::new(direction.x, 0.0, direction.z) * movement.max_walk_speed;
        movement.velocity.x = horizontal.x;
        movement.velocity.z = horizontal.z;
    }
}

pub fn apply_gravity(mut query: Query<&mut CharacterMovement>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut movement in query.iter_mut() {
        if !movement.grounded {
            movement.velocity.y -= movement.gravity * movement.gravity_scale * delta;
        }
    }
}

/// System: velocity → Transform (headless, без rapier step)
pub fn integrate_velocity(mut query: Query<(&CharacterMovement, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (movement, mut transform) in query.iter_mut() {
        transform.translation += movement.velocity * delta;
    }
}

/// System: ground stub (y = 0)
pub fn ground_detection(mut query: Query<(&mut CharacterMovement, &mut Transform)>) {
    for (mut movement, mut transform) in query.iter_mut() {
        if transform.translation.y <= 0.0 && movement.velocity.y <= 0.0 {
            transform.translation.y = 0.0;
            movement.velocity.y = 0.0;
            movement.grounded = true;
        } else if transform.translation.y > 0.0 {
            movement.grounded = false;
        }
    }
}

/// System: yaw персонажа (controller yaw или направление движения)
pub fn orient_character(
    mut query: Query<(&CharacterMovement, &ControlRotation, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (movement, control, mut transform) in query.iter_mut() {
        if movement.use_controller_yaw {
            transform.rotation = control.yaw_quat();
            continue;
        }

        if !movement.orient_rotation_to_movement {
            continue;
        }

        let Some(target) = yaw_of(movement.velocity) else {
            continue;
        };
        let Some(current) = yaw_of(*transform.forward()) else {
            continue;
        };

        let yaw = step_yaw_towards(current, target, movement.rotation_rate * delta);
        transform.rotation = Quat::from_rotation_y(yaw.to_radians());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_of_matches_control_rotation() {
        let control = ControlRotation { yaw: 90.0, pitch: 0.0 };
        let yaw = yaw_of(control.yaw_forward()).unwrap();
        assert!((yaw - 90.0).abs() < 1e-3);
        assert!(yaw_of(Vec3::Y).is_none());
    }

    #[test]
    fn test_step_yaw_takes_short_way() {
        assert_eq!(step_yaw_towards(170.0, -170.0, 5.0), 175.0);
        assert_eq!(step_yaw_towards(10.0, 0.0, 90.0), 0.0);
        assert_eq!(step_yaw_towards(0.0, 90.0, 30.0), 30.0);
    }
}
