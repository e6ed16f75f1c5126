//! Movement компоненты: kinematic character movement + накопленный input

use bevy::prelude::*;

use crate::config::CharacterTuning;

/// Character movement (kinematic, velocity интегрируем сами)
///
/// `gravity_scale` и `mass` также масштабируют ultimate impulse.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterMovement {
    pub velocity: Vec3,
    pub max_walk_speed: f32,
    pub gravity: f32,
    pub gravity_scale: f32,
    pub mass: f32,
    /// deg/sec
    pub rotation_rate: f32,
    pub use_controller_yaw: bool,
    pub orient_rotation_to_movement: bool,
    pub grounded: bool,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self::from_tuning(&CharacterTuning::default())
    }
}

impl CharacterMovement {
    pub fn from_tuning(tuning: &CharacterTuning) -> Self {
        Self {
            velocity: Vec3::ZERO,
            max_walk_speed: tuning.max_walk_speed,
            gravity: tuning.gravity,
            gravity_scale: tuning.gravity_scale,
            mass: tuning.mass,
            rotation_rate: tuning.rotation_rate,
            use_controller_yaw: tuning.use_controller_yaw,
            orient_rotation_to_movement: tuning.orient_rotation_to_movement,
            grounded: true,
        }
    }

    /// Impulse как velocity change: Δv = impulse / mass
    pub fn add_impulse(&mut self, impulse: Vec3) {
        if self.mass <= f32::EPSILON {
            self.velocity += impulse;
        } else {
            self.velocity += impulse / self.mass;
        }
        if impulse.y > 0.0 {
            self.grounded = false;
        }
    }
}

/// Capsule персонажа (origin entity = ступни, центр capsule на `half_height`)
///
/// Используется overlap detection (scene backend) и rapier collider'ом.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PawnCapsule {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for PawnCapsule {
    fn default() -> Self {
        Self {
            radius: 34.0,
            half_height: 88.0,
        }
    }
}

impl PawnCapsule {
    /// Ось capsule (нижний и верхний центры полусфер) в world space
    pub fn segment(&self, feet: Vec3) -> (Vec3, Vec3) {
        let straight = (self.half_height - self.radius).max(0.0);
        let centre = feet + Vec3::Y * self.half_height;
        (centre - Vec3::Y * straight, centre + Vec3::Y * straight)
    }

    /// Пересекает ли capsule сферу
    pub fn intersects_sphere(&self, feet: Vec3, centre: Vec3, radius: f32) -> bool {
        let (a, b) = self.segment(feet);
        let ab = b - a;
        let t = if ab.length_squared() > f32::EPSILON {
            ((centre - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = a + ab * t;
        closest.distance(centre) <= radius + self.radius
    }
}

/// Movement input за текущий tick (сумма AddMovementInput вызовов)
///
/// Очищается после применения в `apply_movement_input`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub pending: Vec3,
}

impl MovementInput {
    pub fn add(&mut self, direction: Vec3, scale: f32) {
        self.pending += direction * scale;
    }

    /// Забрать накопленное направление (длина ≤ 1)
    pub fn consume(&mut self) -> Vec3 {
        let direction = self.pending.clamp_length_max(1.0);
        self.pending = Vec3::ZERO;
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_is_velocity_change_over_mass() {
        let mut movement = CharacterMovement::default();
        movement.mass = 100.0;

        movement.add_impulse(Vec3::new(0.0, 1000.0, -500.0));
        assert_eq!(movement.velocity, Vec3::new(0.0, 10.0, -5.0));
        assert!(!movement.grounded);
    }

    #[test]
    fn test_capsule_sphere_overlap() {
        let capsule = PawnCapsule::default();
        let feet = Vec3::ZERO;

        // Сфера на уровне груди, 150 + 34 от оси
        assert!(capsule.intersects_sphere(feet, Vec3::new(180.0, 100.0, 0.0), 150.0));
        assert!(!capsule.intersects_sphere(feet, Vec3::new(190.0, 100.0, 0.0), 150.0));
        // Над головой: ближайшая точка оси: верхний центр (y = 142)
        assert!(capsule.intersects_sphere(feet, Vec3::new(0.0, 142.0 + 180.0, 0.0), 150.0));
    }

    #[test]
    fn test_movement_input_consume_clamps_and_clears() {
        let mut input = MovementInput::default();
        input.add(Vec3::NEG_Z, 1.0);
        input.add(Vec3::X, 1.0);

        let direction = input.consume();
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(input.pending, Vec3::ZERO);
    }
}
