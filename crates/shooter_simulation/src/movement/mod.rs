//! Movement domain: kinematic контроллер персонажа
//!
//! Порядок (Update, `GameplaySet::Movement`):
//! 1. apply_movement_input: input → velocity
//! 2. apply_gravity
//! 3. integrate_velocity: velocity → Transform
//! 4. ground_detection: stub пол y = 0
//! 5. orient_character: yaw по controller/движению

use bevy::prelude::*;

pub mod systems;


pub use systems::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                apply_movement_input,
                apply_gravity,
                integrate_velocity,
                ground_detection,
                orient_character,
            )
                .chain()
                .in_set(crate::GameplaySet::Movement),
        );
    }
}
