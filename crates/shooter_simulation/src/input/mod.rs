//! Player input module
//!
//! # Архитектура
//!
//! ```text
//! Keyboard/mouse (ButtonInput, если host их добавил)   Host / tests
//!     ↓ read_device_input (bindings.rs)                  ↓
//! PlayerAxisInput / PlayerActionInput (ECS events) ←─────┘
//!     ↓ process_player_input (systems.rs)
//! MovementInput / ControlRotation / AimState / combat intents
//! ```

use bevy::prelude::*;

pub mod bindings;
pub mod events;
pub mod systems;


pub use bindings::*;
pub use events::*;
pub use systems::*;

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .add_event::<PlayerAxisInput>()
            .add_event::<PlayerActionInput>()
            .add_systems(
                Update,
                (read_device_input, process_player_input)
                    .chain()
                    .in_set(crate::GameplaySet::Input),
            );
    }
}
