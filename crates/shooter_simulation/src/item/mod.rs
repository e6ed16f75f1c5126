//! Item System: pickup items и их state machine
//!
//! # Архитектура
//!
//! **ItemState**: одно из пяти состояний (NotEquipped … Falling).
//! **ItemProfileTable**: state → конфигурация mesh + box + sphere.
//! **apply_item_state**: единственная точка записи `ItemVolumes`.
//!
//! Backend'ы (rapier / trace scene) читают `ItemVolumes` и
//! перенастраивают свои colliders; сам item о физике не знает.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod state;
pub mod systems;


pub use components::*;
pub use events::*;
pub use state::*;
pub use systems::*;

/// Item plugin (state machine)
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemProfileTable>()
            .add_event::<SetItemStateIntent>()
            .add_event::<ItemStateChanged>()
            .add_systems(
                Update,
                (init_spawned_items, process_set_item_state)
                    .chain()
                    .in_set(crate::GameplaySet::Items),
            );
    }
}

/// Spawn pickup item в мире (state NotEquipped, widget скрыт)
pub fn spawn_pickup_item(
    commands: &mut Commands,
    name: impl Into<String>,
    transform: Transform,
    shape: ItemShape,
) -> Entity {
    commands.spawn((Item::new(name), transform, shape)).id()
}
