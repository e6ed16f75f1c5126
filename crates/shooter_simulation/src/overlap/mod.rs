//! Overlap domain: detection spheres item'ов и counter персонажа
//!
//! ```text
//! backend (rapier CollisionEvent / scene proximity)
//!     ↓
//! ItemOverlap { item, other, ±1 }
//!     ↓
//! apply_item_overlaps → OverlapCounter (capability check)
//!     ↓
//! focus trace (trace::systems) → PickupWidget.visible
//! ```

use bevy::prelude::*;

pub mod counter;
pub mod events;
pub mod systems;

pub use counter::*;
pub use events::*;
pub use systems::*;

pub struct OverlapPlugin;

impl Plugin for OverlapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemOverlap>().add_systems(
            Update,
            apply_item_overlaps.in_set(crate::GameplaySet::Overlap),
        );
    }
}
