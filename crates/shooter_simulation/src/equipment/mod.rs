//! Equipment domain: оружие в руке персонажа
//!
//! # Architecture
//!
//! ```text
//! DefaultWeaponLoadout (spawn) ─→ spawn_default_weapon ─┐
//! Host / tests ─────────────────────────────────────────┤
//!                                                       ↓
//!                                             EquipItemIntent
//!                                                       ↓
//!                                             process_equip_item
//!                                                       ↓
//!                          ChildOf(character) + hand_rSocket + ItemState::Equipped
//! ```

use bevy::prelude::*;

pub mod events;
pub mod systems;

#[cfg(test)]
mod systems_tests;

pub use events::*;
pub use systems::*;

pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EquipItemIntent>()
            .add_event::<ItemEquipped>()
            .add_event::<ItemUnequipped>()
            .add_systems(
                Update,
                (spawn_default_weapon, process_equip_item)
                    .chain()
                    .in_set(crate::GameplaySet::Equipment),
            );
    }
}
