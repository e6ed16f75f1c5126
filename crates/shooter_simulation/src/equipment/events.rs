//! Equipment events
//!
//! **Equip lifecycle:**
//! - `EquipItemIntent` → attach item к `hand_rSocket`, state Equipped
//! - `ItemEquipped` → item теперь в руке
//! - `ItemUnequipped` → предыдущее оружие отцеплено на месте (NotEquipped)

use bevy::prelude::*;

/// Взять item в руку
///
/// Идемпотентно: повторный intent с тем же item не создаёт второй attach.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipItemIntent {
    pub character: Entity,
    pub item: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEquipped {
    pub character: Entity,
    pub item: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemUnequipped {
    pub character: Entity,
    pub item: Entity,
}
