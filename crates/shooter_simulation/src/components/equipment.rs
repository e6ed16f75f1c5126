//! Equipment компоненты: экипированное оружие + стартовый loadout

use bevy::prelude::*;

use crate::components::assets::AssetRef;

/// Оружие в руке персонажа
///
/// Item entity: child персонажа (attach на `hand_rSocket`).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct EquippedWeapon {
    pub weapon: Option<Entity>,
}

/// Стартовое оружие (spawn + equip на первом tick'е)
///
/// `weapon == None` → персонаж начинает без оружия.
/// Компонент удаляется после обработки.
#[derive(Component, Debug, Clone, Default)]
pub struct DefaultWeaponLoadout {
    pub weapon: Option<AssetRef>,
}
