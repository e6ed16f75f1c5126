//! Item компоненты: state, применённые volumes, prompt widget

use bevy::prelude::*;

use super::state::{ItemProfile, ItemState};

/// Pickup item (оружие, лежащее в мире или в руке)
///
/// Required: `ItemVolumes` + `PickupWidget` + `Transform`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ItemVolumes, PickupWidget, ItemShape, Transform)]
pub struct Item {
    pub name: String,
    pub state: ItemState,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ItemState::NotEquipped,
        }
    }
}

/// Текущая (применённая) конфигурация volumes + mesh
///
/// Пишется только через `apply_item_state`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ItemVolumes {
    pub profile: ItemProfile,
}

/// Floating UI prompt ("Pick up")
///
/// Скрыт при spawn; показывает его только focus trace персонажа.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PickupWidget {
    pub visible: bool,
}

/// Геометрия item'а (local space): blocking box + detection sphere
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ItemShape {
    pub box_half_extents: Vec3,
    pub sphere_radius: f32,
}

impl Default for ItemShape {
    fn default() -> Self {
        Self {
            box_half_extents: Vec3::new(40.0, 15.0, 10.0),
            sphere_radius: 150.0,
        }
    }
}

/// Какой volume item'а представляет collider entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum VolumeKind {
    CollisionBox,
    DetectionSphere,
}

/// Collider child item'а (rapier backend)
///
/// Trace/overlap по collider'у → `item` (capability lookup вместо cast).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ItemVolume {
    pub item: Entity,
    pub kind: VolumeKind,
}
