//! Item state + per-state profile table
//!
//! Инвариант: collision/visibility item'а: чистая функция от `ItemState`
//! через `ItemProfileTable`. Никаких скрытых флагов помимо state.
//!
//! Строки есть только для NotEquipped и Equipped. IsToBeEquipped, PickedUp,
//! Falling объявлены, но их конфигурация не определена: переход в такой
//! state сохраняет state и оставляет volumes как были. Строки для них
//! добавляются через table (RON или `ItemProfileTable::insert`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::collision::{ChannelResponse, CollisionChannel, CollisionEnabled, ResponseSet, VolumeProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum ItemState {
    #[default]
    NotEquipped,
    IsToBeEquipped,
    PickedUp,
    Equipped,
    Falling,
}

impl ItemState {
    pub fn display_name(self) -> &'static str {
        match self {
            ItemState::NotEquipped => "Not Equipped",
            ItemState::IsToBeEquipped => "Is To Be Equipped",
            ItemState::PickedUp => "PickedUp",
            ItemState::Equipped => "Equipped",
            ItemState::Falling => "Falling",
        }
    }
}

/// Mesh item'а: видимость, физика, collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct MeshProfile {
    pub visible: bool,
    pub simulate_physics: bool,
    pub collision: VolumeProfile,
}

/// Полная конфигурация трёх volumes + mesh для одного state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct ItemProfile {
    pub mesh: MeshProfile,
    /// Широкая detection sphere (overlap → counter персонажа)
    pub detection_sphere: VolumeProfile,
    /// Box, блокирующий Visibility traces (цель для crosshair trace)
    pub collision_box: VolumeProfile,
}

impl ItemProfile {
    /// Лежит в мире: видим, ловит overlap'ы и Visibility traces
    pub fn not_equipped() -> Self {
        Self {
            mesh: MeshProfile {
                visible: true,
                simulate_physics: false,
                collision: VolumeProfile::new(
                    CollisionEnabled::QueryOnly,
                    ResponseSet::all(ChannelResponse::Ignore),
                ),
            },
            detection_sphere: VolumeProfile::new(
                CollisionEnabled::QueryOnly,
                ResponseSet::all(ChannelResponse::Overlap),
            ),
            collision_box: VolumeProfile::new(
                CollisionEnabled::QueryAndPhysics,
                ResponseSet::all(ChannelResponse::Ignore)
                    .with(CollisionChannel::Visibility, ChannelResponse::Block),
            ),
        }
    }

    /// В руке: видим, все volumes выключены
    pub fn equipped() -> Self {
        Self {
            mesh: MeshProfile {
                visible: true,
                simulate_physics: false,
                collision: VolumeProfile::disabled(),
            },
            detection_sphere: VolumeProfile::disabled(),
            collision_box: VolumeProfile::disabled(),
        }
    }
}

impl Default for ItemProfile {
    fn default() -> Self {
        Self::not_equipped()
    }
}

/// State → profile (Resource, расширяемый)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfileTable {
    pub rows: BTreeMap<ItemState, ItemProfile>,
}

impl Default for ItemProfileTable {
    fn default() -> Self {
        let mut rows = BTreeMap::new();
        rows.insert(ItemState::NotEquipped, ItemProfile::not_equipped());
        rows.insert(ItemState::Equipped, ItemProfile::equipped());
        Self { rows }
    }
}

impl ItemProfileTable {
    pub fn get(&self, state: ItemState) -> Option<&ItemProfile> {
        self.rows.get(&state)
    }

    pub fn insert(&mut self, state: ItemState, profile: ItemProfile) {
        self.rows.insert(state, profile);
    }
}
