//! Item events

use bevy::prelude::*;

use super::state::ItemState;

/// Intent: перевести item в state (применяет строку profile table)
#[derive(Event, Debug, Clone, Copy)]
pub struct SetItemStateIntent {
    pub item: Entity,
    pub state: ItemState,
}

/// Item сменил state (для host'а: звуки, UI)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemStateChanged {
    pub item: Entity,
    pub previous: ItemState,
    pub state: ItemState,
}
