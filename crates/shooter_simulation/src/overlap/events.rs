//! Overlap events (detection sphere item'а ↔ другой entity)

use bevy::prelude::*;

/// Detection sphere item'а начала/закончила пересекаться с `other`
///
/// `delta`: +1 enter, −1 exit. Применяется только если у `other`
/// есть `OverlapCounter` (capability, не тип entity).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOverlap {
    pub item: Entity,
    pub other: Entity,
    pub delta: i8,
}

impl ItemOverlap {
    pub fn enter(item: Entity, other: Entity) -> Self {
        Self { item, other, delta: 1 }
    }

    pub fn exit(item: Entity, other: Entity) -> Self {
        Self { item, other, delta: -1 }
    }
}
