//! Overlap systems

use bevy::prelude::*;

use super::counter::OverlapCounter;
use super::events::ItemOverlap;
use crate::logger;

/// System: ItemOverlap → counter на `other`
///
/// Entity без `OverlapCounter` (стена, NPC, другой item) просто пропускается.
pub fn apply_item_overlaps(
    mut overlaps: EventReader<ItemOverlap>,
    mut counters: Query<&mut OverlapCounter>,
) {
    for overlap in overlaps.read() {
        let Ok(mut counter) = counters.get_mut(overlap.other) else {
            continue;
        };

        counter.apply(overlap.item, overlap.delta);

        logger::log(&format!(
            "Overlap item {:?} → {:?} (delta {:+}) count = {}",
            overlap.item, overlap.other, overlap.delta, counter.count
        ));
    }
}
