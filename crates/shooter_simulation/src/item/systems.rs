//! Item state transitions

use bevy::prelude::*;

use super::components::{Item, ItemVolumes};
use super::events::{ItemStateChanged, SetItemStateIntent};
use super::state::{ItemProfileTable, ItemState};
use crate::logger;

/// Сохранить state и применить строку table
///
/// Total + idempotent: повторный вызов с тем же state даёт тот же результат.
/// Возвращает `false`, если строки для state нет (volumes не тронуты).
pub fn apply_item_state(
    item: &mut Item,
    volumes: &mut ItemVolumes,
    state: ItemState,
    table: &ItemProfileTable,
) -> bool {
    item.state = state;

    let Some(profile) = table.get(state) else {
        logger::log_warning(&format!(
            "Item '{}': no profile row for state '{}', volumes left unchanged",
            item.name,
            state.display_name()
        ));
        return false;
    };

    volumes.profile = *profile;
    true
}

/// System: обработка SetItemStateIntent
pub fn process_set_item_state(
    mut intents: EventReader<SetItemStateIntent>,
    mut items: Query<(&mut Item, &mut ItemVolumes)>,
    table: Res<ItemProfileTable>,
    mut changed: EventWriter<ItemStateChanged>,
) {
    for intent in intents.read() {
        let Ok((mut item, mut volumes)) = items.get_mut(intent.item) else {
            logger::log(&format!("SetItemStateIntent: {:?} is not an item", intent.item));
            continue;
        };

        let previous = item.state;
        apply_item_state(&mut item, &mut volumes, intent.state, &table);

        if previous != intent.state {
            changed.write(ItemStateChanged {
                item: intent.item,
                previous,
                state: intent.state,
            });
        }
    }
}

/// System: новые item'ы получают профиль своего начального state
pub fn init_spawned_items(
    mut items: Query<(&mut Item, &mut ItemVolumes), Added<Item>>,
    table: Res<ItemProfileTable>,
) {
    for (mut item, mut volumes) in items.iter_mut() {
        let state = item.state;
        apply_item_state(&mut item, &mut volumes, state, &table);
    }
}
