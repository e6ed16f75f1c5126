//! Equipment system implementations
//!
//! # Systems
//!
//! - `spawn_default_weapon`: стартовое оружие из `DefaultWeaponLoadout`
//! - `process_equip_item`: attach + state Equipped + prompt/focus cleanup

use bevy::prelude::*;

use super::events::{EquipItemIntent, ItemEquipped, ItemUnequipped};
use crate::components::{DefaultWeaponLoadout, EquippedWeapon, SkeletalSockets, HAND_SOCKET};
use crate::item::{
    apply_item_state, spawn_pickup_item, Item, ItemProfileTable, ItemShape, ItemState,
    ItemStateChanged, ItemVolumes, PickupWidget,
};
use crate::overlap::{ItemFocus, OverlapCounter};
use crate::{log, log_error, log_warning};

/// Spawn + equip стартового оружия (первый tick персонажа)
pub fn spawn_default_weapon(
    mut commands: Commands,
    characters: Query<(Entity, &DefaultWeaponLoadout, &Transform), Added<DefaultWeaponLoadout>>,
    mut intents: EventWriter<EquipItemIntent>,
) {
    for (character, loadout, transform) in characters.iter() {
        commands.entity(character).remove::<DefaultWeaponLoadout>();

        let Some(weapon) = &loadout.weapon else {
            continue;
        };

        let item = spawn_pickup_item(&mut commands, weapon.0.clone(), *transform, ItemShape::default());
        intents.write(EquipItemIntent { character, item });

        log(&format!("Default weapon '{}' spawned for {:?}", weapon.0, character));
    }
}

/// Process equip intents
///
/// # Flow
/// 1. Предыдущее оружие (если другое): detach на месте, NotEquipped
/// 2. Item → child персонажа, local transform = `hand_rSocket`
/// 3. State Equipped (box/sphere выключены), prompt скрыт
/// 4. Item выпадает из focus/overlap кандидатов персонажа
pub fn process_equip_item(
    mut commands: Commands,
    mut intents: EventReader<EquipItemIntent>,
    mut characters: Query<
        (
            &Transform,
            &mut EquippedWeapon,
            Option<&SkeletalSockets>,
            Option<&mut ItemFocus>,
            Option<&mut OverlapCounter>,
        ),
        Without<Item>,
    >,
    mut items: Query<(&mut Item, &mut ItemVolumes, &mut Transform, &mut PickupWidget)>,
    table: Res<ItemProfileTable>,
    mut equipped_events: EventWriter<ItemEquipped>,
    mut unequipped_events: EventWriter<ItemUnequipped>,
    mut state_events: EventWriter<ItemStateChanged>,
) {
    for intent in intents.read() {
        let Ok((character_transform, mut equipped, sockets, focus, counter)) =
            characters.get_mut(intent.character)
        else {
            log_error(&format!(
                "EquipItemIntent: {:?} missing EquippedWeapon",
                intent.character
            ));
            continue;
        };

        if !items.contains(intent.item) {
            log_error(&format!("EquipItemIntent: {:?} is not an item", intent.item));
            continue;
        }

        // 1. Detach предыдущего оружия
        if let Some(previous) = equipped.weapon.filter(|&weapon| weapon != intent.item) {
            if let Ok((mut item, mut volumes, mut transform, _)) = items.get_mut(previous) {
                *transform = character_transform.mul_transform(*transform);
                commands.entity(previous).remove::<ChildOf>();

                let was = item.state;
                apply_item_state(&mut item, &mut volumes, ItemState::NotEquipped, &table);
                if was != ItemState::NotEquipped {
                    state_events.write(ItemStateChanged {
                        item: previous,
                        previous: was,
                        state: ItemState::NotEquipped,
                    });
                }

                unequipped_events.write(ItemUnequipped {
                    character: intent.character,
                    item: previous,
                });
                log(&format!("{:?} dropped '{}'", intent.character, item.name));
            }
            equipped.weapon = None;
        }

        let Ok((mut item, mut volumes, mut transform, mut widget)) = items.get_mut(intent.item) else {
            continue;
        };

        // 2. Attach (один раз)
        let already_equipped = equipped.weapon == Some(intent.item);
        if !already_equipped {
            let socket = sockets.and_then(|s| s.local(HAND_SOCKET)).unwrap_or_else(|| {
                log_warning(&format!(
                    "{:?}: socket '{}' missing, weapon attached at origin",
                    intent.character, HAND_SOCKET
                ));
                Transform::IDENTITY
            });

            *transform = socket;
            commands.entity(intent.character).add_child(intent.item);
            equipped.weapon = Some(intent.item);
        }

        // 3. State + prompt
        let was = item.state;
        apply_item_state(&mut item, &mut volumes, ItemState::Equipped, &table);
        if was != ItemState::Equipped {
            state_events.write(ItemStateChanged {
                item: intent.item,
                previous: was,
                state: ItemState::Equipped,
            });
        }
        if widget.visible {
            widget.visible = false;
        }

        // 4. Focus / overlap кандидаты
        if let Some(mut focus) = focus {
            focus.forget(intent.item);
        }
        if let Some(mut counter) = counter {
            counter.forget(intent.item);
        }

        if !already_equipped {
            equipped_events.write(ItemEquipped {
                character: intent.character,
                item: intent.item,
            });
            log(&format!("{:?} equipped '{}'", intent.character, item.name));
        }
    }
}
