//! Tests for equip sequence.

use bevy::prelude::*;

use super::*;
use crate::collision::CollisionChannel;
use crate::components::{AssetRef, DefaultWeaponLoadout, EquippedWeapon, SkeletalSockets, HAND_SOCKET};
use crate::item::{init_spawned_items, Item, ItemProfileTable, ItemState, ItemStateChanged, ItemVolumes, PickupWidget};
use crate::overlap::{ItemFocus, OverlapCounter};

fn equipment_app() -> App {
    let mut app = App::new();
    app.init_resource::<ItemProfileTable>()
        .add_event::<EquipItemIntent>()
        .add_event::<ItemEquipped>()
        .add_event::<ItemUnequipped>()
        .add_event::<ItemStateChanged>()
        .add_systems(
            Update,
            (spawn_default_weapon, process_equip_item, init_spawned_items).chain(),
        );
    app
}

fn spawn_character(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(100.0, 0.0, 0.0),
            EquippedWeapon::default(),
            SkeletalSockets::mannequin(),
            ItemFocus::default(),
            OverlapCounter::default(),
        ))
        .id()
}

fn children_of(app: &App, parent: Entity) -> Vec<Entity> {
    app.world()
        .get::<Children>(parent)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

#[test]
fn test_equip_attaches_to_hand_and_disables_volumes() {
    let mut app = equipment_app();
    let character = spawn_character(&mut app);
    let item = app
        .world_mut()
        .spawn((Item::new("pistol"), Transform::from_xyz(0.0, 0.0, -300.0), PickupWidget { visible: true }))
        .id();
    app.world_mut().get_mut::<ItemFocus>(character).unwrap().last_item = Some(item);
    app.world_mut()
        .get_mut::<OverlapCounter>(character)
        .unwrap()
        .apply(item, 1);

    app.world_mut().send_event(EquipItemIntent { character, item });
    app.update();

    let world = app.world();
    assert_eq!(world.get::<ChildOf>(item).map(|c| c.parent()), Some(character));
    assert_eq!(
        *world.get::<Transform>(item).unwrap(),
        SkeletalSockets::mannequin().local(HAND_SOCKET).unwrap()
    );
    assert_eq!(world.get::<Item>(item).unwrap().state, ItemState::Equipped);
    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().weapon, Some(item));

    let volumes = world.get::<ItemVolumes>(item).unwrap();
    assert!(!volumes.profile.detection_sphere.overlaps_pawns());
    assert!(!volumes.profile.collision_box.blocks(CollisionChannel::Visibility));
    assert!(!world.get::<PickupWidget>(item).unwrap().visible);

    assert_eq!(world.get::<ItemFocus>(character).unwrap().last_item, None);
    let counter = world.get::<OverlapCounter>(character).unwrap();
    assert!(counter.overlapping.is_empty());
    // count уменьшит exit от backend'а
    assert_eq!(counter.count, 1);
}

#[test]
fn test_equip_twice_attaches_once() {
    let mut app = equipment_app();
    let character = spawn_character(&mut app);
    let item = app.world_mut().spawn(Item::new("pistol")).id();

    for _ in 0..2 {
        app.world_mut().send_event(EquipItemIntent { character, item });
        app.update();
    }

    let attached: Vec<_> = children_of(&app, character)
        .into_iter()
        .filter(|&child| child == item)
        .collect();
    assert_eq!(attached.len(), 1);
    assert_eq!(app.world().get::<Item>(item).unwrap().state, ItemState::Equipped);

    let equipped = app.world().resource::<Events<ItemEquipped>>();
    assert_eq!(equipped.len(), 1);
}

#[test]
fn test_equipping_new_item_drops_previous_in_place() {
    let mut app = equipment_app();
    let character = spawn_character(&mut app);
    let first = app.world_mut().spawn(Item::new("pistol")).id();
    let second = app.world_mut().spawn(Item::new("rifle")).id();

    app.world_mut().send_event(EquipItemIntent { character, item: first });
    app.update();
    app.world_mut().send_event(EquipItemIntent { character, item: second });
    app.update();

    let world = app.world();
    assert!(world.get::<ChildOf>(first).is_none());
    assert_eq!(world.get::<Item>(first).unwrap().state, ItemState::NotEquipped);
    assert!(world.get::<ItemVolumes>(first).unwrap().profile.detection_sphere.overlaps_pawns());

    // Остался там, где был в руке: character (100,0,0) + hand socket
    let hand = SkeletalSockets::mannequin().local(HAND_SOCKET).unwrap();
    let expected = Vec3::new(100.0, 0.0, 0.0) + hand.translation;
    assert!(world.get::<Transform>(first).unwrap().translation.abs_diff_eq(expected, 1e-4));

    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().weapon, Some(second));
    assert_eq!(world.get::<Item>(second).unwrap().state, ItemState::Equipped);
}

#[test]
fn test_default_loadout_spawns_and_equips_weapon() {
    let mut app = equipment_app();
    let character = app
        .world_mut()
        .spawn((
            Transform::default(),
            EquippedWeapon::default(),
            SkeletalSockets::mannequin(),
            DefaultWeaponLoadout {
                weapon: Some(AssetRef::from("default_pistol")),
            },
        ))
        .id();

    app.update();

    let world = app.world();
    assert!(world.get::<DefaultWeaponLoadout>(character).is_none());
    let weapon = world.get::<EquippedWeapon>(character).unwrap().weapon.unwrap();
    assert_eq!(world.get::<Item>(weapon).unwrap().name, "default_pistol");
    assert_eq!(world.get::<Item>(weapon).unwrap().state, ItemState::Equipped);
    assert_eq!(
        world.get::<ItemVolumes>(weapon).unwrap().profile,
        ItemProfileTable::default().get(ItemState::Equipped).copied().unwrap()
    );
}

#[test]
fn test_empty_loadout_equips_nothing() {
    let mut app = equipment_app();
    let character = app
        .world_mut()
        .spawn((
            Transform::default(),
            EquippedWeapon::default(),
            DefaultWeaponLoadout::default(),
        ))
        .id();

    app.update();

    assert_eq!(app.world().get::<EquippedWeapon>(character).unwrap().weapon, None);
}
