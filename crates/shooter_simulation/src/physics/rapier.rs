//! Rapier backend: colliders для items/pawns + raycast traces + sensor events
//!
//! Layout:
//! - Item → два collider child'а (`ItemColliders`): box (blocking traces)
//!   и sphere (sensor, события с pawn'ами)
//! - Pawn → KinematicPositionBased body + capsule child (`PawnCollider`)
//!
//! Профили volumes (`ItemVolumes`) маппятся на `CollisionGroups`;
//! выключенный volume получает `ColliderDisabled`.

use bevy::ecs::system::SystemParamItem;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::collision::{CollisionChannel, VolumeProfile};
use crate::components::PawnCapsule;
use crate::item::{Item, ItemShape, ItemVolume, ItemVolumes, VolumeKind};
use crate::logger;
use crate::overlap::{ItemOverlap, OverlapCounter};
use crate::trace::{TraceBackend, TraceHit, TraceRay};

/// Collider children item'а
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemColliders {
    pub collision_box: Entity,
    pub detection_sphere: Entity,
}

/// Capsule collider child персонажа
#[derive(Component, Debug, Clone, Copy)]
pub struct PawnCollider {
    pub pawn: Entity,
}

/// Pawn'ы блокируют traces и ловят detection spheres
pub fn pawn_groups() -> CollisionGroups {
    CollisionGroups::new(
        CollisionChannel::Visibility.group()
            | CollisionChannel::Camera.group()
            | CollisionChannel::Pawn.group(),
        Group::ALL,
    )
}

/// Groups volume'а: memberships из профиля, sensor видит только pawn'ов
pub fn volume_groups(profile: &VolumeProfile, kind: VolumeKind) -> CollisionGroups {
    let filters = match kind {
        VolumeKind::CollisionBox => Group::ALL,
        VolumeKind::DetectionSphere => CollisionChannel::Pawn.group(),
    };
    CollisionGroups::new(profile.memberships(), filters)
}

/// Trace backend поверх rapier query pipeline
pub type RapierTraceBackend = ReadRapierContext<'static, 'static>;

impl TraceBackend for RapierTraceBackend {
    fn line_trace(param: &SystemParamItem<'_, '_, Self>, ray: &TraceRay) -> Option<TraceHit> {
        let Ok(context) = param.single() else {
            return None;
        };
        let direction = ray.direction()?;

        let mut filter = QueryFilter::new()
            .exclude_sensors()
            .groups(CollisionGroups::new(Group::ALL, ray.channel.group()));
        if let Some(ignore) = ray.ignore {
            filter = filter.exclude_rigid_body(ignore).exclude_collider(ignore);
        }

        let (entity, distance) = context.cast_ray(ray.start, direction, ray.length(), true, filter)?;
        Some(TraceHit {
            entity,
            location: ray.start + direction * distance,
            distance,
        })
    }
}

/// System: spawn collider children для новых item'ов
pub fn attach_item_colliders(
    mut commands: Commands,
    items: Query<(Entity, &ItemShape, &ItemVolumes), Added<Item>>,
) {
    for (item, shape, volumes) in items.iter() {
        let profile = volumes.profile;
        let he = shape.box_half_extents;

        let collision_box = commands
            .spawn((
                ItemVolume { item, kind: VolumeKind::CollisionBox },
                Transform::default(),
                Collider::cuboid(he.x, he.y, he.z),
                volume_groups(&profile.collision_box, VolumeKind::CollisionBox),
                ChildOf(item),
            ))
            .id();

        let detection_sphere = commands
            .spawn((
                ItemVolume { item, kind: VolumeKind::DetectionSphere },
                Transform::default(),
                Collider::ball(shape.sphere_radius),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
                ActiveCollisionTypes::all(),
                volume_groups(&profile.detection_sphere, VolumeKind::DetectionSphere),
                ChildOf(item),
            ))
            .id();

        for (collider, volume) in [
            (collision_box, profile.collision_box),
            (detection_sphere, profile.detection_sphere),
        ] {
            if !volume.enabled.has_query() {
                commands.entity(collider).insert(ColliderDisabled);
            }
        }

        commands.entity(item).insert(ItemColliders {
            collision_box,
            detection_sphere,
        });
    }
}

/// System: ItemVolumes изменились → groups + enable/disable colliders
pub fn sync_item_colliders(
    mut commands: Commands,
    items: Query<(&ItemVolumes, &ItemColliders), Changed<ItemVolumes>>,
) {
    for (volumes, colliders) in items.iter() {
        let volumes_and_kinds = [
            (colliders.collision_box, volumes.profile.collision_box, VolumeKind::CollisionBox),
            (
                colliders.detection_sphere,
                volumes.profile.detection_sphere,
                VolumeKind::DetectionSphere,
            ),
        ];

        for (collider, profile, kind) in volumes_and_kinds {
            let Ok(mut entity) = commands.get_entity(collider) else {
                continue;
            };

            entity.insert(volume_groups(&profile, kind));
            if profile.enabled.has_query() {
                entity.remove::<ColliderDisabled>();
            } else {
                entity.insert(ColliderDisabled);
            }
        }
    }
}

/// System: kinematic body + capsule для pawn'ов
pub fn attach_pawn_colliders(
    mut commands: Commands,
    pawns: Query<(Entity, &PawnCapsule), Added<PawnCapsule>>,
) {
    for (pawn, capsule) in pawns.iter() {
        let straight = (capsule.half_height - capsule.radius).max(0.0);

        // Transform двигает integrate_velocity, rapier берёт его как next kinematic position
        commands.entity(pawn).insert(RigidBody::KinematicPositionBased);

        commands.spawn((
            PawnCollider { pawn },
            Transform::from_xyz(0.0, capsule.half_height, 0.0),
            Collider::capsule_y(straight, capsule.radius),
            pawn_groups(),
            ActiveCollisionTypes::all(),
            ChildOf(pawn),
        ));
    }
}

/// System: sensor события detection spheres → ItemOverlap
///
/// Sphere без живого `Item` (компонент снят) пропускается: exit за неё
/// уже отправил `exit_overlaps_of_removed_item`.
pub fn collision_events_to_overlaps(
    mut collisions: EventReader<CollisionEvent>,
    volumes: Query<&ItemVolume>,
    pawn_colliders: Query<&PawnCollider>,
    items: Query<(), With<Item>>,
    mut overlaps: EventWriter<ItemOverlap>,
) {
    for event in collisions.read() {
        let (a, b, delta) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, 1),
            CollisionEvent::Stopped(a, b, _) => (a, b, -1),
        };

        // Какой из двух: detection sphere
        let (sphere, other) = match (volumes.get(a), volumes.get(b)) {
            (Ok(volume), _) if volume.kind == VolumeKind::DetectionSphere => (*volume, b),
            (_, Ok(volume)) if volume.kind == VolumeKind::DetectionSphere => (*volume, a),
            _ => continue,
        };

        if !items.contains(sphere.item) {
            continue;
        }

        let other = pawn_colliders.get(other).map(|c| c.pawn).unwrap_or(other);
        if other == sphere.item {
            continue;
        }

        overlaps.write(ItemOverlap {
            item: sphere.item,
            other,
            delta,
        });
        logger::log(&format!(
            "Rapier overlap {:+}: item {:?} / {:?}",
            delta, sphere.item, other
        ));
    }
}

/// Observer: item уходит → exit для каждого counter'а, где он ещё числится
///
/// Sensor child despawn'ится вместе с item'ом, и `CollisionEvent::Stopped`
/// приходит уже для несуществующего collider'а (в item его не резолвить).
pub fn exit_overlaps_of_removed_item(
    trigger: Trigger<OnRemove, Item>,
    counters: Query<(Entity, &OverlapCounter)>,
    mut overlaps: EventWriter<ItemOverlap>,
) {
    let item = trigger.target();

    for (pawn, counter) in counters.iter() {
        if !counter.overlapping.contains(&item) {
            continue;
        }
        overlaps.write(ItemOverlap::exit(item, pawn));
        logger::log(&format!("Item {:?} removed while overlapping {:?}", item, pawn));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemProfile;

    #[test]
    fn test_removed_item_exits_only_counters_that_hold_it() {
        let mut app = App::new();
        app.add_event::<ItemOverlap>()
            .add_observer(exit_overlaps_of_removed_item);

        let item = app.world_mut().spawn(Item::new("pistol")).id();
        let other_item = app.world_mut().spawn(Item::new("rifle")).id();

        let mut counter = OverlapCounter::default();
        counter.apply(item, 1);
        counter.apply(other_item, 1);
        let pawn = app.world_mut().spawn(counter).id();

        let mut unrelated = OverlapCounter::default();
        unrelated.apply(other_item, 1);
        app.world_mut().spawn(unrelated);

        app.world_mut().despawn(item);

        let events = app.world().resource::<Events<ItemOverlap>>();
        let sent: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(sent, vec![ItemOverlap::exit(item, pawn)]);
    }

    #[test]
    fn test_not_equipped_box_joins_visibility_group() {
        let profile = ItemProfile::not_equipped();
        let groups = volume_groups(&profile.collision_box, VolumeKind::CollisionBox);
        assert_eq!(groups.memberships, Group::GROUP_1);
        assert_eq!(groups.filters, Group::ALL);
    }

    #[test]
    fn test_detection_sphere_filters_pawns_only() {
        let profile = ItemProfile::not_equipped();
        let groups = volume_groups(&profile.detection_sphere, VolumeKind::DetectionSphere);
        assert!(groups.memberships.contains(Group::GROUP_3));
        assert_eq!(groups.filters, Group::GROUP_3);
    }

    #[test]
    fn test_equipped_volumes_have_no_memberships() {
        let profile = ItemProfile::equipped();
        assert_eq!(
            volume_groups(&profile.collision_box, VolumeKind::CollisionBox).memberships,
            Group::NONE
        );
        assert_eq!(
            volume_groups(&profile.detection_sphere, VolumeKind::DetectionSphere).memberships,
            Group::NONE
        );
    }
}
