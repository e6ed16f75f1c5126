//! Scripted trace scene: oriented boxes + proximity overlaps
//!
//! Без rapier: item boxes синхронизируются из `ItemVolumes` каждый tick,
//! статичные blockers (стены) добавляет host/test. Overlaps считаются
//! как sphere ↔ capsule (аналог rapier sensor events).

use bevy::ecs::system::SystemParamItem;
use bevy::prelude::*;
use std::collections::BTreeSet;

use super::backend::TraceBackend;
use super::ray::{TraceHit, TraceRay};
use crate::collision::{ChannelResponse, CollisionEnabled, ResponseSet, VolumeProfile};
use crate::components::PawnCapsule;
use crate::item::{Item, ItemShape, ItemVolumes};
use crate::logger;
use crate::overlap::ItemOverlap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub entity: Entity,
    pub transform: Transform,
    pub half_extents: Vec3,
    pub profile: VolumeProfile,
}

impl SceneBox {
    /// Дистанция входа ray в box (slab test в local space)
    fn ray_distance(&self, start: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let inverse = self.transform.rotation.inverse();
        let origin = inverse * (start - self.transform.translation);
        let direction = inverse * direction;

        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let h = self.half_extents[axis];

            if d.abs() < 1e-8 {
                if o.abs() > h {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let (near, far) = {
                let t1 = (-h - o) * inv_d;
                let t2 = (h - o) * inv_d;
                if t1 <= t2 { (t1, t2) } else { (t2, t1) }
            };

            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Trace scene (Resource)
#[derive(Resource, Debug, Clone, Default)]
pub struct TraceScene {
    /// Стены/пол, блокируют все channels
    pub static_boxes: Vec<SceneBox>,
    /// Collision boxes item'ов (пересобираются `sync_trace_scene`)
    pub item_boxes: Vec<SceneBox>,
}

impl TraceScene {
    pub fn add_blocker(&mut self, entity: Entity, transform: Transform, half_extents: Vec3) {
        self.static_boxes.push(SceneBox {
            entity,
            transform,
            half_extents,
            profile: VolumeProfile::new(
                CollisionEnabled::QueryAndPhysics,
                ResponseSet::all(ChannelResponse::Block),
            ),
        });
    }

    pub fn line_trace(&self, ray: &TraceRay) -> Option<TraceHit> {
        let direction = ray.direction()?;
        let max_distance = ray.length();

        self.static_boxes
            .iter()
            .chain(self.item_boxes.iter())
            .filter(|scene_box| Some(scene_box.entity) != ray.ignore)
            .filter(|scene_box| scene_box.profile.blocks(ray.channel))
            .filter_map(|scene_box| {
                scene_box
                    .ray_distance(ray.start, direction, max_distance)
                    .map(|distance| (scene_box.entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, distance)| TraceHit {
                entity,
                location: ray.start + direction * distance,
                distance,
            })
    }
}

impl TraceBackend for Res<'static, TraceScene> {
    fn line_trace(scene: &SystemParamItem<'_, '_, Self>, ray: &TraceRay) -> Option<TraceHit> {
        TraceScene::line_trace(scene, ray)
    }
}

/// Текущие пары (item, pawn) с пересечением detection sphere
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneOverlaps {
    pub pairs: BTreeSet<(Entity, Entity)>,
}

/// System: item collision boxes → TraceScene
pub fn sync_trace_scene(
    mut scene: ResMut<TraceScene>,
    items: Query<(Entity, &Transform, &ItemShape, &ItemVolumes), With<Item>>,
) {
    scene.item_boxes.clear();

    for (entity, transform, shape, volumes) in items.iter() {
        let profile = volumes.profile.collision_box;
        if !profile.enabled.has_query() {
            continue;
        }

        scene.item_boxes.push(SceneBox {
            entity,
            transform: Transform::from_translation(transform.translation)
                .with_rotation(transform.rotation),
            half_extents: shape.box_half_extents,
            profile,
        });
    }
}

/// System: detection spheres ↔ pawn capsules → ItemOverlap enter/exit
///
/// Exit'ы раньше enter'ов; внутри: порядок entity (детерминированно).
pub fn detect_scene_overlaps(
    items: Query<(Entity, &Transform, &ItemShape, &ItemVolumes), With<Item>>,
    pawns: Query<(Entity, &Transform, &PawnCapsule)>,
    mut state: ResMut<SceneOverlaps>,
    mut overlaps: EventWriter<ItemOverlap>,
) {
    let mut current = BTreeSet::new();

    for (item, item_transform, shape, volumes) in items.iter() {
        if !volumes.profile.detection_sphere.overlaps_pawns() {
            continue;
        }

        for (pawn, pawn_transform, capsule) in pawns.iter() {
            if pawn == item {
                continue;
            }
            if capsule.intersects_sphere(
                pawn_transform.translation,
                item_transform.translation,
                shape.sphere_radius,
            ) {
                current.insert((item, pawn));
            }
        }
    }

    for &(item, pawn) in state.pairs.difference(&current) {
        overlaps.write(ItemOverlap::exit(item, pawn));
        logger::log(&format!("Scene overlap end: item {:?} / {:?}", item, pawn));
    }
    for &(item, pawn) in current.difference(&state.pairs) {
        overlaps.write(ItemOverlap::enter(item, pawn));
        logger::log(&format!("Scene overlap begin: item {:?} / {:?}", item, pawn));
    }

    state.pairs = current;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionChannel;

    fn ray(start: Vec3, end: Vec3, ignore: Option<Entity>) -> TraceRay {
        TraceRay {
            start,
            end,
            channel: CollisionChannel::Visibility,
            ignore,
        }
    }

    #[test]
    fn test_nearest_box_wins() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let mut scene = TraceScene::default();
        scene.add_blocker(far, Transform::from_xyz(0.0, 0.0, -500.0), Vec3::splat(10.0));
        scene.add_blocker(near, Transform::from_xyz(0.0, 0.0, -200.0), Vec3::splat(10.0));

        let hit = scene
            .line_trace(&ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0), None))
            .unwrap();
        assert_eq!(hit.entity, near);
        assert!(hit.location.abs_diff_eq(Vec3::new(0.0, 0.0, -190.0), 1e-3));
        assert!((hit.distance - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_ignored_and_short_rays_miss() {
        let wall = Entity::from_raw(1);
        let mut scene = TraceScene::default();
        scene.add_blocker(wall, Transform::from_xyz(0.0, 0.0, -200.0), Vec3::splat(10.0));

        assert!(scene
            .line_trace(&ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0), Some(wall)))
            .is_none());
        assert!(scene
            .line_trace(&ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), None))
            .is_none());
    }

    #[test]
    fn test_rotated_box() {
        let wall = Entity::from_raw(1);
        let mut scene = TraceScene::default();
        // Тонкая по X плита, повёрнутая на 90° → тонкая по Z
        scene.add_blocker(
            wall,
            Transform::from_xyz(0.0, 0.0, -100.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            Vec3::new(5.0, 50.0, 50.0),
        );

        let hit = scene
            .line_trace(&ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0), None))
            .unwrap();
        assert!((hit.distance - 95.0).abs() < 1e-2);
    }

    #[test]
    fn test_box_that_ignores_channel_is_transparent() {
        let item = Entity::from_raw(1);
        let scene = TraceScene {
            static_boxes: Vec::new(),
            item_boxes: vec![SceneBox {
                entity: item,
                transform: Transform::from_xyz(0.0, 0.0, -100.0),
                half_extents: Vec3::splat(10.0),
                profile: VolumeProfile::disabled(),
            }],
        };

        assert!(scene
            .line_trace(&ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0), None))
            .is_none());
    }
}
