//! Physics backend (bevy_rapier3d)
//!
//! Опционален: headless запуск и tests используют `SceneTracePlugin`.
//! С rapier'ом:
//! - traces → `ReadRapierContext::cast_ray`
//! - overlaps → sensor `CollisionEvent`'ы detection spheres
//! - movement остаётся нашим: pawn = KinematicPositionBased, rapier читает Transform
//! - despawn item'а → exit через observer (sensor child уже мёртв)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod rapier;

pub use rapier::*;

use crate::trace::TracePlugin;

/// Rapier backend: physics plugin + collider sync + trace systems
pub struct RapierBackendPlugin;

impl Plugin for RapierBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .add_plugins(TracePlugin::<RapierTraceBackend>::default())
            .add_systems(
                Update,
                (attach_item_colliders.after(crate::item::init_spawned_items), attach_pawn_colliders)
                    .in_set(crate::GameplaySet::Items),
            )
            .add_systems(
                Update,
                (sync_item_colliders, collision_events_to_overlaps)
                    .chain()
                    .in_set(crate::GameplaySet::Overlap)
                    .before(crate::overlap::apply_item_overlaps),
            )
            .add_observer(exit_overlaps_of_removed_item);
    }
}
