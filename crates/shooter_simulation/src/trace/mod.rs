//! Trace domain: line traces для prompt focus и pistol beam
//!
//! # Backend'ы
//!
//! ```text
//! TracePlugin<B: TraceBackend>
//!     ├─ trace_item_focus::<B>     (каждый tick, пока OverlapCounter > 0)
//!     └─ resolve_pistol_beams::<B> (PistolShot → SpawnBeam / hit FX)
//!
//! B = Res<TraceScene>       → SceneTracePlugin (headless, tests)
//! B = ReadRapierContext     → physics::RapierBackendPlugin
//! ```

use bevy::prelude::*;
use std::marker::PhantomData;

pub mod backend;
pub mod ray;
pub mod scene;
pub mod systems;


pub use backend::*;
pub use ray::*;
pub use scene::*;
pub use systems::*;

/// Focus + beam systems для конкретного backend'а
pub struct TracePlugin<B: TraceBackend> {
    marker: PhantomData<fn() -> B>,
}

impl<B: TraceBackend> Default for TracePlugin<B> {
    fn default() -> Self {
        Self { marker: PhantomData }
    }
}

impl<B: TraceBackend> Plugin for TracePlugin<B> {
    fn build(&self, app: &mut App) {
        app.add_event::<BeamImpact>().add_systems(
            Update,
            (trace_item_focus::<B>, resolve_pistol_beams::<B>).in_set(crate::GameplaySet::Trace),
        );
    }
}

/// Scripted scene backend: TraceScene + proximity overlaps
pub struct SceneTracePlugin;

impl Plugin for SceneTracePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TraceScene>()
            .init_resource::<SceneOverlaps>()
            .add_plugins(TracePlugin::<Res<'static, TraceScene>>::default())
            .add_systems(
                Update,
                (sync_trace_scene, detect_scene_overlaps)
                    .chain()
                    .in_set(crate::GameplaySet::Overlap)
                    .before(crate::overlap::apply_item_overlaps),
            );
    }
}
