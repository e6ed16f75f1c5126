//! Trace backend: кто отвечает на line traces
//!
//! Системы focus/beam generic по backend'у:
//! - `ReadRapierContext`: настоящая физика (`physics::RapierBackendPlugin`)
//! - `Res<TraceScene>`: scripted сцена (headless запуск, tests)

use bevy::ecs::system::{SystemParam, SystemParamItem};

use super::ray::{TraceHit, TraceRay};

pub trait TraceBackend: SystemParam + 'static {
    /// Ближайший blocking hit по `ray.channel`, исключая `ray.ignore`
    fn line_trace(param: &SystemParamItem<'_, '_, Self>, ray: &TraceRay) -> Option<TraceHit>;
}
