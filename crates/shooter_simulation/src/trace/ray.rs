//! Trace rays: crosshair (screen centre) + barrel (muzzle → target × extension)

use bevy::prelude::*;

use crate::camera::{deproject_screen_to_world, Viewport};
use crate::collision::CollisionChannel;
use crate::components::CameraView;

/// Line trace запрос (single, ближайший blocking hit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRay {
    pub start: Vec3,
    pub end: Vec3,
    pub channel: CollisionChannel,
    /// Обычно сам стрелок
    pub ignore: Option<Entity>,
}

impl TraceRay {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// `None` для вырожденного (нулевой длины) ray
    pub fn direction(&self) -> Option<Vec3> {
        let direction = (self.end - self.start).normalize_or_zero();
        (direction != Vec3::ZERO).then_some(direction)
    }
}

/// Blocking hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// Entity collider'а (rapier child или сам item в scene backend)
    pub entity: Entity,
    pub location: Vec3,
    pub distance: f32,
}

/// Ray из центра viewport'а через camera (Visibility channel)
pub fn crosshair_ray(
    view: &CameraView,
    viewport: &Viewport,
    distance: f32,
    shooter: Entity,
) -> Option<TraceRay> {
    let (origin, direction) =
        deproject_screen_to_world(viewport.centre(), viewport, &view.transform, view.fov)?;

    Some(TraceRay {
        start: origin,
        end: origin + direction * distance,
        channel: CollisionChannel::Visibility,
        ignore: Some(shooter),
    })
}

/// Ray из muzzle к target, продлённый в `extension` раз
///
/// Находит точку, куда реально попадает ствол (а не центр экрана).
pub fn barrel_ray(muzzle: Vec3, target: Vec3, extension: f32, shooter: Entity) -> TraceRay {
    TraceRay {
        start: muzzle,
        end: muzzle + (target - muzzle) * extension,
        channel: CollisionChannel::Visibility,
        ignore: Some(shooter),
    }
}

/// Точка, куда целится crosshair: hit, иначе конец ray
pub fn aim_target(crosshair: &TraceRay, hit: Option<&TraceHit>) -> Vec3 {
    hit.map(|hit| hit.location).unwrap_or(crosshair.end)
}

/// Конец beam'а: barrel hit, иначе конец barrel ray
pub fn beam_end_point(barrel: &TraceRay, hit: Option<&TraceHit>) -> Vec3 {
    hit.map(|hit| hit.location).unwrap_or(barrel.end)
}
