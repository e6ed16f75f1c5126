//! Per-tick traces: prompt focus + pistol beams (generic по backend'у)

use bevy::ecs::system::StaticSystemParam;
use bevy::prelude::*;

use super::backend::TraceBackend;
use super::ray::{aim_target, barrel_ray, beam_end_point, crosshair_ray, TraceHit};
use crate::camera::Viewport;
use crate::combat::{DebugColor, DebugLine, PistolShot, SpawnBeam, SpawnEmitter};
use crate::components::{CameraView, CombatAssets};
use crate::config::GameplayConfig;
use crate::item::{Item, ItemVolume, ItemVolumes, PickupWidget};
use crate::logger;
use crate::overlap::{FocusChange, ItemFocus, OverlapCounter};

/// Beam выстрела упёрся во что-то (или в пустоту)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BeamImpact {
    pub shooter: Entity,
    /// `None`: barrel ray никуда не попал
    pub entity: Option<Entity>,
    pub location: Vec3,
}

/// Hit entity → item (сам item или его collider child)
fn item_of(
    entity: Entity,
    items: &Query<(&Transform, &ItemVolumes), With<Item>>,
    volumes: &Query<&ItemVolume>,
) -> Option<Entity> {
    if items.contains(entity) {
        return Some(entity);
    }
    volumes.get(entity).ok().map(|volume| volume.item)
}

/// Item может показывать prompt (лежит в мире, sphere активна)
fn is_focusable(item: Entity, items: &Query<(&Transform, &ItemVolumes), With<Item>>) -> bool {
    items
        .get(item)
        .is_ok_and(|(_, volumes)| volumes.profile.detection_sphere.overlaps_pawns())
}

fn set_widget(widgets: &mut Query<&mut PickupWidget>, item: Entity, visible: bool) {
    let Ok(mut widget) = widgets.get_mut(item) else {
        return;
    };
    if widget.visible != visible {
        widget.visible = visible;
    }
}

fn apply_focus_change(widgets: &mut Query<&mut PickupWidget>, change: FocusChange) {
    if let Some(hidden) = change.hide {
        set_widget(widgets, hidden, false);
    }
    if let Some(shown) = change.show {
        set_widget(widgets, shown, true);
    }
}

/// System: пока counter > 0: crosshair trace выбирает item с видимым prompt
///
/// Hit по item'у → он; иначе ближайший из пересекающих персонажа.
/// Counter == 0 → последний prompt прячется, focus сбрасывается.
pub fn trace_item_focus<B: TraceBackend>(
    backend: StaticSystemParam<B>,
    viewport: Res<Viewport>,
    config: Res<GameplayConfig>,
    mut characters: Query<(Entity, &Transform, &CameraView, &OverlapCounter, &mut ItemFocus)>,
    items: Query<(&Transform, &ItemVolumes), With<Item>>,
    volumes: Query<&ItemVolume>,
    mut widgets: Query<&mut PickupWidget>,
) {
    for (character, transform, view, counter, mut focus) in characters.iter_mut() {
        if !counter.trace_for_hit {
            let change = focus.clear();
            apply_focus_change(&mut widgets, change);
            continue;
        }

        let hit_item = crosshair_ray(view, &viewport, config.trace.crosshair_distance, character)
            .and_then(|ray| B::line_trace(&*backend, &ray))
            .and_then(|hit| item_of(hit.entity, &items, &volumes))
            .filter(|&item| is_focusable(item, &items));

        let candidate = hit_item.or_else(|| {
            counter
                .overlapping
                .iter()
                .copied()
                .filter(|&item| is_focusable(item, &items))
                .filter_map(|item| {
                    items
                        .get(item)
                        .ok()
                        .map(|(item_transform, _)| (item, item_transform.translation.distance_squared(transform.translation)))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(item, _)| item)
        });

        let change = focus.focus(candidate);
        apply_focus_change(&mut widgets, change);
    }
}

/// System: PistolShot → crosshair + barrel traces → beam / hit FX
///
/// Beam всегда (muzzle → endpoint, длина > 0 даже при промахе),
/// hit FX только при реальном barrel hit.
pub fn resolve_pistol_beams<B: TraceBackend>(
    backend: StaticSystemParam<B>,
    viewport: Res<Viewport>,
    config: Res<GameplayConfig>,
    mut shots: EventReader<PistolShot>,
    shooters: Query<(&CameraView, Option<&CombatAssets>)>,
    mut beams: EventWriter<SpawnBeam>,
    mut emitters: EventWriter<SpawnEmitter>,
    mut debug_lines: EventWriter<DebugLine>,
    mut impacts: EventWriter<BeamImpact>,
) {
    let tuning = &config.trace;

    for shot in shots.read() {
        let Ok((view, assets)) = shooters.get(shot.character) else {
            logger::log_warning(&format!("PistolShot: {:?} has no camera view", shot.character));
            continue;
        };
        let Some(crosshair) = crosshair_ray(view, &viewport, tuning.crosshair_distance, shot.character) else {
            continue;
        };

        let crosshair_hit = B::line_trace(&*backend, &crosshair);
        let target = aim_target(&crosshair, crosshair_hit.as_ref());

        let barrel = barrel_ray(shot.muzzle, target, tuning.barrel_extension, shot.character);
        let barrel_hit: Option<TraceHit> = B::line_trace(&*backend, &barrel);
        let end = beam_end_point(&barrel, barrel_hit.as_ref());

        if tuning.debug_lines {
            debug_lines.write(DebugLine {
                start: crosshair.start,
                end: crosshair.end,
                color: DebugColor::Green,
                lifetime: tuning.debug_line_lifetime,
            });
            debug_lines.write(DebugLine {
                start: barrel.start,
                end: barrel.end,
                color: DebugColor::Red,
                lifetime: tuning.debug_line_lifetime,
            });
        }

        if let Some(hit) = barrel_hit {
            if let Some(fx) = assets.and_then(|a| a.pistol_hit_fx.as_ref()) {
                emitters.write(SpawnEmitter {
                    owner: shot.character,
                    fx: fx.clone(),
                    transform: Transform::from_translation(hit.location),
                });
            }
            logger::log(&format!(
                "Beam hit {:?} at {:.1?}",
                hit.entity, hit.location
            ));
        }

        if let Some(fx) = assets.and_then(|a| a.pistol_beam_fx.as_ref()) {
            beams.write(SpawnBeam {
                owner: shot.character,
                fx: fx.clone(),
                start: shot.muzzle,
                end,
            });
        }

        impacts.write(BeamImpact {
            shooter: shot.character,
            entity: barrel_hit.map(|hit| hit.entity),
            location: end,
        });
    }
}
