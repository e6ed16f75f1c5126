//! Ultimate ability: input lock + montage + три независимых отложенных callback'а
//!
//! # Sequence
//!
//! ```text
//! ActivateUltimateIntent
//!   → controller.disable_input()        (если controller есть)
//!   → PlayMontage "Ultimate"
//!   → timers: InputReenable (montage length)
//!             Force         (ability_delay)
//!             Emitter       (emitter_delay)
//! ```
//!
//! Порядок срабатывания timers зависит только от delays; системы не
//! предполагают, что impulse придёт раньше FX или наоборот.
//! Повторная активация переназначает все три timers (старые отменяются).

use bevy::prelude::*;

use super::effects::{
    play_animation, play_sound, spawn_fx_at_socket, PlayMontage, PlaySound2D, SpawnEmitter,
    ULTIMATE_SECTION,
};
use super::timers::TimerQueue;
use crate::components::{
    CharacterMovement, CombatAssets, PlayerController, SkeletalSockets, BAZOOKA_MUZZLE_SOCKET,
};
use crate::config::UltimateTuning;
use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UltimateTimer {
    InputReenable,
    Force,
    Emitter,
}

/// Ultimate ability персонажа (tuning + pending timers)
#[derive(Component, Debug, Clone, Default)]
pub struct UltimateAbility {
    pub tuning: UltimateTuning,
    pub timers: TimerQueue<UltimateTimer>,
}

impl UltimateAbility {
    pub fn new(tuning: UltimateTuning) -> Self {
        Self {
            tuning,
            timers: TimerQueue::default(),
        }
    }
}

/// Action "UltimateAbility" нажат
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivateUltimateIntent {
    pub character: Entity,
}

/// Force timer сработал, impulse применён к movement
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct UltimateImpulseApplied {
    pub character: Entity,
    pub impulse: Vec3,
}

/// Impulse отдачи: назад по горизонтальному forward + вверх,
/// масштаб gravity_scale × mass
///
/// Зависит только от forward персонажа (не от camera).
pub fn ultimate_impulse(forward: Vec3, tuning: &UltimateTuning, gravity_scale: f32, mass: f32) -> Vec3 {
    let horizontal = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let force = -horizontal * tuning.force_magnitude + Vec3::Y * tuning.upward_force;
    force * gravity_scale * mass
}

/// System: ActivateUltimateIntent → lock input, montage, schedule
pub fn activate_ultimate(
    mut intents: EventReader<ActivateUltimateIntent>,
    mut characters: Query<(
        &mut UltimateAbility,
        Option<&CombatAssets>,
        Option<&mut PlayerController>,
    )>,
    mut montages: EventWriter<PlayMontage>,
) {
    for intent in intents.read() {
        let Ok((mut ability, assets, controller)) = characters.get_mut(intent.character) else {
            logger::log_warning(&format!(
                "ActivateUltimateIntent: {:?} has no UltimateAbility",
                intent.character
            ));
            continue;
        };

        // Без montage нет длины анимации → input некогда возвращать
        let Some(montage) = assets.and_then(|a| a.ultimate_fire_montage.as_ref()) else {
            logger::log_warning(&format!(
                "{:?}: ultimate montage missing, activation skipped",
                intent.character
            ));
            continue;
        };

        if let Some(mut controller) = controller {
            controller.disable_input();
        }

        play_animation(&mut montages, intent.character, Some(montage), ULTIMATE_SECTION);

        let ability = &mut *ability;
        ability
            .timers
            .set_timer(UltimateTimer::InputReenable, montage.play_length);
        ability
            .timers
            .set_timer(UltimateTimer::Force, ability.tuning.ability_delay);
        ability
            .timers
            .set_timer(UltimateTimer::Emitter, ability.tuning.emitter_delay);

        logger::log_info(&format!(
            "{:?} ultimate: input locked for {:.2}s, force in {:.2}s, FX in {:.2}s",
            intent.character,
            montage.play_length,
            ability.tuning.ability_delay,
            ability.tuning.emitter_delay
        ));
    }
}

/// System: tick ultimate timers и выполнить сработавшие callbacks
pub fn tick_ultimate_timers(
    time: Res<Time>,
    mut characters: Query<(
        Entity,
        &mut UltimateAbility,
        &Transform,
        Option<&mut PlayerController>,
        Option<&mut CharacterMovement>,
        Option<&CombatAssets>,
        Option<&SkeletalSockets>,
    )>,
    mut emitters: EventWriter<SpawnEmitter>,
    mut sounds: EventWriter<PlaySound2D>,
    mut impulses: EventWriter<UltimateImpulseApplied>,
) {
    for (entity, mut ability, transform, mut controller, mut movement, assets, sockets) in
        characters.iter_mut()
    {
        if ability.timers.is_empty() {
            continue;
        }

        for fired in ability.timers.tick(time.delta()) {
            match fired {
                UltimateTimer::InputReenable => {
                    if let Some(controller) = controller.as_deref_mut() {
                        controller.enable_input();
                        logger::log(&format!("{:?} ultimate: input re-enabled", entity));
                    }
                }
                UltimateTimer::Force => {
                    let Some(movement) = movement.as_deref_mut() else {
                        continue;
                    };

                    let impulse = ultimate_impulse(
                        *transform.forward(),
                        &ability.tuning,
                        movement.gravity_scale,
                        movement.mass,
                    );
                    movement.add_impulse(impulse);
                    impulses.write(UltimateImpulseApplied {
                        character: entity,
                        impulse,
                    });
                }
                UltimateTimer::Emitter => {
                    let Some(assets) = assets else {
                        continue;
                    };

                    spawn_fx_at_socket(
                        &mut emitters,
                        entity,
                        transform,
                        sockets,
                        BAZOOKA_MUZZLE_SOCKET,
                        assets.ultimate_muzzle_fx.as_ref(),
                    );
                    play_sound(&mut sounds, entity, assets.ultimate_sound.as_ref());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_is_negated_horizontal_forward() {
        let tuning = UltimateTuning::default();
        // forward немного смотрит вниз → вертикальная часть игнорируется
        let forward = Vec3::new(0.0, -0.5, -1.0).normalize();

        let impulse = ultimate_impulse(forward, &tuning, 1.0, 1.0);
        assert!(impulse.abs_diff_eq(Vec3::new(0.0, 200.0, 500.0), 1e-3));
    }

    #[test]
    fn test_impulse_scaled_by_gravity_and_mass() {
        let tuning = UltimateTuning {
            force_magnitude: 10.0,
            upward_force: 2.0,
            ..Default::default()
        };

        let impulse = ultimate_impulse(Vec3::X, &tuning, 2.0, 50.0);
        assert!(impulse.abs_diff_eq(Vec3::new(-1000.0, 200.0, 0.0), 1e-3));
    }
}
