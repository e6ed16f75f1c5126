//! Tests for ultimate ability systems.

use bevy::prelude::*;
use std::time::Duration;

use super::*;
use crate::components::{
    AssetRef, CharacterMovement, CombatAssets, MontageAsset, PlayerController, SkeletalSockets,
};
use crate::config::UltimateTuning;

#[derive(Resource, Default)]
struct Seen {
    montages: Vec<(PlayMontage, bool)>,
    emitters: Vec<SpawnEmitter>,
    sounds: Vec<PlaySound2D>,
    impulses: Vec<UltimateImpulseApplied>,
}

/// Host-side наблюдатель: фиксирует состояние input в момент montage
fn collect(
    mut montages: EventReader<PlayMontage>,
    mut emitters: EventReader<SpawnEmitter>,
    mut sounds: EventReader<PlaySound2D>,
    mut impulses: EventReader<UltimateImpulseApplied>,
    controllers: Query<&PlayerController>,
    mut seen: ResMut<Seen>,
) {
    for montage in montages.read() {
        let input_enabled = controllers
            .get(montage.owner)
            .map(|c| c.input_enabled)
            .unwrap_or(true);
        seen.montages.push((montage.clone(), input_enabled));
    }
    seen.emitters.extend(emitters.read().cloned());
    seen.sounds.extend(sounds.read().cloned());
    seen.impulses.extend(impulses.read().copied());
}

fn combat_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<Seen>()
        .add_event::<ActivateUltimateIntent>()
        .add_event::<UltimateImpulseApplied>()
        .add_event::<SpawnEmitter>()
        .add_event::<PlaySound2D>()
        .add_event::<PlayMontage>()
        .add_systems(Update, (tick_ultimate_timers, activate_ultimate).chain())
        .add_systems(PostUpdate, collect);
    app
}

fn ultimate_assets(play_length: f32) -> CombatAssets {
    CombatAssets {
        ultimate_fire_montage: Some(MontageAsset::new("ultimate_montage", play_length)),
        ultimate_muzzle_fx: Some(AssetRef::from("bazooka_flash")),
        ultimate_sound: Some(AssetRef::from("bazooka_boom")),
        ..Default::default()
    }
}

fn spawn_character(app: &mut App, assets: CombatAssets, tuning: UltimateTuning) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            PlayerController::default(),
            CharacterMovement::default(),
            SkeletalSockets::mannequin(),
            assets,
            UltimateAbility::new(tuning),
        ))
        .id()
}

fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn tuning(ability_delay: f32, emitter_delay: f32) -> UltimateTuning {
    UltimateTuning {
        ability_delay,
        emitter_delay,
        ..Default::default()
    }
}

#[test]
fn test_activation_locks_input_before_montage_and_schedules_three() {
    let mut app = combat_app();
    let character = spawn_character(&mut app, ultimate_assets(1.0), tuning(0.5, 0.35));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);

    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.montages.len(), 1);
    let (montage, input_enabled) = &seen.montages[0];
    assert_eq!(montage.section, "Ultimate");
    assert!(!input_enabled);

    let ability = app.world().get::<UltimateAbility>(character).unwrap();
    assert_eq!(ability.timers.len(), 3);
    assert!(ability.timers.is_pending(UltimateTimer::InputReenable));
    assert!(ability.timers.is_pending(UltimateTimer::Force));
    assert!(ability.timers.is_pending(UltimateTimer::Emitter));
}

#[test]
fn test_zero_delays_still_schedule_three_callbacks() {
    let mut app = combat_app();
    let character = spawn_character(&mut app, ultimate_assets(0.0), tuning(0.0, 0.0));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);
    assert_eq!(
        app.world().get::<UltimateAbility>(character).unwrap().timers.len(),
        3
    );

    step(&mut app, 0.0);

    let world = app.world();
    assert!(world.get::<UltimateAbility>(character).unwrap().timers.is_empty());
    assert!(world.get::<PlayerController>(character).unwrap().input_enabled);

    let seen = world.resource::<Seen>();
    assert_eq!(seen.impulses.len(), 1);
    assert_eq!(seen.emitters.len(), 1);
    assert_eq!(seen.sounds.len(), 1);
}

#[test]
fn test_callbacks_follow_their_own_delays() {
    let mut app = combat_app();
    // FX раньше impulse, input возвращается последним
    let character = spawn_character(&mut app, ultimate_assets(1.0), tuning(0.5, 0.2));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);

    step(&mut app, 0.3);
    {
        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.emitters.len(), 1);
        assert_eq!(seen.emitters[0].fx, AssetRef::from("bazooka_flash"));
        assert!(seen.impulses.is_empty());
    }

    step(&mut app, 0.3);
    assert_eq!(app.world().resource::<Seen>().impulses.len(), 1);
    assert!(!app.world().get::<PlayerController>(character).unwrap().input_enabled);

    step(&mut app, 0.5);
    assert!(app.world().get::<PlayerController>(character).unwrap().input_enabled);
}

#[test]
fn test_impulse_pushes_character_back_and_up() {
    let mut app = combat_app();
    let character = spawn_character(&mut app, ultimate_assets(1.0), tuning(0.0, 5.0));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);
    step(&mut app, 0.01);

    let movement = app.world().get::<CharacterMovement>(character).unwrap();
    // forward = −Z → отдача в +Z
    assert!(movement.velocity.z > 0.0);
    assert!(movement.velocity.y > 0.0);
    assert_eq!(movement.velocity.x, 0.0);
    assert!(!movement.grounded);
}

#[test]
fn test_missing_montage_skips_activation() {
    let mut app = combat_app();
    let assets = CombatAssets {
        ultimate_fire_montage: None,
        ..ultimate_assets(1.0)
    };
    let character = spawn_character(&mut app, assets, tuning(0.5, 0.35));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);

    let world = app.world();
    assert!(world.get::<PlayerController>(character).unwrap().input_enabled);
    assert!(world.get::<UltimateAbility>(character).unwrap().timers.is_empty());
    assert!(world.resource::<Seen>().montages.is_empty());
}

#[test]
fn test_character_without_controller_still_schedules() {
    let mut app = combat_app();
    let character = app
        .world_mut()
        .spawn((
            Transform::default(),
            ultimate_assets(1.0),
            UltimateAbility::new(tuning(0.5, 0.35)),
        ))
        .id();

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);

    assert_eq!(
        app.world().get::<UltimateAbility>(character).unwrap().timers.len(),
        3
    );
}

#[test]
fn test_reactivation_reschedules_pending_timers() {
    let mut app = combat_app();
    let character = spawn_character(&mut app, ultimate_assets(1.0), tuning(0.5, 0.35));

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);
    step(&mut app, 0.3);

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);

    let ability = app.world().get::<UltimateAbility>(character).unwrap();
    assert_eq!(ability.timers.len(), 3);
    let remaining = ability.timers.remaining_secs(UltimateTimer::Force).unwrap();
    assert!((remaining - 0.5).abs() < 1e-4);

    // Первая активация больше не применит impulse в 0.5s
    step(&mut app, 0.25);
    assert!(app.world().resource::<Seen>().impulses.is_empty());
}

#[test]
fn test_unbounded_delays_schedule_three_without_panicking() {
    let mut app = combat_app();
    let character = spawn_character(
        &mut app,
        ultimate_assets(f32::INFINITY),
        tuning(f32::MAX, f32::INFINITY),
    );

    app.world_mut().send_event(ActivateUltimateIntent { character });
    step(&mut app, 0.0);
    step(&mut app, 10.0);

    let world = app.world();
    let ability = world.get::<UltimateAbility>(character).unwrap();
    assert_eq!(ability.timers.len(), 3);
    assert!(!world.get::<PlayerController>(character).unwrap().input_enabled);

    let seen = world.resource::<Seen>();
    assert_eq!(seen.montages.len(), 1);
    assert!(seen.impulses.is_empty());
    assert!(seen.emitters.is_empty());
}
