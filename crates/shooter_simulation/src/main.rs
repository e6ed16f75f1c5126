//! Headless симуляция shooter gameplay
//!
//! Персонаж + два pickup item'а, scripted input на несколько сотен тиков.
//! Первый аргумент: путь к RON config'у (опционально).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use shooter_simulation::input::{InputAction, InputAxis, PlayerActionInput, PlayerAxisInput};
use shooter_simulation::*;

const TICKS: u32 = 600;

fn main() {
    init_logger();
    set_log_level(LogLevel::Info);

    let config = match std::env::args().nth(1) {
        Some(path) => GameplayConfig::load_or_default(path),
        None => GameplayConfig::default(),
    };
    log_info("Starting shooter headless simulation");

    let mut app = create_headless_app_with_config(config.clone());
    // 60Hz фиксированный шаг, независимо от реального времени
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let world = app.world_mut();
    let character = spawn_player_character(
        &mut world.commands(),
        Transform::default(),
        &config,
        DefaultWeaponLoadout {
            weapon: Some(AssetRef::from("pistol")),
        },
    );
    let rifle = spawn_pickup_item(
        &mut world.commands(),
        "rifle",
        Transform::from_xyz(0.0, 20.0, -400.0),
        ItemShape::default(),
    );
    let shotgun = spawn_pickup_item(
        &mut world.commands(),
        "shotgun",
        Transform::from_xyz(250.0, 20.0, -900.0),
        ItemShape::default(),
    );
    world.flush();
    world.entity_mut(character).insert(CombatAssets {
        pistol_sound: Some(AssetRef::from("pistol_shot")),
        pistol_muzzle_fx: Some(AssetRef::from("muzzle_flash")),
        pistol_hit_fx: Some(AssetRef::from("impact")),
        pistol_beam_fx: Some(AssetRef::from("beam")),
        pistol_fire_montage: Some(MontageAsset::new("pistol_fire", 0.4)),
        ultimate_fire_montage: Some(MontageAsset::new("ultimate", 1.2)),
        ultimate_muzzle_fx: Some(AssetRef::from("bazooka_flash")),
        ultimate_sound: Some(AssetRef::from("bazooka_boom")),
    });

    // Идём вперёд к item'ам, стреляем, в середине: ultimate
    for tick in 0..TICKS {
        let world = app.world_mut();
        if tick < 300 {
            world.send_event(PlayerAxisInput {
                axis: InputAxis::MoveForward,
                value: 1.0,
            });
        }
        if tick % 90 == 45 {
            world.send_event(PlayerActionInput::pressed(InputAction::FirePistol));
        }
        if tick == 320 {
            world.send_event(PlayerActionInput::pressed(InputAction::UltimateAbility));
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let position = world
                .get::<Transform>(character)
                .map(|t| t.translation)
                .unwrap_or_default();
            let overlaps = world.get::<OverlapCounter>(character).map(|c| c.count).unwrap_or(0);
            let prompts: Vec<_> = [rifle, shotgun]
                .into_iter()
                .filter(|&item| world.get::<PickupWidget>(item).is_some_and(|w| w.visible))
                .collect();
            log_info(&format!(
                "Tick {}: position {:?}, overlaps {}, prompts {:?}",
                tick, position, overlaps, prompts
            ));
        }
    }

    log_info("Simulation complete!");
}
