//! Pistol fire: muzzle FX + "Fire" section + 2D sound
//!
//! Без cooldown'а и патронов. Beam/hit FX резолвятся отдельно
//! (`trace::resolve_pistol_beams`), т.к. им нужен trace backend.

use bevy::prelude::*;

use super::effects::{
    play_animation, play_sound, spawn_fx_at_socket, PlayMontage, PlaySound2D, SpawnEmitter,
    FIRE_SECTION,
};
use crate::components::{
    CombatAssets, EquippedWeapon, SkeletalSockets, GUN_MUZZLE_SOCKET, PISTOL_MUZZLE_SOCKET,
};
use crate::logger;

/// Action "FirePistol" нажат
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirePistolIntent {
    pub character: Entity,
}

/// Выстрел состоялся, muzzle найден → нужен beam
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PistolShot {
    pub character: Entity,
    pub muzzle: Vec3,
}

/// Muzzle socket: оружие в руке → его ствол, иначе встроенный пистолет
pub fn muzzle_socket(equipped: Option<&EquippedWeapon>) -> &'static str {
    match equipped {
        Some(EquippedWeapon { weapon: Some(_) }) => GUN_MUZZLE_SOCKET,
        _ => PISTOL_MUZZLE_SOCKET,
    }
}

/// System: FirePistolIntent → effect requests + PistolShot
pub fn fire_pistol(
    mut intents: EventReader<FirePistolIntent>,
    characters: Query<(
        &Transform,
        &CombatAssets,
        Option<&SkeletalSockets>,
        Option<&EquippedWeapon>,
    )>,
    mut emitters: EventWriter<SpawnEmitter>,
    mut montages: EventWriter<PlayMontage>,
    mut sounds: EventWriter<PlaySound2D>,
    mut shots: EventWriter<PistolShot>,
) {
    for intent in intents.read() {
        let Ok((transform, assets, sockets, equipped)) = characters.get(intent.character) else {
            logger::log_warning(&format!(
                "FirePistolIntent: {:?} has no CombatAssets",
                intent.character
            ));
            continue;
        };

        let socket = muzzle_socket(equipped);
        let muzzle = spawn_fx_at_socket(
            &mut emitters,
            intent.character,
            transform,
            sockets,
            socket,
            assets.pistol_muzzle_fx.as_ref(),
        );

        play_animation(
            &mut montages,
            intent.character,
            assets.pistol_fire_montage.as_ref(),
            FIRE_SECTION,
        );
        play_sound(&mut sounds, intent.character, assets.pistol_sound.as_ref());

        if let Some(muzzle) = muzzle {
            shots.write(PistolShot {
                character: intent.character,
                muzzle: muzzle.translation,
            });
        }

        logger::log(&format!("{:?} fired pistol from '{}'", intent.character, socket));
    }
}
