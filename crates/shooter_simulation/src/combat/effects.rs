//! Effect requests для внешнего host'а (particles, audio, montages, debug draw)
//!
//! ECS только решает, *что* и *где* проиграть. Host читает эти события
//! и вызывает свои particle/audio/animation системы. Каждый helper
//! независимо no-op'ит при отсутствии ассета/socket'а: потерянный звук
//! не блокирует FX и анимацию.

use bevy::prelude::*;

use crate::components::{AssetRef, MontageAsset, SkeletalSockets};

/// Montage section выстрела из пистолета
pub const FIRE_SECTION: &str = "Fire";
/// Montage section ultimate ability
pub const ULTIMATE_SECTION: &str = "Ultimate";

/// Spawn particle emitter в world transform
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnEmitter {
    pub owner: Entity,
    pub fx: AssetRef,
    pub transform: Transform,
}

/// Beam emitter от `start` до `end`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnBeam {
    pub owner: Entity,
    pub fx: AssetRef,
    pub start: Vec3,
    pub end: Vec3,
}

impl SpawnBeam {
    /// Ориентация beam'а (−Z смотрит на `end`)
    pub fn rotation(&self) -> Quat {
        Transform::from_translation(self.start)
            .looking_at(self.end, Vec3::Y)
            .rotation
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Non-positional звук
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySound2D {
    pub owner: Entity,
    pub sound: AssetRef,
}

/// Проиграть section montage'а на skeletal mesh owner'а
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayMontage {
    pub owner: Entity,
    pub montage: AssetRef,
    pub section: &'static str,
    pub play_length: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Green,
    Red,
}

/// Debug линия (trace визуализация)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: DebugColor,
    /// Секунды
    pub lifetime: f32,
}

/// FX в socket'е owner'а
///
/// Возвращает world transform socket'а (если socket есть), даже когда
/// сам FX не назначен: pistol beam всё равно стартует из muzzle.
pub fn spawn_fx_at_socket(
    emitters: &mut EventWriter<SpawnEmitter>,
    owner: Entity,
    owner_transform: &Transform,
    sockets: Option<&SkeletalSockets>,
    socket: &str,
    fx: Option<&AssetRef>,
) -> Option<Transform> {
    let Some(socket_transform) = sockets.and_then(|s| s.world(socket, owner_transform)) else {
        crate::logger::log(&format!("{:?}: socket '{}' not found, FX skipped", owner, socket));
        return None;
    };

    if let Some(fx) = fx {
        emitters.write(SpawnEmitter {
            owner,
            fx: fx.clone(),
            transform: socket_transform,
        });
    }

    Some(socket_transform)
}

/// Montage section; `false` если montage не назначен
pub fn play_animation(
    montages: &mut EventWriter<PlayMontage>,
    owner: Entity,
    montage: Option<&MontageAsset>,
    section: &'static str,
) -> bool {
    let Some(montage) = montage else {
        return false;
    };

    montages.write(PlayMontage {
        owner,
        montage: montage.id.clone(),
        section,
        play_length: montage.play_length,
    });
    true
}

pub fn play_sound(sounds: &mut EventWriter<PlaySound2D>, owner: Entity, sound: Option<&AssetRef>) -> bool {
    let Some(sound) = sound else {
        return false;
    };

    sounds.write(PlaySound2D {
        owner,
        sound: sound.clone(),
    });
    true
}
