//! Asset references + skeletal sockets
//!
//! Ассеты (particle systems, sounds, montages) живут во внешнем host'е;
//! здесь только их идентификаторы. `None` = ассет не назначен →
//! соответствующий эффект тихо пропускается.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Muzzle pistol (unarmed variant, пистолет в руке персонажа)
pub const PISTOL_MUZZLE_SOCKET: &str = "pistolMuzzle";
/// Muzzle bazooka (ultimate ability)
pub const BAZOOKA_MUZZLE_SOCKET: &str = "bazookaMuzzle";
/// Muzzle экипированного оружия
pub const GUN_MUZZLE_SOCKET: &str = "gunMuzzleSocket";
/// Правая рука: сюда attach'ится оружие
pub const HAND_SOCKET: &str = "hand_rSocket";

/// Идентификатор внешнего ассета (путь/имя в host'е)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct AssetRef(pub String);

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Animation montage + его длина (host знает длину, мы её кэшируем)
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MontageAsset {
    pub id: AssetRef,
    /// Секунды
    pub play_length: f32,
}

impl MontageAsset {
    pub fn new(id: impl Into<String>, play_length: f32) -> Self {
        Self {
            id: AssetRef(id.into()),
            play_length,
        }
    }
}

/// Combat ассеты персонажа (pistol + ultimate)
#[derive(Component, Clone, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CombatAssets {
    pub pistol_sound: Option<AssetRef>,
    pub pistol_muzzle_fx: Option<AssetRef>,
    pub pistol_hit_fx: Option<AssetRef>,
    pub pistol_beam_fx: Option<AssetRef>,
    pub pistol_fire_montage: Option<MontageAsset>,

    pub ultimate_fire_montage: Option<MontageAsset>,
    pub ultimate_muzzle_fx: Option<AssetRef>,
    pub ultimate_sound: Option<AssetRef>,
}

/// Named sockets скелета (local space персонажа)
///
/// Позы костей анимирует host; мы держим bind-pose transforms,
/// этого хватает для spawn эффектов и attach оружия.
#[derive(Component, Clone, Debug, Default)]
pub struct SkeletalSockets {
    pub sockets: HashMap<String, Transform>,
}

impl SkeletalSockets {
    pub fn with_socket(mut self, name: impl Into<String>, local: Transform) -> Self {
        self.sockets.insert(name.into(), local);
        self
    }

    pub fn local(&self, name: &str) -> Option<Transform> {
        self.sockets.get(name).copied()
    }

    /// World transform socket'а для owner'а
    pub fn world(&self, name: &str, owner: &Transform) -> Option<Transform> {
        self.local(name).map(|local| owner.mul_transform(local))
    }

    /// Sockets стандартного test-манекена (pistol в правой руке, bazooka на плече)
    pub fn mannequin() -> Self {
        Self::default()
            .with_socket(HAND_SOCKET, Transform::from_xyz(35.0, 110.0, -20.0))
            .with_socket(PISTOL_MUZZLE_SOCKET, Transform::from_xyz(35.0, 120.0, -60.0))
            .with_socket(GUN_MUZZLE_SOCKET, Transform::from_xyz(35.0, 125.0, -75.0))
            .with_socket(BAZOOKA_MUZZLE_SOCKET, Transform::from_xyz(-25.0, 160.0, -90.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_world_transform_follows_owner() {
        let sockets = SkeletalSockets::default()
            .with_socket(HAND_SOCKET, Transform::from_xyz(0.0, 0.0, -10.0));

        let owner = Transform::from_xyz(100.0, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        let world = sockets.world(HAND_SOCKET, &owner).unwrap();
        // −Z повёрнутый на +90° по Y → −X
        assert!(world.translation.abs_diff_eq(Vec3::new(90.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_missing_socket_is_none() {
        let sockets = SkeletalSockets::mannequin();
        assert!(sockets.world("spine_03", &Transform::IDENTITY).is_none());
        assert!(sockets.local(GUN_MUZZLE_SOCKET).is_some());
    }
}
