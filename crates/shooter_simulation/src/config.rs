//! Gameplay tuning: загружается из RON, всё остальное берёт значения отсюда
//!
//! Единицы мира: сантиметры (как у исходных ассетов): arm length 300,
//! trace 50 000, gravity 980.
//!
//! ```ron
//! (
//!     character: (base_turn_rate: 45.0),
//!     ultimate: (ability_delay: 0.2, emitter_delay: 0.6),
//! )
//! ```
//! Отсутствующие поля получают значения по умолчанию.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logger;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Корневой конфиг (Resource)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub character: CharacterTuning,
    pub camera: CameraTuning,
    pub ultimate: UltimateTuning,
    pub trace: TraceTuning,
}

impl GameplayConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Missing/invalid файл → defaults (с warning в лог)
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                logger::log_warning(&format!("{}, using default gameplay config", err));
                Self::default()
            }
        }
    }
}

/// Движение и look input персонажа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// deg/sec для BaseTurn (геймпад)
    pub base_turn_rate: f32,
    /// deg/sec для BaseLookUp (геймпад)
    pub base_look_up_rate: f32,
    pub max_walk_speed: f32,
    /// Мировая гравитация (до умножения на gravity_scale)
    pub gravity: f32,
    pub gravity_scale: f32,
    pub mass: f32,
    /// deg/sec, используется при orient_rotation_to_movement
    pub rotation_rate: f32,
    pub use_controller_yaw: bool,
    pub orient_rotation_to_movement: bool,
    /// Ограничение pitch контроллера (градусы, симметрично)
    pub pitch_limit: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            base_turn_rate: 55.0,
            base_look_up_rate: 55.0,
            max_walk_speed: 600.0,
            gravity: 980.0,
            gravity_scale: 10.0,
            mass: 100.0,
            rotation_rate: 540.0,
            use_controller_yaw: true,
            orient_rotation_to_movement: false,
            pitch_limit: 89.0,
        }
    }
}

/// Camera boom + aim zoom
///
/// Векторы в локальных осях Bevy: +X вправо, +Y вверх, −Z вперёд.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub arm_length: f32,
    pub socket_offset: [f32; 3],
    pub pivot_height: f32,
    pub zoom_interp_speed: f32,
    pub aim_offset: [f32; 3],
    pub hip_offset: [f32; 3],
    /// (pitch, yaw, roll) в градусах
    pub aim_rotation: [f32; 3],
    pub hip_rotation: [f32; 3],
    /// Горизонтальный FOV, градусы
    pub aim_fov: f32,
    pub hip_fov: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            arm_length: 300.0,
            socket_offset: [50.0, 50.0, 0.0],
            pivot_height: 88.0,
            zoom_interp_speed: 5.0,
            aim_offset: [0.0, 40.0, -180.0],
            hip_offset: [0.0, 0.0, 0.0],
            aim_rotation: [0.0, 0.0, 0.0],
            hip_rotation: [0.0, 0.0, 0.0],
            aim_fov: 75.0,
            hip_fov: 90.0,
        }
    }
}

impl CameraTuning {
    pub fn socket_offset(&self) -> Vec3 {
        Vec3::from_array(self.socket_offset)
    }
}

/// Ultimate ability: сила + две независимые задержки
///
/// Третья задержка (re-enable input) = длина ultimate montage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltimateTuning {
    pub force_magnitude: f32,
    pub upward_force: f32,
    /// Задержка impulse (сек)
    pub ability_delay: f32,
    /// Задержка muzzle FX + sound (сек)
    pub emitter_delay: f32,
}

impl Default for UltimateTuning {
    fn default() -> Self {
        Self {
            force_magnitude: 500.0,
            upward_force: 200.0,
            ability_delay: 0.5,
            emitter_delay: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceTuning {
    pub crosshair_distance: f32,
    /// Barrel ray = muzzle + (target − muzzle) × extension
    pub barrel_extension: f32,
    pub debug_lines: bool,
    pub debug_line_lifetime: f32,
}

impl Default for TraceTuning {
    fn default() -> Self {
        Self {
            crosshair_distance: 50_000.0,
            barrel_extension: 2.5,
            debug_lines: true,
            debug_line_lifetime: 2.0,
        }
    }
}
