//! Shooter Simulation Core
//!
//! Gameplay third-person shooter'а на Bevy 0.16 (headless ECS).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (input, movement, camera rig, pistol, ultimate, pickup items)
//! - Host = rendering, particles, audio, montage playback (читает effect события)
//!
//! Physics queries идут через `trace::TraceBackend`: scripted `TraceScene`
//! (headless, tests) или `bevy_rapier3d` (`physics::RapierBackendPlugin`).

use bevy::prelude::*;

// Публичные модули
pub mod camera;
pub mod collision;
pub mod combat;
pub mod components;
pub mod config;
pub mod equipment;
pub mod input;
pub mod item;
pub mod logger;
pub mod movement;
pub mod overlap;
pub mod physics;
pub mod trace;

// Re-export базовых компонентов для удобства
pub use combat::{ActivateUltimateIntent, CombatPlugin, FirePistolIntent, UltimateAbility};
pub use components::*;
pub use config::{ConfigError, GameplayConfig};
pub use equipment::{EquipItemIntent, EquipmentPlugin};
pub use item::{spawn_pickup_item, Item, ItemPlugin, ItemShape, ItemState, PickupWidget};
pub use logger::*;
pub use overlap::{ItemFocus, ItemOverlap, OverlapCounter, OverlapPlugin};

use camera::CameraPlugin;
use input::PlayerInputPlugin;
use movement::MovementPlugin;
use physics::RapierBackendPlugin;
use trace::SceneTracePlugin;

/// Порядок gameplay шагов внутри `Update`
///
/// Input → Movement → Camera → Equipment → Items → Overlap → Combat → Trace.
/// Trace последний: focus prompt'а и beam'ы видят позы этого tick'а.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Movement,
    Camera,
    Equipment,
    Items,
    Overlap,
    Combat,
    Trace,
}

/// Откуда берутся traces и overlap'ы
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhysicsBackend {
    /// `TraceScene` + proximity overlaps (без физики)
    #[default]
    Scene,
    /// bevy_rapier3d: cast_ray + sensor collision events
    Rapier,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationPlugin {
    pub backend: PhysicsBackend,
}

impl SimulationPlugin {
    pub fn with_rapier() -> Self {
        Self {
            backend: PhysicsBackend::Rapier,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Host мог вставить свой (загруженный из RON) config до plugin'а
        if !app.world().contains_resource::<GameplayConfig>() {
            app.insert_resource(GameplayConfig::default());
        }

        app.configure_sets(
            Update,
            (
                GameplaySet::Input,
                GameplaySet::Movement,
                GameplaySet::Camera,
                GameplaySet::Equipment,
                GameplaySet::Items,
                GameplaySet::Overlap,
                GameplaySet::Combat,
                GameplaySet::Trace,
            )
                .chain(),
        );

        app.add_plugins((
            PlayerInputPlugin,
            MovementPlugin,
            CameraPlugin,
            EquipmentPlugin,
            ItemPlugin,
            OverlapPlugin,
            CombatPlugin,
        ));

        match self.backend {
            PhysicsBackend::Scene => {
                app.add_plugins(SceneTracePlugin);
            }
            PhysicsBackend::Rapier => {
                app.add_plugins(RapierBackendPlugin);
            }
        }

        log_info(&format!("SimulationPlugin built ({:?} backend)", self.backend));
    }
}

/// Создаёт minimal Bevy App для headless симуляции (scene backend)
pub fn create_headless_app() -> App {
    create_headless_app_with_config(GameplayConfig::default())
}

pub fn create_headless_app_with_config(config: GameplayConfig) -> App {
    create_headless_app_with_backend(config, PhysicsBackend::Scene)
}

pub fn create_headless_app_with_backend(config: GameplayConfig, backend: PhysicsBackend) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(config)
        .add_plugins(SimulationPlugin { backend });

    app
}

/// Spawn player character со всеми компонентами gameplay'а
///
/// Стартовое оружие (если задано) spawn'ится и экипируется на первом tick'е.
pub fn spawn_player_character(
    commands: &mut Commands,
    transform: Transform,
    config: &GameplayConfig,
    loadout: DefaultWeaponLoadout,
) -> Entity {
    let entity = commands
        .spawn((
            (
                Player,
                PlayerController::default(),
                ControlRotation::default(),
                MovementInput::default(),
                CharacterMovement::from_tuning(&config.character),
                PawnCapsule::default(),
                transform,
            ),
            (
                CameraRig::from_tuning(&config.camera),
                FollowCamera::default(),
                CameraZoom::from_tuning(&config.camera),
                CameraView::default(),
                AimState::default(),
            ),
            (
                SkeletalSockets::mannequin(),
                CombatAssets::default(),
                UltimateAbility::new(config.ultimate.clone()),
                EquippedWeapon::default(),
                loadout,
            ),
            (OverlapCounter::default(), ItemFocus::default()),
        ))
        .id();

    log(&format!("Player character spawned: {:?} at {:?}", entity, transform.translation));
    entity
}
