//! Combat domain: pistol fire + ultimate ability
//!
//! ECS ответственность:
//! - Решения: какой socket, какая section, когда срабатывают timers
//! - Impulse в `CharacterMovement`
//! - Input lock через `PlayerController`
//!
//! Host ответственность:
//! - Particles / audio / montage playback (читает effect события)
//!
//! ```text
//! FirePistolIntent ──→ fire_pistol ──→ SpawnEmitter, PlayMontage, PlaySound2D
//!                                  └─→ PistolShot → trace::resolve_pistol_beams
//! ActivateUltimateIntent → activate_ultimate → PlayMontage + TimerQueue
//! tick_ultimate_timers → enable_input / impulse / bazooka FX + sound
//! ```

use bevy::prelude::*;

pub mod effects;
pub mod pistol;
pub mod timers;
pub mod ultimate;

#[cfg(test)]
mod ultimate_tests;

pub use effects::*;
pub use pistol::*;
pub use timers::TimerQueue;
pub use ultimate::*;

/// Combat Plugin
///
/// Порядок выполнения (Update, `GameplaySet::Combat`):
/// 1. tick_ultimate_timers: callbacks предыдущих активаций
/// 2. activate_ultimate: новые активации (zero delay сработает на следующем tick'е)
/// 3. fire_pistol
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FirePistolIntent>()
            .add_event::<PistolShot>()
            .add_event::<ActivateUltimateIntent>()
            .add_event::<UltimateImpulseApplied>()
            .add_event::<SpawnEmitter>()
            .add_event::<SpawnBeam>()
            .add_event::<PlaySound2D>()
            .add_event::<PlayMontage>()
            .add_event::<DebugLine>();

        app.add_systems(
            Update,
            (tick_ultimate_timers, activate_ultimate, fire_pistol)
                .chain()
                .in_set(crate::GameplaySet::Combat),
        );
    }
}
