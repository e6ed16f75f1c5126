//! Player input systems (ECS)
//!
//! # Архитектура
//! - Читает: PlayerAxisInput, PlayerActionInput
//! - Пишет: MovementInput, ControlRotation, AimState, combat intents
//! - Query: With<Player> + PlayerController (без controller'а input не применяется)
//!
//! `PlayerController.input_enabled == false` → все события frame'а
//! отбрасываются (ultimate держит input выключенным на время montage).

use bevy::prelude::*;

use super::events::{InputAction, InputAxis, PlayerActionInput, PlayerAxisInput};
use crate::combat::{ActivateUltimateIntent, FirePistolIntent};
use crate::components::{AimState, ControlRotation, MovementInput, Player, PlayerController};
use crate::config::GameplayConfig;

/// System: axis/action events → компоненты и intents
pub fn process_player_input(
    mut axis_events: EventReader<PlayerAxisInput>,
    mut action_events: EventReader<PlayerActionInput>,
    mut players: Query<
        (
            Entity,
            &PlayerController,
            &mut ControlRotation,
            &mut MovementInput,
            &mut AimState,
        ),
        With<Player>,
    >,
    config: Res<GameplayConfig>,
    time: Res<Time>,
    mut fire_intents: EventWriter<FirePistolIntent>,
    mut ultimate_intents: EventWriter<ActivateUltimateIntent>,
) {
    // Guard: нет player entity → события теряются (как input без pawn'а)
    let Ok((entity, controller, mut control, mut movement, mut aim)) = players.single_mut() else {
        axis_events.clear();
        action_events.clear();
        return;
    };

    if !controller.input_enabled {
        axis_events.clear();
        action_events.clear();
        return;
    }

    let tuning = &config.character;
    let dt = time.delta_secs();

    for input in axis_events.read() {
        if input.value == 0.0 {
            continue;
        }

        match input.axis {
            InputAxis::MoveForward => movement.add(control.yaw_forward(), input.value),
            InputAxis::MoveRight => movement.add(control.yaw_right(), input.value),
            // Положительный turn = вправо = отрицательный yaw вокруг +Y
            InputAxis::BaseTurn => control.add_yaw(-input.value * tuning.base_turn_rate * dt),
            InputAxis::BaseLookUp => {
                control.add_pitch(input.value * tuning.base_look_up_rate * dt, tuning.pitch_limit)
            }
            InputAxis::Turn => control.add_yaw(-input.value),
            InputAxis::LookUp => control.add_pitch(input.value, tuning.pitch_limit),
        }
    }

    for input in action_events.read() {
        match (input.action, input.pressed) {
            (InputAction::FirePistol, true) => {
                fire_intents.write(FirePistolIntent { character: entity });
            }
            (InputAction::UltimateAbility, true) => {
                ultimate_intents.write(ActivateUltimateIntent { character: entity });
            }
            (InputAction::Aiming, pressed) => aim.is_aiming = pressed,
            _ => {}
        }
    }
}
