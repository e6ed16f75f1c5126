//! Keyboard/mouse → PlayerAxisInput / PlayerActionInput
//!
//! Работает только если host добавил `InputPlugin` (ресурсы
//! `ButtonInput<KeyCode>` и т.д.). Headless запуск шлёт события напрямую.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use super::events::{InputAction, InputAxis, PlayerActionInput, PlayerAxisInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputButton {
    Key(KeyCode),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    pub button: InputButton,
    pub axis: InputAxis,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBinding {
    pub button: InputButton,
    pub action: InputAction,
}

/// Action mapping (Resource)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    pub axes: Vec<AxisBinding>,
    pub actions: Vec<ActionBinding>,
    /// Градусы на пиксель движения мыши (Turn / LookUp)
    pub mouse_sensitivity: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        use InputButton::{Key, Mouse};

        let axis = |button, axis, scale| AxisBinding { button, axis, scale };
        let action = |button, action| ActionBinding { button, action };

        Self {
            axes: vec![
                axis(Key(KeyCode::KeyW), InputAxis::MoveForward, 1.0),
                axis(Key(KeyCode::KeyS), InputAxis::MoveForward, -1.0),
                axis(Key(KeyCode::KeyD), InputAxis::MoveRight, 1.0),
                axis(Key(KeyCode::KeyA), InputAxis::MoveRight, -1.0),
                axis(Key(KeyCode::ArrowRight), InputAxis::BaseTurn, 1.0),
                axis(Key(KeyCode::ArrowLeft), InputAxis::BaseTurn, -1.0),
                axis(Key(KeyCode::ArrowUp), InputAxis::BaseLookUp, 1.0),
                axis(Key(KeyCode::ArrowDown), InputAxis::BaseLookUp, -1.0),
            ],
            actions: vec![
                action(Mouse(MouseButton::Left), InputAction::FirePistol),
                action(Key(KeyCode::KeyE), InputAction::UltimateAbility),
                action(Mouse(MouseButton::Right), InputAction::Aiming),
            ],
            mouse_sensitivity: 0.1,
        }
    }
}

/// Суммы axes по зажатым кнопкам (порядок `InputAxis::ALL`, нули пропущены)
pub fn collect_axis_values(
    bindings: &InputBindings,
    is_pressed: impl Fn(InputButton) -> bool,
) -> Vec<(InputAxis, f32)> {
    InputAxis::ALL
        .into_iter()
        .filter_map(|axis| {
            let value: f32 = bindings
                .axes
                .iter()
                .filter(|binding| binding.axis == axis && is_pressed(binding.button))
                .map(|binding| binding.scale)
                .sum();
            (value != 0.0).then_some((axis, value))
        })
        .collect()
}

/// System: device state → input events
pub fn read_device_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    bindings: Res<InputBindings>,
    mut axis_events: EventWriter<PlayerAxisInput>,
    mut action_events: EventWriter<PlayerActionInput>,
) {
    if keys.is_none() && mouse_buttons.is_none() {
        return;
    }

    let keys = keys.as_deref();
    let mouse_buttons = mouse_buttons.as_deref();

    let pressed = |button: InputButton| match button {
        InputButton::Key(key) => keys.is_some_and(|k| k.pressed(key)),
        InputButton::Mouse(button) => mouse_buttons.is_some_and(|m| m.pressed(button)),
    };
    let just_pressed = |button: InputButton| match button {
        InputButton::Key(key) => keys.is_some_and(|k| k.just_pressed(key)),
        InputButton::Mouse(button) => mouse_buttons.is_some_and(|m| m.just_pressed(button)),
    };
    let just_released = |button: InputButton| match button {
        InputButton::Key(key) => keys.is_some_and(|k| k.just_released(key)),
        InputButton::Mouse(button) => mouse_buttons.is_some_and(|m| m.just_released(button)),
    };

    for (axis, value) in collect_axis_values(&bindings, pressed) {
        axis_events.write(PlayerAxisInput { axis, value });
    }

    if let Some(motion) = mouse_motion {
        let delta = motion.delta * bindings.mouse_sensitivity;
        if delta.x != 0.0 {
            axis_events.write(PlayerAxisInput {
                axis: InputAxis::Turn,
                value: delta.x,
            });
        }
        if delta.y != 0.0 {
            // Экранный Y растёт вниз
            axis_events.write(PlayerAxisInput {
                axis: InputAxis::LookUp,
                value: -delta.y,
            });
        }
    }

    for binding in bindings.actions.iter() {
        if just_pressed(binding.button) {
            action_events.write(PlayerActionInput::pressed(binding.action));
        }
        if just_released(binding.button) {
            action_events.write(PlayerActionInput::released(binding.action));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel_out() {
        let bindings = InputBindings::default();
        let values = collect_axis_values(&bindings, |button| {
            matches!(
                button,
                InputButton::Key(KeyCode::KeyW) | InputButton::Key(KeyCode::KeyS) | InputButton::Key(KeyCode::KeyD)
            )
        });

        assert_eq!(values, vec![(InputAxis::MoveRight, 1.0)]);
    }

    #[test]
    fn test_default_bindings_cover_all_actions() {
        let bindings = InputBindings::default();
        for action in InputAction::ALL {
            assert!(bindings.actions.iter().any(|b| b.action == action));
        }
    }
}
