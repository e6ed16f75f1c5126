//! Player input events
//!
//! Генерируются keyboard/mouse reader'ом (`read_device_input`) или
//! host'ом напрямую (headless, tests). Имена axes/actions совпадают с
//! action mapping'ом host'а (`InputAxis::name`, `InputAction::name`).

use bevy::prelude::*;

/// Непрерывные axes (значение каждый frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAxis {
    MoveForward,
    MoveRight,
    /// Rate-based yaw (геймпад): value × base_turn_rate × dt
    BaseTurn,
    /// Rate-based pitch (геймпад): value × base_look_up_rate × dt
    BaseLookUp,
    /// Raw yaw (мышь), градусы
    Turn,
    /// Raw pitch (мышь), градусы
    LookUp,
}

impl InputAxis {
    pub const ALL: [InputAxis; 6] = [
        InputAxis::MoveForward,
        InputAxis::MoveRight,
        InputAxis::BaseTurn,
        InputAxis::BaseLookUp,
        InputAxis::Turn,
        InputAxis::LookUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputAxis::MoveForward => "MoveForward",
            InputAxis::MoveRight => "MoveRight",
            InputAxis::BaseTurn => "BaseTurn",
            InputAxis::BaseLookUp => "BaseLookUp",
            InputAxis::Turn => "Turn",
            InputAxis::LookUp => "LookUp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

/// Дискретные actions (press/release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAction {
    FirePistol,
    UltimateAbility,
    /// Hold: pressed → aim, released → hip
    Aiming,
}

impl InputAction {
    pub const ALL: [InputAction; 3] = [
        InputAction::FirePistol,
        InputAction::UltimateAbility,
        InputAction::Aiming,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputAction::FirePistol => "FirePistol",
            InputAction::UltimateAbility => "UltimateAbility",
            InputAction::Aiming => "Aiming",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// Axis value за frame
///
/// Положительные значения: вперёд, вправо, поворот вправо, взгляд вверх.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAxisInput {
    pub axis: InputAxis,
    pub value: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerActionInput {
    pub action: InputAction,
    pub pressed: bool,
}

impl PlayerActionInput {
    pub fn pressed(action: InputAction) -> Self {
        Self { action, pressed: true }
    }

    pub fn released(action: InputAction) -> Self {
        Self { action, pressed: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for axis in InputAxis::ALL {
            assert_eq!(InputAxis::from_name(axis.name()), Some(axis));
        }
        for action in InputAction::ALL {
            assert_eq!(InputAction::from_name(action.name()), Some(action));
        }
        assert_eq!(InputAxis::from_name("Jump"), None);
    }

    #[test]
    fn test_exact_action_names() {
        assert_eq!(InputAxis::BaseLookUp.name(), "BaseLookUp");
        assert_eq!(InputAction::UltimateAbility.name(), "UltimateAbility");
    }
}
