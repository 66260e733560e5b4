use bevy_math::Vec2;
use bevy_reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Logical buttons tracked by [`GameplayInput`].
///
/// The discriminant is the bit index in [`InputButtons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum InputButton {
    Jump = 0,
}

/// Bit set of pressed logical buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub struct InputButtons(u16);

impl InputButtons {
    pub fn set(&mut self, button: InputButton, pressed: bool) {
        let bit = 1u16 << (button as u16);
        if pressed {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn is_set(&self, button: InputButton) -> bool {
        self.0 & (1u16 << (button as u16)) != 0
    }

    /// Buttons that are set in `self` but were not set in `previous`.
    pub fn pressed(&self, previous: InputButtons) -> InputButtons {
        InputButtons(self.0 & !previous.0)
    }

    /// Buttons that were set in `previous` but are no longer set in `self`.
    pub fn released(&self, previous: InputButtons) -> InputButtons {
        InputButtons(previous.0 & !self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// The input record shipped to the runner once per tick.
///
/// `move_direction` is always either the zero vector or unit-length; the
/// record is overwritten wholesale each frame, never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
pub struct GameplayInput {
    pub move_direction: Vec2,
    pub buttons: InputButtons,
}

impl GameplayInput {
    /// Build a record from a raw device vector, normalizing the direction.
    pub fn new(move_direction: Vec2, buttons: InputButtons) -> Self {
        Self {
            move_direction: move_direction.normalize_or_zero(),
            buttons,
        }
    }
}
