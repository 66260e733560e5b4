use crate::action::{GameplayInput, InputButton, InputButtons};
use bevy_derive::{Deref, DerefMut};
use bevy_ecs::component::Component;
use bevy_reflect::Reflect;
use core::marker::PhantomData;
use serde::{Deserialize, Serialize};
use stickwire_inputs::{UserAction, UserActionState};

/// The component that stores the authoritative input for the current tick.
///
/// Simulation code reads this instead of the device layer; on ticks where the
/// runner delivered nothing, the previous value is kept.
/// The `Default` value means "no input active", which is distinct from
/// "input not received".
#[derive(
    Component, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Reflect, Deref, DerefMut,
)]
pub struct ActionState<A>(pub A);

impl<A: UserAction + Default> UserActionState for ActionState<A> {
    type UserAction = A;
}

/// Marker component to identify the ActionState that the player is actively
/// updating (as opposed to the ActionState of other players, for instance)
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct InputMarker<A> {
    #[reflect(ignore)]
    marker: PhantomData<A>,
}

/// Button bits from the input consumed by the previous completed tick.
///
/// Recorded after each tick on the instances selected by the replication
/// policy, so that gameplay code can edge-detect without tracking state.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Reflect)]
pub struct PreviousButtons(pub InputButtons);

impl PreviousButtons {
    /// Whether `button` went down between the previous tick and `current`.
    pub fn just_pressed(&self, current: &GameplayInput, button: InputButton) -> bool {
        current.buttons.pressed(self.0).is_set(button)
    }

    /// Whether `button` went up between the previous tick and `current`.
    pub fn just_released(&self, current: &GameplayInput, button: InputButton) -> bool {
        current.buttons.released(self.0).is_set(button)
    }
}
