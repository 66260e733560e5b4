use crate::action::{GameplayInput, InputButton, InputButtons};
use crate::action_state::{ActionState, InputMarker, PreviousButtons};
use crate::plugin::PREVIOUS_BUTTONS_FIELD;
use crate::source::GameplayActions;
use bevy_ecs::query::{Has, With};
use bevy_ecs::system::{Query, Res};
use stickwire_core::timeline::LocalTimeline;
use stickwire_inputs::accumulator::{InputAccumulator, ProvideInput};
use stickwire_inputs::replication::{ReplicateTo, ReplicationPolicy};
use tracing::trace;

/// Accumulate device input into the per-frame record.
///
/// Runs before the fixed main loop, so it can run several times before a new
/// tick is simulated. The record is overwritten wholesale; while the runner
/// should not be fed input, it is reset to its default value instead, so no
/// stale movement leaks into the next tick.
pub(crate) fn accumulate_gameplay_input(
    runner: Query<&ProvideInput, With<LocalTimeline>>,
    actions: Res<GameplayActions>,
    mut query: Query<
        &mut InputAccumulator<ActionState<GameplayInput>>,
        With<InputMarker<GameplayInput>>,
    >,
) {
    let Ok(provide_input) = runner.single() else {
        return;
    };
    for mut accumulated in query.iter_mut() {
        if !provide_input.0 {
            accumulated.value = ActionState::default();
            continue;
        }
        let mut buttons = InputButtons::default();
        buttons.set(InputButton::Jump, actions.jump);
        accumulated.value = ActionState(GameplayInput::new(actions.move_axis, buttons));
        trace!(accumulated = ?accumulated.value, "accumulated device input");
    }
}

/// After a tick completes, record the button bits of the input that was
/// actually consumed for that tick, for edge detection on later ticks.
///
/// The replication policy decides which instances carry the record: under
/// `InputAuthority` (the default) or `LocalOnly`, only the locally-controlled
/// instance does.
pub(crate) fn record_previous_buttons(
    policy: Res<ReplicationPolicy>,
    mut query: Query<(
        &ActionState<GameplayInput>,
        &mut PreviousButtons,
        Has<InputMarker<GameplayInput>>,
    )>,
) {
    let target = policy.target(PREVIOUS_BUTTONS_FIELD);
    for (action_state, mut previous, is_local) in query.iter_mut() {
        if !is_local && target != ReplicateTo::All {
            continue;
        }
        previous.0 = action_state.buttons;
    }
}
