use crate::action::GameplayInput;
use crate::action_state::ActionState;
use bevy_ecs::prelude::On;
use bevy_ecs::system::{Res, ResMut};
use stickwire_inputs::player::{Migrated, PlayerObjects};
use stickwire_inputs::plugin::InputPollHandle;
use stickwire_inputs::registry::RunnerCallbacks;
use tracing::{debug, warn};

/// Post-migration bookkeeping: re-register the surviving player object and
/// stop polling local input until the app re-registers the callback.
///
/// The migration itself (state transfer, authority reassignment) is the
/// runner's job and happens before this event is emitted.
pub(crate) fn on_migrated(
    migrated: On<Migrated>,
    mut player_objects: ResMut<PlayerObjects>,
    mut callbacks: ResMut<RunnerCallbacks>,
    poll: Res<InputPollHandle<ActionState<GameplayInput>>>,
) {
    player_objects.set(migrated.peer, migrated.entity);
    debug!(peer = %migrated.peer, entity = ?migrated.entity, "re-registered player object after migration");
    if let Err(err) = callbacks.unregister(poll.handle()) {
        warn!(peer = %migrated.peer, "could not stop input poll after migration: {err}");
    }
}
