//! Plugin assembling the gameplay input pipeline.
use crate::accumulate::{accumulate_gameplay_input, record_previous_buttons};
use crate::action::GameplayInput;
use crate::action_state::{ActionState, InputMarker, PreviousButtons};
use crate::migrate::on_migrated;
use crate::source::{GameplayActions, InputBindings, read_device_actions};
use bevy_app::{App, FixedPostUpdate, Plugin, RunFixedMainLoop};
use bevy_ecs::schedule::IntoScheduleConfigs;
use stickwire_inputs::accumulator::ProvideInput;
use stickwire_inputs::config::InputConfig;
use stickwire_inputs::input_buffer::InputBuffer;
use stickwire_inputs::player::PlayerObjects;
use stickwire_inputs::plugin::{BaseInputPlugin, InputSet};
use stickwire_inputs::replication::{ReplicateTo, ReplicationPolicy};

/// Field labels used in the replication policy.
pub const GAMEPLAY_INPUT_FIELD: &str = "gameplay_input";
pub const PREVIOUS_BUTTONS_FIELD: &str = "previous_buttons";

/// Wires the gameplay input record into the runner: device reading,
/// per-frame accumulation, per-tick polling and post-tick bookkeeping.
pub struct GameplayInputPlugin {
    pub config: InputConfig<ActionState<GameplayInput>>,
    /// Per-field replication policy. The default replicates the input record
    /// to everyone and the previous-buttons cache only to the input
    /// authority, which saves traffic for a field other clients never read.
    pub policy: ReplicationPolicy,
}

impl Default for GameplayInputPlugin {
    fn default() -> Self {
        Self {
            config: InputConfig::default(),
            policy: ReplicationPolicy::default()
                .with(GAMEPLAY_INPUT_FIELD, ReplicateTo::All)
                .with(PREVIOUS_BUTTONS_FIELD, ReplicateTo::InputAuthority),
        }
    }
}

impl Plugin for GameplayInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(BaseInputPlugin::<
            ActionState<GameplayInput>,
            InputMarker<GameplayInput>,
        >::new(self.config));

        app.insert_resource(self.policy.clone());
        app.init_resource::<GameplayActions>();
        app.init_resource::<InputBindings>();
        app.init_resource::<PlayerObjects>();

        app.add_systems(
            RunFixedMainLoop,
            (read_device_actions, accumulate_gameplay_input)
                .chain()
                .in_set(InputSet::Accumulate),
        );
        app.add_systems(
            FixedPostUpdate,
            record_previous_buttons.in_set(InputSet::AdvanceTick),
        );
        app.add_observer(on_migrated);

        app.register_required_components::<InputMarker<GameplayInput>, PreviousButtons>();

        app.register_type::<GameplayInput>();
        app.register_type::<ActionState<GameplayInput>>();
        app.register_type::<InputMarker<GameplayInput>>();
        app.register_type::<InputBuffer<ActionState<GameplayInput>>>();
        app.register_type::<PreviousButtons>();
        app.register_type::<GameplayActions>();
        app.register_type::<InputBindings>();
        app.register_type::<ProvideInput>();
    }
}
