use crate::UserActionState;
use crate::accumulator::{InputAccumulator, ProvideInput};
use crate::config::{InputConfig, SharedInputConfig};
use crate::input_buffer::InputBuffer;
use crate::registry::{
    CallbackHandle, RunnerCallbacks, RunnerEventKind, dispatch_input_poll, on_runner_signal,
};
use bevy_app::{
    App, FixedPostUpdate, FixedPreUpdate, Plugin, PostUpdate, RunFixedMainLoop,
    RunFixedMainLoopSystems,
};
use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::{IntoScheduleConfigs, SystemSet};
use bevy_ecs::system::{Query, Res};
use core::marker::PhantomData;
use stickwire_core::timeline::LocalTimeline;
use tracing::trace;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum InputSet {
    // RUN FIXED MAIN LOOP (before the fixed main loop)
    /// Accumulate raw device input into the per-frame record.
    /// Runs once per render frame, so it can run several times before the
    /// next tick is simulated (rendering faster than the simulation), or not
    /// at all between two ticks (rendering slower).
    Accumulate,

    // FIXED PRE UPDATE
    /// The runner polls the accumulated record into the InputBuffer for the
    /// current tick, through the callback registration table.
    PollInputs,
    /// Apply the buffered record for the current tick to the action state
    /// that simulation code reads.
    ApplyInputs,

    // FIXED POST UPDATE
    /// Post-tick bookkeeping, once the tick's input has been consumed.
    AdvanceTick,

    // POST UPDATE
    /// Clean up old values to prevent the buffers from growing indefinitely
    CleanUp,
}

/// Handle of the per-tick poll callback registered by
/// [`BaseInputPlugin<A, F>`], kept around so the app can deregister it
/// (e.g. after a host migration).
#[derive(Resource, Debug)]
pub struct InputPollHandle<A> {
    handle: CallbackHandle,
    marker: PhantomData<A>,
}

impl<A> InputPollHandle<A> {
    pub(crate) fn new(handle: CallbackHandle) -> Self {
        Self {
            handle,
            marker: PhantomData,
        }
    }

    pub fn handle(&self) -> CallbackHandle {
        self.handle
    }
}

/// Generic scaffolding shared by all action types: schedules the input sets,
/// registers the poll callback and maintains the buffers.
///
/// `F` is the marker component identifying the locally-controlled instance.
pub struct BaseInputPlugin<A, F> {
    config: InputConfig<A>,
    _marker: PhantomData<F>,
}

impl<A, F> BaseInputPlugin<A, F> {
    pub fn new(config: InputConfig<A>) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }
}

impl<A, F> Default for BaseInputPlugin<A, F> {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl<A: UserActionState, F: Component> Plugin for BaseInputPlugin<A, F> {
    fn build(&self, app: &mut App) {
        // SETS
        app.configure_sets(
            RunFixedMainLoop,
            InputSet::Accumulate.in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
        );
        app.configure_sets(
            FixedPreUpdate,
            (InputSet::PollInputs, InputSet::ApplyInputs).chain(),
        );
        app.configure_sets(FixedPostUpdate, InputSet::AdvanceTick);
        app.configure_sets(PostUpdate, InputSet::CleanUp);

        app.init_resource::<RunnerCallbacks>();
        app.init_resource::<SharedInputConfig>();
        app.insert_resource(self.config);

        // Register the per-tick poll for this action type in the callback
        // table; the handle stays available for deregistration.
        let poll = app.world_mut().register_system(poll_accumulated::<A, F>);
        let handle = app
            .world_mut()
            .resource_mut::<RunnerCallbacks>()
            .register(RunnerEventKind::InputPoll, poll);
        app.insert_resource(InputPollHandle::<A>::new(handle));

        // SYSTEMS
        let dispatch_added = app
            .world()
            .resource::<SharedInputConfig>()
            .poll_dispatch_added;
        if !dispatch_added {
            app.world_mut()
                .resource_mut::<SharedInputConfig>()
                .poll_dispatch_added = true;
            app.add_systems(
                FixedPreUpdate,
                dispatch_input_poll.in_set(InputSet::PollInputs),
            );
            app.add_observer(on_runner_signal);
            app.register_required_components::<LocalTimeline, ProvideInput>();
        }
        app.add_systems(
            FixedPreUpdate,
            apply_action_state::<A>.in_set(InputSet::ApplyInputs),
        );
        app.add_systems(PostUpdate, clean_buffers::<A>.in_set(InputSet::CleanUp));

        // Inserting the marker is enough to make an entity pollable.
        app.register_required_components::<F, A>();
        app.register_required_components::<F, InputAccumulator<A>>();
        app.register_required_components::<A, InputBuffer<A>>();
    }
}

/// Write the accumulated record into the InputBuffer for the current tick.
///
/// Runs through the callback table when the runner polls; polling is
/// idempotent because the write overwrites the same tick with the same value
/// and the accumulator itself is left untouched.
pub(crate) fn poll_accumulated<A: UserActionState, F: Component>(
    timeline: Query<&LocalTimeline>,
    mut query: Query<(Entity, &InputAccumulator<A>, &mut InputBuffer<A>), With<F>>,
) {
    let Ok(timeline) = timeline.single() else {
        return;
    };
    let tick = timeline.tick();
    for (entity, accumulated, mut buffer) in query.iter_mut() {
        buffer.set(tick, accumulated.value.clone());
        trace!(
            ?entity,
            ?tick,
            accumulated = ?accumulated.value,
            "polled accumulated input into buffer",
        );
        #[cfg(feature = "metrics")]
        {
            metrics::gauge!(format!(
                "inputs::{}::{}::buffer_size",
                core::any::type_name::<A>(),
                entity
            ))
            .set(buffer.len() as f64);
        }
    }
}

/// Apply the buffered record for the current tick to the action state.
///
/// This covers both the locally-controlled instance (input written by the
/// poll just before) and other instances (input delivered by the runner into
/// their buffer). If the buffer has no value for this tick we leave the
/// action state untouched, which amounts to assuming the last known input is
/// still held.
pub(crate) fn apply_action_state<A: UserActionState>(
    timeline: Query<&LocalTimeline>,
    mut query: Query<(Entity, &mut A, &InputBuffer<A>)>,
) {
    let Ok(timeline) = timeline.single() else {
        return;
    };
    let tick = timeline.tick();
    for (entity, mut action_state, buffer) in query.iter_mut() {
        if let Some(action) = buffer.get(tick) {
            *action_state = action.clone();
            trace!(
                ?entity,
                ?tick,
                action_state = ?action_state,
                "applied buffered input to action state",
            );
        }
    }
}

/// System that removes old entries from the InputBuffer
pub(crate) fn clean_buffers<A: UserActionState>(
    config: Res<InputConfig<A>>,
    timeline: Query<&LocalTimeline>,
    mut buffers: Query<&mut InputBuffer<A>>,
) {
    let Ok(timeline) = timeline.single() else {
        return;
    };
    let old_tick = timeline.tick() - config.buffer_history;
    for mut buffer in buffers.iter_mut() {
        buffer.pop(old_tick);
    }
}
