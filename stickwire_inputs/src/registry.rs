//! Explicit registration table for runner callbacks.
//!
//! The runner notifies the glue through events of a fixed set of kinds;
//! handlers are registered per kind and dispatched in registration order on a
//! single thread, so dispatch is deterministic.

use bevy_ecs::event::Event;
use bevy_ecs::prelude::On;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Commands, Res, SystemId};
use bevy_platform::collections::HashMap;
use bevy_reflect::Reflect;
use thiserror::Error;

/// The kinds of events the runner can notify the glue about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum RunnerEventKind {
    /// The runner polls the accumulated input for the current tick.
    /// Dispatched once per fixed update; may fire again for the same tick.
    InputPoll,
    PlayerJoined,
    PlayerLeft,
    HostMigration,
    Shutdown,
}

/// Returned by [`RunnerCallbacks::register`]; used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackHandle {
    kind: RunnerEventKind,
    system: SystemId,
}

impl CallbackHandle {
    pub fn kind(&self) -> RunnerEventKind {
        self.kind
    }

    pub fn system(&self) -> SystemId {
        self.system
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackError {
    #[error("no callback registered for {0:?}")]
    NotRegistered(RunnerEventKind),
}

/// Table mapping each [`RunnerEventKind`] to the callbacks registered for it,
/// in registration order.
#[derive(Resource, Debug, Default)]
pub struct RunnerCallbacks {
    table: HashMap<RunnerEventKind, Vec<SystemId>>,
}

impl RunnerCallbacks {
    pub fn register(&mut self, kind: RunnerEventKind, system: SystemId) -> CallbackHandle {
        self.table.entry(kind).or_default().push(system);
        CallbackHandle { kind, system }
    }

    pub fn unregister(&mut self, handle: CallbackHandle) -> Result<(), CallbackError> {
        let callbacks = self
            .table
            .get_mut(&handle.kind)
            .ok_or(CallbackError::NotRegistered(handle.kind))?;
        let position = callbacks
            .iter()
            .position(|id| *id == handle.system)
            .ok_or(CallbackError::NotRegistered(handle.kind))?;
        callbacks.remove(position);
        Ok(())
    }

    /// The callbacks registered for `kind`, in registration order.
    pub fn registered(&self, kind: RunnerEventKind) -> &[SystemId] {
        self.table.get(&kind).map_or(&[], Vec::as_slice)
    }
}

/// Notification emitted by the app on the runner's behalf (player joined,
/// shutdown, ...). The registered callbacks for that kind run in order.
#[derive(Event, Debug, Clone, Copy)]
pub struct RunnerSignal {
    pub kind: RunnerEventKind,
}

pub(crate) fn on_runner_signal(
    signal: On<RunnerSignal>,
    callbacks: Res<RunnerCallbacks>,
    mut commands: Commands,
) {
    for system in callbacks.registered(signal.kind) {
        commands.run_system(*system);
    }
}

/// Dispatch the per-tick input poll through the registration table.
pub(crate) fn dispatch_input_poll(callbacks: Res<RunnerCallbacks>, mut commands: Commands) {
    for system in callbacks.registered(RunnerEventKind::InputPoll) {
        commands.run_system(*system);
    }
}
