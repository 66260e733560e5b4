/*! # Stickwire Inputs

Generic input plumbing for the stickwire crates: the tick-indexed
[`InputBuffer`](input_buffer::InputBuffer), the system-set scaffolding that
matches the runner's frame/tick cadence, and the explicit callback
registration table through which the runner polls for input.

The concrete input record lives in `stickwire_inputs_native`.
*/

pub mod accumulator;
pub mod config;
pub mod input_buffer;
pub mod player;
pub mod plugin;
pub mod registry;
pub mod replication;

use bevy_ecs::component::{Component, Mutable};
use core::fmt::Debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait UserAction:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + Debug + 'static
{
}

impl<A: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + Debug + 'static> UserAction
    for A
{
}

/// The component that holds the authoritative input record consumed by
/// simulation code. The `Default` value must mean "no input active".
pub trait UserActionState: UserAction + Component<Mutability = Mutable> + Default {
    type UserAction: UserAction;
}

pub mod prelude {
    pub use crate::accumulator::{InputAccumulator, ProvideInput};
    pub use crate::config::InputConfig;
    pub use crate::input_buffer::{InputBuffer, InputData};
    pub use crate::player::{Migrated, PlayerObjects};
    pub use crate::plugin::{BaseInputPlugin, InputPollHandle, InputSet};
    pub use crate::registry::{
        CallbackError, CallbackHandle, RunnerCallbacks, RunnerEventKind, RunnerSignal,
    };
    pub use crate::replication::{ReplicateTo, ReplicationPolicy};
    pub use crate::{UserAction, UserActionState};
}
