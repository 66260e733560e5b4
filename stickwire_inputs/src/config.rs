use core::marker::PhantomData;

use bevy_ecs::resource::Resource;
use bevy_reflect::Reflect;

#[derive(Debug, Reflect, Resource)]
pub struct InputConfig<A> {
    /// How many ticks of history to keep in the input buffers before cleanup.
    ///
    /// The horizon must cover the ticks the runner may still ask about
    /// (e.g. when it re-polls after a performance spike).
    pub buffer_history: u16,
    pub marker: PhantomData<A>,
}

impl<A> Copy for InputConfig<A> {}

impl<A> Clone for InputConfig<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Default for InputConfig<A> {
    fn default() -> Self {
        InputConfig {
            buffer_history: 20,
            marker: PhantomData,
        }
    }
}

/// Input config shared across all action types.
/// Used to avoid creating some systems multiple times
#[derive(Default, Resource)]
pub(crate) struct SharedInputConfig {
    pub(crate) poll_dispatch_added: bool,
}
