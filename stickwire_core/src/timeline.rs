use crate::tick::{Tick, TickDuration};
use bevy_app::{App, FixedFirst, Plugin};
use bevy_ecs::component::Component;
use bevy_ecs::event::Event;
use bevy_ecs::prelude::On;
use bevy_ecs::system::{Query, ResMut};
use bevy_reflect::Reflect;
use bevy_time::{Fixed, Time};
use core::time::Duration;

/// The timeline of the local fixed-update simulation.
///
/// The tick is incremented by exactly one every fixed update, before any
/// simulation system runs for that tick.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct LocalTimeline {
    tick: Tick,
}

impl LocalTimeline {
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn apply_delta(&mut self, delta: i16) {
        self.tick = self.tick + delta;
    }
}

/// Increment the local tick at each FixedUpdate
pub(crate) fn increment_local_tick(mut query: Query<&mut LocalTimeline>) {
    query.iter_mut().for_each(|mut t| t.apply_delta(1));
}

/// Event that can be triggered to update the tick duration at runtime.
#[derive(Event)]
pub struct SetTickDuration(pub Duration);

pub struct TimelinePlugin {
    pub tick_duration: Duration,
}

impl TimelinePlugin {
    fn update_tick_duration(
        trigger: On<SetTickDuration>,
        mut tick_duration: ResMut<TickDuration>,
        mut time: ResMut<Time<Fixed>>,
    ) {
        tick_duration.0 = trigger.0;
        time.set_timestep(trigger.0);
    }
}

impl Plugin for TimelinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Tick>();
        app.register_type::<LocalTimeline>();

        app.insert_resource(TickDuration(self.tick_duration));
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .set_timestep(self.tick_duration);
        app.add_observer(Self::update_tick_duration);

        app.add_systems(FixedFirst, increment_local_tick);
    }
}
