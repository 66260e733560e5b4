use bevy::MinimalPlugins;
use bevy::platform::time::Instant;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use core::time::Duration;
use stickwire_core::prelude::*;
use tracing::info;
use stickwire_inputs::prelude::*;
use stickwire_inputs_native::prelude::*;

/// Stepper with a single app driven by manual time:
/// - one runner entity carrying the [`LocalTimeline`]
/// - one locally-controlled player entity carrying the [`InputMarker`]
///
/// Device input is injected by writing [`GameplayActions`] directly, which is
/// exactly what the built-in keyboard reader would do.
pub struct InputStepper {
    pub app: App,
    pub runner_entity: Entity,
    pub player_entity: Entity,
    pub frame_duration: Duration,
    pub tick_duration: Duration,
    pub current_time: Instant,
}

impl InputStepper {
    /// Stepper where every render frame advances exactly one tick.
    pub fn single() -> Self {
        let duration = Duration::from_millis(10);
        Self::new(GameplayInputPlugin::default(), duration, duration)
    }

    /// Stepper rendering twice per tick, to exercise multiple accumulation
    /// frames before a poll.
    pub fn fast_render() -> Self {
        Self::new(
            GameplayInputPlugin::default(),
            Duration::from_millis(10),
            Duration::from_millis(5),
        )
    }

    pub fn new(
        plugin: GameplayInputPlugin,
        tick_duration: Duration,
        frame_duration: Duration,
    ) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(TimelinePlugin { tick_duration });
        app.add_plugins(plugin);
        app.finish();
        app.cleanup();

        let runner_entity = app.world_mut().spawn(LocalTimeline::default()).id();
        let player_entity = app
            .world_mut()
            .spawn(InputMarker::<GameplayInput>::default())
            .id();

        let mut stepper = Self {
            app,
            runner_entity,
            player_entity,
            frame_duration,
            tick_duration,
            current_time: Instant::now(),
        };
        stepper.init();
        stepper
    }

    /// Initialize Real time (needed only for the first TimeSystem run)
    fn init(&mut self) {
        let now = Instant::now();
        self.current_time = now;
        self.app
            .world_mut()
            .get_resource_mut::<Time<Real>>()
            .unwrap()
            .update_with_instant(now);
    }

    pub fn advance_time(&mut self, duration: Duration) {
        self.current_time += duration;
        self.app
            .insert_resource(TimeUpdateStrategy::ManualInstant(self.current_time));
    }

    /// Advance the world by one frame duration
    pub fn frame_step(&mut self, n: usize) {
        for _ in 0..n {
            self.advance_time(self.frame_duration);
            let tick = self.current_tick();
            info!(?tick, "Frame step");
            self.app.update();
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.app
            .world()
            .get::<LocalTimeline>(self.runner_entity)
            .unwrap()
            .tick()
    }

    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.app
            .world_mut()
            .resource_mut::<GameplayActions>()
            .move_axis = axis;
    }

    pub fn set_jump(&mut self, jump: bool) {
        self.app.world_mut().resource_mut::<GameplayActions>().jump = jump;
    }

    pub fn set_provide_input(&mut self, provide: bool) {
        self.app
            .world_mut()
            .get_mut::<ProvideInput>(self.runner_entity)
            .unwrap()
            .0 = provide;
    }

    /// The record accumulated this frame, before any poll.
    pub fn accumulated(&self) -> GameplayInput {
        self.app
            .world()
            .get::<InputAccumulator<ActionState<GameplayInput>>>(self.player_entity)
            .unwrap()
            .value
            .0
    }

    /// The authoritative record consumed by simulation code this tick.
    pub fn action_state(&self) -> GameplayInput {
        self.app
            .world()
            .get::<ActionState<GameplayInput>>(self.player_entity)
            .unwrap()
            .0
    }

    pub fn previous_buttons(&self) -> InputButtons {
        self.app
            .world()
            .get::<PreviousButtons>(self.player_entity)
            .unwrap()
            .0
    }

    pub fn input_buffer(&self) -> &InputBuffer<ActionState<GameplayInput>> {
        self.app
            .world()
            .get::<InputBuffer<ActionState<GameplayInput>>>(self.player_entity)
            .unwrap()
    }

    /// Re-run the registered poll callback without advancing the frame, the
    /// way the runner re-polls after a performance spike.
    pub fn poll_again(&mut self) {
        let system = self
            .app
            .world()
            .resource::<InputPollHandle<ActionState<GameplayInput>>>()
            .handle()
            .system();
        self.app
            .world_mut()
            .run_system(system)
            .expect("poll callback runs");
    }
}
