use crate::stepper::InputStepper;
use bevy::prelude::*;
use stickwire_core::prelude::PeerId;
use stickwire_inputs::prelude::*;
use stickwire_inputs_native::prelude::*;
use test_log::test;

#[derive(Resource, Default)]
struct Dispatched(Vec<&'static str>);

/// Callbacks registered for an event kind run in registration order.
#[test]
fn test_callbacks_dispatch_in_registration_order() {
    let mut stepper = InputStepper::single();
    stepper.app.world_mut().init_resource::<Dispatched>();

    let first = stepper
        .app
        .world_mut()
        .register_system(|mut dispatched: ResMut<Dispatched>| dispatched.0.push("first"));
    let second = stepper
        .app
        .world_mut()
        .register_system(|mut dispatched: ResMut<Dispatched>| dispatched.0.push("second"));
    {
        let mut callbacks = stepper.app.world_mut().resource_mut::<RunnerCallbacks>();
        callbacks.register(RunnerEventKind::PlayerJoined, first);
        callbacks.register(RunnerEventKind::PlayerJoined, second);
    }

    stepper.app.world_mut().trigger(RunnerSignal {
        kind: RunnerEventKind::PlayerJoined,
    });
    stepper.app.world_mut().flush();

    assert_eq!(
        stepper.app.world().resource::<Dispatched>().0,
        vec!["first", "second"]
    );
}

/// A deregistered callback stops firing; other kinds are unaffected.
#[test]
fn test_unregistered_callbacks_stop_firing() {
    let mut stepper = InputStepper::single();
    stepper.app.world_mut().init_resource::<Dispatched>();

    let on_left = stepper
        .app
        .world_mut()
        .register_system(|mut dispatched: ResMut<Dispatched>| dispatched.0.push("left"));
    let handle = stepper
        .app
        .world_mut()
        .resource_mut::<RunnerCallbacks>()
        .register(RunnerEventKind::PlayerLeft, on_left);

    stepper.app.world_mut().trigger(RunnerSignal {
        kind: RunnerEventKind::PlayerLeft,
    });
    stepper.app.world_mut().flush();
    assert_eq!(stepper.app.world().resource::<Dispatched>().0.len(), 1);

    stepper
        .app
        .world_mut()
        .resource_mut::<RunnerCallbacks>()
        .unregister(handle)
        .expect("callback is registered");

    stepper.app.world_mut().trigger(RunnerSignal {
        kind: RunnerEventKind::PlayerLeft,
    });
    stepper.app.world_mut().flush();
    assert_eq!(stepper.app.world().resource::<Dispatched>().0.len(), 1);
}

/// Under the default policy the previous-buttons cache only exists for the
/// input authority; instances of other players keep their default value.
#[test]
fn test_replication_policy_gates_previous_buttons() {
    let mut stepper = InputStepper::single();

    let mut buttons = InputButtons::default();
    buttons.set(InputButton::Jump, true);
    let delivered = ActionState(GameplayInput::new(Vec2::X, buttons));

    let remote = stepper
        .app
        .world_mut()
        .spawn((
            ActionState::<GameplayInput>::default(),
            PreviousButtons::default(),
        ))
        .id();
    let tick = stepper.current_tick() + 1u16;
    stepper
        .app
        .world_mut()
        .get_mut::<InputBuffer<ActionState<GameplayInput>>>(remote)
        .unwrap()
        .set(tick, delivered.clone());

    stepper.frame_step(1);

    // the delivered input was consumed, but the cache stayed local-only
    assert_eq!(
        stepper
            .app
            .world()
            .get::<ActionState<GameplayInput>>(remote)
            .unwrap(),
        &delivered
    );
    assert_eq!(
        stepper.app.world().get::<PreviousButtons>(remote).unwrap(),
        &PreviousButtons::default()
    );
}

/// A policy replicating previous buttons to everyone updates the cache on
/// every instance that carries it.
#[test]
fn test_replicate_to_all_updates_remote_previous_buttons() {
    let plugin = GameplayInputPlugin {
        policy: ReplicationPolicy::default()
            .with(GAMEPLAY_INPUT_FIELD, ReplicateTo::All)
            .with(PREVIOUS_BUTTONS_FIELD, ReplicateTo::All),
        ..Default::default()
    };
    let duration = core::time::Duration::from_millis(10);
    let mut stepper = InputStepper::new(plugin, duration, duration);

    let mut buttons = InputButtons::default();
    buttons.set(InputButton::Jump, true);
    let delivered = ActionState(GameplayInput::new(Vec2::X, buttons));

    let remote = stepper
        .app
        .world_mut()
        .spawn((
            ActionState::<GameplayInput>::default(),
            PreviousButtons::default(),
        ))
        .id();
    let tick = stepper.current_tick() + 1u16;
    stepper
        .app
        .world_mut()
        .get_mut::<InputBuffer<ActionState<GameplayInput>>>(remote)
        .unwrap()
        .set(tick, delivered);

    stepper.frame_step(1);

    assert_eq!(
        stepper.app.world().get::<PreviousButtons>(remote).unwrap(),
        &PreviousButtons(buttons)
    );
}

/// Migration re-points the player object and stops the local input poll.
#[test]
fn test_migration_reregisters_player_object_and_stops_polling() {
    let mut stepper = InputStepper::single();

    stepper.set_move_axis(Vec2::X);
    stepper.frame_step(1);
    let end_before = stepper.input_buffer().end_tick();

    let peer = PeerId(42);
    let entity = stepper.player_entity;
    stepper.app.world_mut().trigger(Migrated { peer, entity });

    assert_eq!(
        stepper
            .app
            .world()
            .resource::<PlayerObjects>()
            .get(peer),
        Some(entity)
    );
    assert!(
        stepper
            .app
            .world()
            .resource::<RunnerCallbacks>()
            .registered(RunnerEventKind::InputPoll)
            .is_empty()
    );

    // no further polls: the buffer stops advancing
    stepper.frame_step(2);
    assert_eq!(stepper.input_buffer().end_tick(), end_before);
}
