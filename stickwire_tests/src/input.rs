use crate::stepper::InputStepper;
use approx::assert_relative_eq;
use bevy::prelude::*;
use stickwire_core::prelude::Tick;
use stickwire_inputs::prelude::*;
use stickwire_inputs_native::prelude::*;
use test_log::test;

/// Device reports move=(3,4), jump=false: the accumulated record is the
/// normalized direction with no buttons set.
#[test]
fn test_accumulates_and_normalizes_device_input() {
    let mut stepper = InputStepper::single();

    stepper.set_move_axis(Vec2::new(3.0, 4.0));
    stepper.frame_step(1);

    let input = stepper.action_state();
    assert_relative_eq!(input.move_direction.x, 0.6);
    assert_relative_eq!(input.move_direction.y, 0.8);
    assert_relative_eq!(input.move_direction.length(), 1.0);
    assert!(!input.buttons.is_set(InputButton::Jump));
}

/// While providing input is disabled, the accumulated record equals the zero
/// record no matter what the device reports.
#[test]
fn test_disabled_input_resets_accumulator() {
    let mut stepper = InputStepper::single();

    stepper.set_provide_input(false);
    stepper.set_move_axis(Vec2::new(3.0, 4.0));
    stepper.set_jump(true);
    stepper.frame_step(1);

    assert_eq!(stepper.accumulated(), GameplayInput::default());
    assert_eq!(stepper.action_state(), GameplayInput::default());
}

/// Providing input flips to disabled mid-sequence: the next record is zeroed
/// regardless of prior device state.
#[test]
fn test_disabling_input_mid_sequence_zeroes_record() {
    let mut stepper = InputStepper::single();

    stepper.set_move_axis(Vec2::new(0.0, 2.0));
    stepper.set_jump(true);
    stepper.frame_step(1);
    assert_eq!(stepper.action_state().move_direction, Vec2::Y);
    assert!(stepper.action_state().buttons.is_set(InputButton::Jump));

    stepper.set_provide_input(false);
    stepper.frame_step(1);
    assert_eq!(stepper.accumulated(), GameplayInput::default());
    assert_eq!(stepper.action_state(), GameplayInput::default());
}

/// Polling twice for the same tick returns the identical record and does not
/// mutate any state.
#[test]
fn test_poll_is_idempotent() {
    let mut stepper = InputStepper::single();

    stepper.set_move_axis(Vec2::new(2.0, 0.0));
    stepper.frame_step(1);

    let tick = stepper.current_tick();
    let before = stepper.input_buffer().get(tick).cloned().unwrap();

    stepper.poll_again();
    stepper.poll_again();

    let after = stepper.input_buffer().get(tick).cloned().unwrap();
    assert_eq!(before, after);
    assert_eq!(stepper.input_buffer().end_tick(), Some(tick));
    assert_eq!(stepper.action_state(), before.0);
}

/// After a tick in which {Jump} was consumed, the previous-buttons cache
/// reflects exactly {Jump}.
#[test]
fn test_previous_buttons_after_jump_tick() {
    let mut stepper = InputStepper::single();

    stepper.set_jump(true);
    stepper.frame_step(1);

    let mut expected = InputButtons::default();
    expected.set(InputButton::Jump, true);
    assert_eq!(stepper.previous_buttons(), expected);

    // held across the next tick: no longer an edge
    stepper.frame_step(1);
    let current = stepper.action_state();
    let previous = PreviousButtons(stepper.previous_buttons());
    assert!(current.buttons.is_set(InputButton::Jump));
    assert!(!previous.just_pressed(&current, InputButton::Jump));

    stepper.set_jump(false);
    stepper.frame_step(1);
    assert_eq!(stepper.previous_buttons(), InputButtons::default());
}

/// An instance without input authority never accumulates; it consumes the
/// inputs the runner delivered into its buffer.
#[test]
fn test_remote_instance_consumes_delivered_input() {
    let mut stepper = InputStepper::single();

    let remote = stepper
        .app
        .world_mut()
        .spawn(ActionState::<GameplayInput>::default())
        .id();

    let mut buttons = InputButtons::default();
    buttons.set(InputButton::Jump, true);
    let delivered = ActionState(GameplayInput::new(Vec2::Y, buttons));

    let tick = stepper.current_tick() + 1u16;
    stepper
        .app
        .world_mut()
        .get_mut::<InputBuffer<ActionState<GameplayInput>>>(remote)
        .unwrap()
        .set(tick, delivered.clone());

    stepper.frame_step(1);
    assert_eq!(
        stepper
            .app
            .world()
            .get::<ActionState<GameplayInput>>(remote)
            .unwrap(),
        &delivered
    );
}

/// Old entries are pruned so the buffer never outgrows the configured
/// history horizon.
#[test]
fn test_buffer_cleanup_bounds_len() {
    let mut stepper = InputStepper::single();

    stepper.set_move_axis(Vec2::X);
    stepper.frame_step(30);

    let len = stepper.input_buffer().len();
    assert!(len <= 21, "buffer covers {len} ticks, beyond the horizon");
    // the current tick is still readable after cleanup
    assert!(stepper.input_buffer().get(stepper.current_tick()).is_some());
}

/// Rendering faster than the simulation: the accumulator is overwritten every
/// frame and the poll consumes the latest value.
#[test]
fn test_accumulation_overwrites_between_ticks() {
    let mut stepper = InputStepper::fast_render();

    stepper.set_move_axis(Vec2::X);
    stepper.frame_step(1);
    // no tick has been simulated yet, only accumulation ran
    assert_eq!(stepper.current_tick(), Tick(0));

    stepper.set_move_axis(Vec2::NEG_X);
    stepper.frame_step(1);
    assert_eq!(stepper.current_tick(), Tick(1));
    assert_eq!(stepper.action_state().move_direction, Vec2::NEG_X);
}
