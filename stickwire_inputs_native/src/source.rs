use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use bevy_input::ButtonInput;
use bevy_input::keyboard::KeyCode;
use bevy_math::Vec2;
use bevy_reflect::Reflect;

/// Snapshot of the logical actions read from the device layer, refreshed once
/// per render frame. The accumulator only ever reads this resource, so tests
/// (or an alternative device backend) can write it directly.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
pub struct GameplayActions {
    /// Raw, unnormalized move axis.
    pub move_axis: Vec2,
    pub jump: bool,
}

/// Key bindings for the built-in keyboard reader.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct InputBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
        }
    }
}

/// Refresh [`GameplayActions`] from the keyboard state.
///
/// Key state is optional so that headless apps without an input plugin keep
/// whatever the app wrote into [`GameplayActions`] itself.
pub(crate) fn read_device_actions(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<InputBindings>,
    mut actions: ResMut<GameplayActions>,
) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;
    if keys.pressed(bindings.up) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.down) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.right) {
        axis.x += 1.0;
    }
    if keys.pressed(bindings.left) {
        axis.x -= 1.0;
    }
    actions.move_axis = axis;
    actions.jump = keys.pressed(bindings.jump);
}
