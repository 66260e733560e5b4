use bevy_derive::{Deref, DerefMut};
use bevy_ecs::component::Component;
use bevy_reflect::Reflect;

/// Per-frame accumulated input on the locally-controlled instance.
///
/// Overwritten wholesale once per render frame, before the fixed main loop;
/// the runner's per-tick poll copies it into the
/// [`InputBuffer`](crate::input_buffer::InputBuffer) without mutating it, so
/// polling the same tick twice yields the same record.
#[derive(Component, Debug, Clone, Default, Reflect, Deref, DerefMut)]
pub struct InputAccumulator<A> {
    pub value: A,
}

/// Whether the runner should currently be fed input (e.g. false while the
/// pointer is unlocked). While false, the accumulated input is reset to its
/// default value every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProvideInput(pub bool);

impl Default for ProvideInput {
    fn default() -> Self {
        Self(true)
    }
}
