use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Sub};
use core::time::Duration;

use bevy_derive::{Deref, DerefMut};
use bevy_ecs::resource::Resource;
use bevy_reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Internal id that tracks the simulation tick on the local machine.
///
/// Ticks wrap around `u16::MAX`; comparisons are done on the wrapping circle,
/// so `Tick(0) > Tick(u16::MAX)` holds right after a wrap.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect,
)]
pub struct Tick(pub u16);

/// Difference `b - a` interpreted on the wrapping circle, in `[-32768, 32767]`.
pub fn wrapping_diff(a: u16, b: u16) -> i16 {
    b.wrapping_sub(a) as i16
}

impl Tick {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }
}

impl Add<u16> for Tick {
    type Output = Tick;

    fn add(self, rhs: u16) -> Self::Output {
        Tick(self.0.wrapping_add(rhs))
    }
}

impl Add<i16> for Tick {
    type Output = Tick;

    fn add(self, rhs: i16) -> Self::Output {
        Tick(self.0.wrapping_add_signed(rhs))
    }
}

impl AddAssign<u16> for Tick {
    fn add_assign(&mut self, rhs: u16) {
        self.0 = self.0.wrapping_add(rhs);
    }
}

impl Sub<u16> for Tick {
    type Output = Tick;

    fn sub(self, rhs: u16) -> Self::Output {
        Tick(self.0.wrapping_sub(rhs))
    }
}

impl Sub<Tick> for Tick {
    type Output = i16;

    fn sub(self, rhs: Tick) -> Self::Output {
        wrapping_diff(rhs.0, self.0)
    }
}

impl PartialOrd for Tick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tick {
    fn cmp(&self, other: &Self) -> Ordering {
        wrapping_diff(other.0, self.0).cmp(&0)
    }
}

/// Resource that contains the global tick duration
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect, Deref, DerefMut)]
pub struct TickDuration(pub Duration);
