//! Contains the tick and identity types shared by the stickwire crates

pub mod id;
pub mod tick;
pub mod timeline;

pub mod prelude {
    pub use crate::id::PeerId;
    pub use crate::tick::{Tick, TickDuration};
    pub use crate::timeline::{LocalTimeline, SetTickDuration, TimelinePlugin};
}
