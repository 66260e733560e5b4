use bevy_reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Identifies a remote peer connected to the network runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub struct PeerId(pub u64);

impl core::fmt::Display for PeerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Peer({})", self.0)
    }
}
