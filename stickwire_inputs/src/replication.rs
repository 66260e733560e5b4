use bevy_ecs::resource::Resource;
use bevy_platform::collections::HashMap;
use bevy_reflect::Reflect;

/// Which peers a field of the input record is replicated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ReplicateTo {
    /// Replicated to every peer.
    All,
    /// Replicated only to the peer holding input authority over the object.
    /// This saves traffic for fields other clients never read.
    InputAuthority,
    /// Never leaves the local machine.
    LocalOnly,
}

/// Per-field replication policy, passed at plugin construction time.
///
/// Fields are identified by a stable label rather than by reflection over the
/// record's members; fields without an entry replicate to everyone.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReplicationPolicy {
    fields: HashMap<&'static str, ReplicateTo>,
}

impl ReplicationPolicy {
    pub fn with(mut self, field: &'static str, target: ReplicateTo) -> Self {
        self.fields.insert(field, target);
        self
    }

    pub fn target(&self, field: &str) -> ReplicateTo {
        self.fields.get(field).copied().unwrap_or(ReplicateTo::All)
    }
}
