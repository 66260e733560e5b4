use bevy_ecs::entity::Entity;
use bevy_ecs::event::Event;
use bevy_ecs::resource::Resource;
use bevy_platform::collections::HashMap;
use stickwire_core::id::PeerId;

/// Map from peer to the entity registered as that peer's player object.
///
/// The runner consults this association when respawning state after a host
/// migration; re-registering a peer overwrites the previous association.
#[derive(Resource, Debug, Default)]
pub struct PlayerObjects {
    objects: HashMap<PeerId, Entity>,
}

impl PlayerObjects {
    /// Register `entity` as the player object for `peer`.
    /// Returns the previously registered entity, if any.
    pub fn set(&mut self, peer: PeerId, entity: Entity) -> Option<Entity> {
        self.objects.insert(peer, entity)
    }

    pub fn get(&self, peer: PeerId) -> Option<Entity> {
        self.objects.get(&peer).copied()
    }

    pub fn remove(&mut self, peer: PeerId) -> Option<Entity> {
        self.objects.remove(&peer)
    }
}

/// Emitted by the app once the runner has finished migrating `peer`'s state
/// to this machine. The handler re-registers the surviving player object and
/// stops the local input poll until the app re-enables it.
#[derive(Event, Debug, Clone, Copy)]
pub struct Migrated {
    pub peer: PeerId,
    pub entity: Entity,
}
