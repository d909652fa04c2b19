use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision layers for filtering what can touch what
///
/// The level only needs a handful of pairings: the hero lands on platforms
/// and picks up coins, spiders are fenced in by invisible walls the hero
/// walks straight through, and both actor kinds stop at the level bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    /// The player-controlled hero
    Hero = 0b00_0001,

    /// Patrolling spiders
    Enemy = 0b00_0010,

    /// Static platforms
    Platform = 0b00_0100,

    /// Invisible walls fencing spider patrol ranges
    EnemyWall = 0b00_1000,

    /// Collectible coins (sensors)
    Coin = 0b01_0000,

    /// The four colliders framing the level
    WorldBound = 0b10_0000,
}

impl CollisionLayer {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The hero never touches spiders or their fence walls
            CollisionLayer::Hero => Group::from_bits_truncate(
                CollisionLayer::Platform as u32
                    | CollisionLayer::Coin as u32
                    | CollisionLayer::WorldBound as u32,
            ),

            // Spiders walk on platforms and bounce between fence walls
            CollisionLayer::Enemy => Group::from_bits_truncate(
                CollisionLayer::Platform as u32
                    | CollisionLayer::EnemyWall as u32
                    | CollisionLayer::WorldBound as u32,
            ),

            CollisionLayer::Platform => {
                Group::from_bits_truncate(CollisionLayer::Hero as u32 | CollisionLayer::Enemy as u32)
            }

            CollisionLayer::EnemyWall => Group::from_bits_truncate(CollisionLayer::Enemy as u32),

            // Coins only report overlaps with the hero
            CollisionLayer::Coin => Group::from_bits_truncate(CollisionLayer::Hero as u32),

            CollisionLayer::WorldBound => {
                Group::from_bits_truncate(CollisionLayer::Hero as u32 | CollisionLayer::Enemy as u32)
            }
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Collision event surfaced to game logic
#[derive(Debug, Clone, Copy)]
pub enum ContactEvent {
    /// Two colliders started touching or overlapping
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching or overlapping
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue filled by rapier during a physics step
pub struct ContactEventQueue {
    events: Arc<Mutex<Vec<ContactEvent>>>,
}

impl ContactEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// All events recorded during the last step
    pub fn events(&self) -> Vec<ContactEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ContactEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for ContactEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ContactEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(ContactEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(ContactEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Force magnitudes are irrelevant to pickup/patrol logic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interacts(a: CollisionLayer, b: CollisionLayer) -> bool {
        let ga = a.to_interaction_groups();
        let gb = b.to_interaction_groups();
        ga.filter.contains(gb.memberships) && gb.filter.contains(ga.memberships)
    }

    #[test]
    fn test_layers_have_unique_bits() {
        let layers = [
            CollisionLayer::Hero,
            CollisionLayer::Enemy,
            CollisionLayer::Platform,
            CollisionLayer::EnemyWall,
            CollisionLayer::Coin,
            CollisionLayer::WorldBound,
        ];

        for (i, a) in layers.iter().enumerate() {
            for (j, b) in layers.iter().enumerate() {
                if i != j {
                    assert_ne!(*a as u32, *b as u32, "Layers must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_hero_passes_through_enemy_walls() {
        assert!(!interacts(CollisionLayer::Hero, CollisionLayer::EnemyWall));
    }

    #[test]
    fn test_hero_does_not_collide_with_spiders() {
        assert!(!interacts(CollisionLayer::Hero, CollisionLayer::Enemy));
    }

    #[test]
    fn test_spiders_hit_their_fences() {
        assert!(interacts(CollisionLayer::Enemy, CollisionLayer::EnemyWall));
    }

    #[test]
    fn test_coins_only_overlap_the_hero() {
        assert!(interacts(CollisionLayer::Coin, CollisionLayer::Hero));
        assert!(!interacts(CollisionLayer::Coin, CollisionLayer::Enemy));
        assert!(!interacts(CollisionLayer::Coin, CollisionLayer::Platform));
    }

    #[test]
    fn test_both_actors_collide_with_world_bounds() {
        assert!(interacts(CollisionLayer::Hero, CollisionLayer::WorldBound));
        assert!(interacts(CollisionLayer::Enemy, CollisionLayer::WorldBound));
    }
}
