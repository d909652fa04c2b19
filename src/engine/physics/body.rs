use super::collision::CollisionLayer;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

// Arcade-style bodies: axis-aligned boxes, no friction, no bounce, no spin.
// Movement comes from velocities the game assigns directly, so the only
// force the solver integrates is gravity.

/// Create a dynamic actor body (hero, spider)
pub fn actor_body(x: Real, y: Real) -> RigidBody {
    RigidBodyBuilder::dynamic()
        .translation(vector![x, y])
        .locked_axes(LockedAxes::ROTATION_LOCKED)
        .can_sleep(false)
        .build()
}

/// Create a static body for platforms, walls and level bounds
pub fn fixed_body(x: Real, y: Real) -> RigidBody {
    RigidBodyBuilder::fixed().translation(vector![x, y]).build()
}

/// Create a solid box collider for an actor
pub fn actor_collider(width: Real, height: Real, layer: CollisionLayer) -> Collider {
    ColliderBuilder::cuboid(width / 2.0, height / 2.0)
        .collision_groups(layer.to_interaction_groups())
        .friction(0.0)
        .restitution(0.0)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build()
}

/// Create a solid box collider for static geometry
pub fn block_collider(width: Real, height: Real, layer: CollisionLayer) -> Collider {
    ColliderBuilder::cuboid(width / 2.0, height / 2.0)
        .collision_groups(layer.to_interaction_groups())
        .friction(0.0)
        .restitution(0.0)
        .build()
}

/// Create a sensor collider for a coin
///
/// Sensors report overlaps through collision events without pushing the
/// hero around.
pub fn coin_collider(width: Real, height: Real) -> Collider {
    ColliderBuilder::cuboid(width / 2.0, height / 2.0)
        .collision_groups(CollisionLayer::Coin.to_interaction_groups())
        .sensor(true)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_body_is_dynamic_and_upright() {
        let body = actor_body(10.0, 20.0);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_fixed_body_is_static() {
        let body = fixed_body(0.0, 0.0);
        assert_eq!(body.body_type(), RigidBodyType::Fixed);
    }

    #[test]
    fn test_actor_collider_is_frictionless() {
        let collider = actor_collider(36.0, 42.0, CollisionLayer::Hero);

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(collider.restitution(), 0.0);
    }

    #[test]
    fn test_coin_collider_is_a_sensor() {
        let collider = coin_collider(22.0, 22.0);
        assert!(collider.is_sensor());
    }
}
