// The player-controlled hero

use crate::engine::physics::{
    body, vector, ColliderHandle, CollisionLayer, PhysicsWorld, RigidBodyHandle,
};

/// Horizontal run speed in pixels/second
pub const RUN_SPEED: f32 = 200.0;

/// Upward velocity applied by a jump, in pixels/second
pub const JUMP_SPEED: f32 = 600.0;

/// The hero: a dynamic box steered by direct velocity assignment
#[derive(Debug)]
pub struct Hero {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl Hero {
    /// Spawn the hero centered at the given world position
    pub fn spawn(physics: &mut PhysicsWorld, x: f32, y: f32, width: f32, height: f32) -> Self {
        let handle = physics.add_body(body::actor_body(x, y));
        let collider = physics.add_collider(
            body::actor_collider(width, height, CollisionLayer::Hero),
            handle,
        );
        Self {
            body: handle,
            collider,
        }
    }

    /// Steer horizontally: `direction` is -1 (left), 1 (right) or 0 (stop)
    ///
    /// Velocity is assigned outright, in the air as much as on the ground;
    /// releasing both arrows stops the hero dead.
    pub fn run(&self, physics: &mut PhysicsWorld, direction: f32) {
        if let Some(body) = physics.body_mut(self.body) {
            let vertical = body.linvel().y;
            body.set_linvel(vector![direction * RUN_SPEED, vertical], true);
        }
    }

    /// Jump if something solid is underfoot
    ///
    /// Returns whether the jump happened; an airborne hero keeps its
    /// velocity untouched.
    pub fn jump(&self, physics: &mut PhysicsWorld) -> bool {
        let grounded = physics.touching(self.collider).down;
        if !grounded {
            return false;
        }

        if let Some(body) = physics.body_mut(self.body) {
            let horizontal = body.linvel().x;
            body.set_linvel(vector![horizontal, JUMP_SPEED], true);
        }
        grounded
    }

    /// Current center position
    pub fn position(&self, physics: &PhysicsWorld) -> (f32, f32) {
        physics
            .body(self.body)
            .map(|body| (body.translation().x, body.translation().y))
            .unwrap_or((0.0, 0.0))
    }

    /// Current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> (f32, f32) {
        physics
            .body(self.body)
            .map(|body| (body.linvel().x, body.linvel().y))
            .unwrap_or((0.0, 0.0))
    }
}
