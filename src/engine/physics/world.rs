use rapier2d::prelude::*;

use super::collision::{ContactEvent, ContactEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Contact distance (in pixels) under which a manifold counts as touching
const CONTACT_EPSILON: Real = 0.1;

/// Which sides of a collider currently rest against something solid
///
/// The down flag gates jumping; the left/right flags drive spider patrol
/// reversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Touching {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Touching {
    /// True if any side is in contact
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    event_queue: ContactEventQueue,
}

impl PhysicsWorld {
    /// Create a physics world with no gravity
    pub fn new() -> Self {
        Self::with_gravity(Vector::zeros())
    }

    /// Create a physics world with the given gravity (pixels/s²)
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            event_queue: ContactEventQueue::new(),
        }
    }

    /// Step the simulation forward by one fixed timestep
    pub fn step(&mut self) {
        // Events from the previous step are stale now
        self.event_queue.clear();

        let event_handler = &self.event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the world
    pub fn add_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Which sides of a collider are in solid contact
    ///
    /// Classifies each active narrow-phase manifold by its world-space
    /// normal, oriented away from the queried collider. A contact whose
    /// normal points mostly downward means something solid sits below.
    pub fn touching(&self, handle: ColliderHandle) -> Touching {
        let mut touching = Touching::default();

        for pair in self.narrow_phase.contact_pairs_with(handle) {
            if !pair.has_any_active_contact {
                continue;
            }

            for manifold in &pair.manifolds {
                if manifold
                    .points
                    .iter()
                    .all(|point| point.dist > CONTACT_EPSILON)
                {
                    continue;
                }

                // Manifold normals point from the pair's first collider to
                // its second; flip when we are the second one.
                let normal = if pair.collider1 == handle {
                    manifold.data.normal
                } else {
                    -manifold.data.normal
                };

                if normal.x > 0.5 {
                    touching.right = true;
                } else if normal.x < -0.5 {
                    touching.left = true;
                }
                if normal.y > 0.5 {
                    touching.up = true;
                } else if normal.y < -0.5 {
                    touching.down = true;
                }
            }
        }

        touching
    }

    /// All collision/overlap events from the last step
    pub fn events(&self) -> Vec<ContactEvent> {
        self.event_queue.events()
    }

    /// Get the fixed timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body;
    use crate::engine::physics::collision::CollisionLayer;
    use approx::assert_relative_eq;

    fn world() -> PhysicsWorld {
        PhysicsWorld::with_gravity(vector![0.0, -1200.0])
    }

    fn spawn_platform(world: &mut PhysicsWorld, x: f32, y: f32, w: f32, h: f32) -> ColliderHandle {
        let handle = world.add_body(body::fixed_body(x, y));
        world.add_collider(body::block_collider(w, h, CollisionLayer::Platform), handle)
    }

    fn spawn_actor(
        world: &mut PhysicsWorld,
        x: f32,
        y: f32,
        layer: CollisionLayer,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let handle = world.add_body(body::actor_body(x, y));
        let collider = world.add_collider(body::actor_collider(20.0, 20.0, layer), handle);
        (handle, collider)
    }

    #[test]
    fn test_gravity_accelerates_dynamic_bodies() {
        let mut world = world();
        let (handle, _) = spawn_actor(&mut world, 0.0, 100.0, CollisionLayer::Hero);

        world.step();

        let velocity = world.body(handle).unwrap().linvel().y;
        assert_relative_eq!(velocity, -1200.0 * world.timestep(), epsilon = 0.01);
    }

    #[test]
    fn test_resting_actor_touches_down_only() {
        let mut world = world();
        spawn_platform(&mut world, 0.0, 0.0, 200.0, 20.0);
        // Bottom of the actor starts a hair above the platform top
        let (_, collider) = spawn_actor(&mut world, 0.0, 20.2, CollisionLayer::Hero);

        for _ in 0..30 {
            world.step();
        }

        let touching = world.touching(collider);
        assert!(touching.down);
        assert!(!touching.left);
        assert!(!touching.right);
        assert!(!touching.up);
    }

    #[test]
    fn test_airborne_actor_touches_nothing() {
        let mut world = world();
        spawn_platform(&mut world, 0.0, 0.0, 200.0, 20.0);
        let (_, collider) = spawn_actor(&mut world, 0.0, 200.0, CollisionLayer::Hero);

        world.step();

        assert!(!world.touching(collider).any());
    }

    #[test]
    fn test_walking_into_a_wall_sets_the_side_flag() {
        let mut world = world();
        spawn_platform(&mut world, 0.0, 0.0, 400.0, 20.0);
        // Fence wall to the right of the spider
        let wall = world.add_body(body::fixed_body(60.0, 30.0));
        world.add_collider(
            body::block_collider(8.0, 40.0, CollisionLayer::EnemyWall),
            wall,
        );

        let (handle, collider) = spawn_actor(&mut world, 0.0, 20.2, CollisionLayer::Enemy);
        world
            .body_mut(handle)
            .unwrap()
            .set_linvel(vector![100.0, 0.0], true);

        let mut hit = false;
        for _ in 0..120 {
            world.step();
            if world.touching(collider).right {
                hit = true;
                break;
            }
        }

        assert!(hit, "spider should reach the wall and report a right contact");
    }

    #[test]
    fn test_sensor_overlap_emits_started_event() {
        let mut world = world();
        spawn_platform(&mut world, 0.0, 0.0, 200.0, 20.0);
        let (_, hero_collider) = spawn_actor(&mut world, 0.0, 20.2, CollisionLayer::Hero);

        let coin_body = world.add_body(body::fixed_body(0.0, 25.0));
        let coin_collider = world.add_collider(body::coin_collider(22.0, 22.0), coin_body);

        world.step();

        let overlapped = world.events().iter().any(|event| match *event {
            ContactEvent::Started {
                collider1,
                collider2,
            } => {
                (collider1 == hero_collider && collider2 == coin_collider)
                    || (collider1 == coin_collider && collider2 == hero_collider)
            }
            _ => false,
        });
        assert!(overlapped, "hero over a coin should produce an overlap event");
    }

    #[test]
    fn test_removing_a_body_removes_its_collider() {
        let mut world = world();
        let coin_body = world.add_body(body::fixed_body(0.0, 0.0));
        let coin_collider = world.add_collider(body::coin_collider(22.0, 22.0), coin_body);

        world.remove_body(coin_body);

        assert!(world.collider(coin_collider).is_none());
    }
}
