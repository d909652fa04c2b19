// Patrolling spider enemies

use super::animation::{AnimationClip, AnimationPlayer};
use crate::engine::physics::{
    body, vector, ColliderHandle, CollisionLayer, PhysicsWorld, RigidBodyHandle,
};

/// Patrol speed in pixels/second
pub const PATROL_SPEED: f32 = 100.0;

/// A spider pacing between the invisible walls that fence its platform
#[derive(Debug)]
pub struct Spider {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub animation: AnimationPlayer,
}

impl Spider {
    /// Spawn a spider centered at the given world position, crawling right
    pub fn spawn(physics: &mut PhysicsWorld, x: f32, y: f32, width: f32, height: f32) -> Self {
        let handle = physics.add_body(body::actor_body(x, y));
        let collider = physics.add_collider(
            body::actor_collider(width, height, CollisionLayer::Enemy),
            handle,
        );

        if let Some(body) = physics.body_mut(handle) {
            body.set_linvel(vector![PATROL_SPEED, 0.0], true);
        }

        let mut animation = AnimationPlayer::new();
        animation.add_clip(AnimationClip::looping("crawl", &[0, 1, 2], 8.0));
        animation.add_clip(AnimationClip::one_shot(
            "die",
            &[0, 4, 0, 4, 0, 4, 3, 3, 3, 3, 3, 3],
            12.0,
        ));
        animation.play("crawl");

        Self {
            body: handle,
            collider,
            animation,
        }
    }

    /// Bounce off whatever the spider ran into this step
    ///
    /// A contact on the left sends it right, a contact on the right sends
    /// it left; walking on a platform it keeps its speed.
    pub fn update(&mut self, physics: &mut PhysicsWorld) {
        let touching = physics.touching(self.collider);

        if touching.left {
            if let Some(body) = physics.body_mut(self.body) {
                let vertical = body.linvel().y;
                body.set_linvel(vector![PATROL_SPEED, vertical], true);
            }
        }
        if touching.right {
            if let Some(body) = physics.body_mut(self.body) {
                let vertical = body.linvel().y;
                body.set_linvel(vector![-PATROL_SPEED, vertical], true);
            }
        }
    }

    /// Current center position
    pub fn position(&self, physics: &PhysicsWorld) -> (f32, f32) {
        physics
            .body(self.body)
            .map(|body| (body.translation().x, body.translation().y))
            .unwrap_or((0.0, 0.0))
    }

    /// Current horizontal velocity
    pub fn velocity_x(&self, physics: &PhysicsWorld) -> f32 {
        physics
            .body(self.body)
            .map(|body| body.linvel().x)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A platform fenced by walls at both ends, one spider in the middle
    fn fenced_spider() -> (PhysicsWorld, Spider) {
        let mut physics = PhysicsWorld::with_gravity(vector![0.0, -1200.0]);

        let platform = physics.add_body(body::fixed_body(0.0, 0.0));
        physics.add_collider(
            body::block_collider(300.0, 20.0, CollisionLayer::Platform),
            platform,
        );

        for wall_x in [-150.0, 150.0] {
            let wall = physics.add_body(body::fixed_body(wall_x, 42.0));
            physics.add_collider(
                body::block_collider(8.0, 64.0, CollisionLayer::EnemyWall),
                wall,
            );
        }

        let spider = Spider::spawn(&mut physics, 0.0, 26.2, 42.0, 32.0);
        (physics, spider)
    }

    #[test]
    fn test_spawns_crawling_right() {
        let (physics, spider) = fenced_spider();
        assert_relative_eq!(spider.velocity_x(&physics), PATROL_SPEED);
        assert_eq!(spider.animation.current_clip(), "crawl");
    }

    #[test]
    fn test_reverses_at_the_right_fence() {
        let (mut physics, mut spider) = fenced_spider();

        let mut reversed = false;
        for _ in 0..180 {
            physics.step();
            spider.update(&mut physics);
            if spider.velocity_x(&physics) < 0.0 {
                reversed = true;
                break;
            }
        }

        assert!(reversed, "spider should turn around at the right wall");
        assert_relative_eq!(spider.velocity_x(&physics), -PATROL_SPEED);
    }

    #[test]
    fn test_patrols_back_and_forth() {
        let (mut physics, mut spider) = fenced_spider();

        let mut direction_changes = 0;
        let mut last_direction = 1.0f32;
        for _ in 0..900 {
            physics.step();
            spider.update(&mut physics);

            let direction = spider.velocity_x(&physics).signum();
            if direction != last_direction && spider.velocity_x(&physics) != 0.0 {
                direction_changes += 1;
                last_direction = direction;
            }

            // Never escapes the fenced platform
            let (x, _) = spider.position(&physics);
            assert!(x.abs() < 150.0, "spider escaped its fence at x={}", x);
        }

        assert!(
            direction_changes >= 2,
            "spider should bounce between both walls, saw {} turns",
            direction_changes
        );
    }

    #[test]
    fn test_flat_ground_keeps_speed() {
        let (mut physics, mut spider) = fenced_spider();

        for _ in 0..10 {
            physics.step();
            spider.update(&mut physics);
        }

        assert_relative_eq!(spider.velocity_x(&physics), PATROL_SPEED);
    }
}
