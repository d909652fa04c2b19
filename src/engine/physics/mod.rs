// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionLayer, ContactEvent};
pub use world::{PhysicsWorld, Touching};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{vector, Real, Vector};
