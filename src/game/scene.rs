// The playable level scene
//
// Owns the physics world and every spawned entity, maps input to the hero,
// and turns the frame's state into a paint-ordered sprite list.

use anyhow::Result;
use glam::Vec2;
use log::{debug, info};

use super::animation::{AnimationClip, AnimationPlayer};
use super::hero::Hero;
use super::level::{world_y, LevelData, PlatformSpec, SpawnPoint, LEVEL_HEIGHT, LEVEL_WIDTH};
use super::spider::Spider;
use crate::engine::assets::{AssetKind, AssetLoader, ImageId, ImageStore};
use crate::engine::audio::SoundBank;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::{
    body, vector, ColliderHandle, CollisionLayer, ContactEvent, PhysicsWorld, RigidBodyHandle,
};
use crate::engine::renderer::DrawSprite;

/// Gravity in pixels/s² (y-up, so downward is negative)
pub const GRAVITY_Y: f32 = -1200.0;

/// Thickness of the colliders framing the level
const WORLD_BOUND_THICKNESS: f32 = 50.0;

/// Sound effects the scene wants played; the caller owns the mixer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Jump,
    Coin,
    Stomp,
}

impl Sfx {
    /// Name of the sound in the bank
    pub fn name(&self) -> &'static str {
        match self {
            Sfx::Jump => "jump",
            Sfx::Coin => "coin",
            Sfx::Stomp => "stomp",
        }
    }
}

/// Everything the scene loads before it can be created
pub struct SceneAssets {
    pub images: ImageStore,
    pub sounds: SoundBank,
    pub level: LevelData,
}

impl SceneAssets {
    /// Load all images, sounds and the level file
    pub fn load(loader: &AssetLoader) -> Result<Self> {
        let mut images = ImageStore::new();

        for name in [
            "background",
            "ground",
            "grass_8x1",
            "grass_6x1",
            "grass_4x1",
            "grass_2x1",
            "grass_1x1",
        ] {
            images.load_image(loader, name, &format!("{}.png", name))?;
        }

        images.load_image(loader, "hero", "hero_stopped.png")?;
        images.load_sheet(loader, "coin", "coin_animated.png", 22, 22)?;
        images.load_sheet(loader, "spider", "spider.png", 42, 32)?;
        images.load_image(loader, "invisible-wall", "invisible_wall.png")?;

        let mut sounds = SoundBank::new();
        sounds.load(loader, "jump", "jump.wav")?;
        sounds.load(loader, "coin", "coin.wav")?;
        sounds.load(loader, "stomp", "stomp.wav")?;

        let level = LevelData::from_json(&loader.load_string(AssetKind::Data, "level01.json")?)?;

        info!(
            "Loaded {} images, {} sounds, level with {} platforms",
            images.len(),
            sounds.len(),
            level.platforms.len()
        );

        Ok(Self {
            images,
            sounds,
            level,
        })
    }
}

/// A static platform as spawned
struct Platform {
    image: ImageId,
    position: Vec2,
    size: Vec2,
}

/// A collectible coin
struct Coin {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    position: Vec2,
    animation: AnimationPlayer,
}

/// The level in play
pub struct PlayScene {
    physics: PhysicsWorld,

    hero: Hero,
    hero_image: ImageId,
    hero_size: Vec2,

    spiders: Vec<Spider>,
    spider_image: ImageId,
    spider_size: Vec2,

    coins: Vec<Coin>,
    coin_image: ImageId,
    coin_size: Vec2,

    platforms: Vec<Platform>,
    enemy_walls: Vec<ColliderHandle>,

    background: ImageId,

    sfx_queue: Vec<Sfx>,
}

impl PlayScene {
    /// Build the scene from loaded images and level data
    pub fn new(images: &ImageStore, level: &LevelData) -> Result<Self> {
        let mut physics = PhysicsWorld::with_gravity(vector![0.0, GRAVITY_Y]);
        spawn_world_bounds(&mut physics);

        let background = images.id("background")?;
        let hero_image = images.id("hero")?;
        let coin_image = images.id("coin")?;
        let spider_image = images.id("spider")?;
        let wall_image = images.id("invisible-wall")?;

        let hero_size = Vec2::from(images.size(hero_image));
        let coin_size = Vec2::from(images.frame_size(coin_image));
        let spider_size = Vec2::from(images.frame_size(spider_image));
        let wall_size = Vec2::from(images.size(wall_image));

        let mut platforms = Vec::with_capacity(level.platforms.len());
        let mut enemy_walls = Vec::with_capacity(level.platforms.len() * 2);
        for spec in &level.platforms {
            let platform = spawn_platform(&mut physics, images, spec)?;

            // Fence both edges so spiders cannot wander off
            enemy_walls.push(spawn_enemy_wall(
                &mut physics,
                Vec2::new(spec.x - wall_size.x / 2.0, world_y(spec.y) + wall_size.y / 2.0),
                wall_size,
            ));
            enemy_walls.push(spawn_enemy_wall(
                &mut physics,
                Vec2::new(
                    spec.x + platform.size.x + wall_size.x / 2.0,
                    world_y(spec.y) + wall_size.y / 2.0,
                ),
                wall_size,
            ));

            platforms.push(platform);
        }

        let coins = level
            .coins
            .iter()
            .map(|point| spawn_coin(&mut physics, point, coin_size))
            .collect();

        let spiders = level
            .spiders
            .iter()
            .map(|point| {
                Spider::spawn(
                    &mut physics,
                    point.x,
                    world_y(point.y),
                    spider_size.x,
                    spider_size.y,
                )
            })
            .collect();

        let hero = Hero::spawn(
            &mut physics,
            level.hero.x,
            world_y(level.hero.y),
            hero_size.x,
            hero_size.y,
        );

        info!(
            "Scene ready: {} platforms, {} coins, {} spiders",
            platforms.len(),
            level.coins.len(),
            level.spiders.len()
        );

        Ok(Self {
            physics,
            hero,
            hero_image,
            hero_size,
            spiders,
            spider_image,
            spider_size,
            coins,
            coin_image,
            coin_size,
            platforms,
            enemy_walls,
            background,
            sfx_queue: Vec::new(),
        })
    }

    /// Advance the scene by one fixed timestep
    pub fn update(&mut self, input: &InputState) {
        self.handle_input(input);
        self.physics.step();
        self.handle_overlaps();

        for spider in &mut self.spiders {
            spider.update(&mut self.physics);
        }

        let dt = self.physics.timestep();
        for spider in &mut self.spiders {
            spider.animation.update(dt);
        }
        for coin in &mut self.coins {
            coin.animation.update(dt);
        }
    }

    fn handle_input(&mut self, input: &InputState) {
        self.hero.run(&mut self.physics, input.horizontal());

        if input.just_pressed(Action::Jump) && self.hero.jump(&mut self.physics) {
            self.sfx_queue.push(Sfx::Jump);
        }
    }

    /// Collect coins the hero overlapped during the last step
    fn handle_overlaps(&mut self) {
        for event in self.physics.events() {
            let ContactEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };

            let other = if collider1 == self.hero.collider {
                collider2
            } else if collider2 == self.hero.collider {
                collider1
            } else {
                continue;
            };

            if let Some(index) = self.coins.iter().position(|coin| coin.collider == other) {
                let coin = self.coins.swap_remove(index);
                self.physics.remove_body(coin.body);
                self.sfx_queue.push(Sfx::Coin);
                debug!("Coin collected at {:?}", coin.position);
            }
        }
    }

    /// Take the sound effects queued since the last drain
    pub fn drain_sfx(&mut self) -> Vec<Sfx> {
        std::mem::take(&mut self.sfx_queue)
    }

    /// Build this frame's paint-ordered sprite list
    pub fn draw(&self, images: &ImageStore) -> Vec<DrawSprite> {
        let mut sprites = Vec::with_capacity(
            1 + self.platforms.len() + self.coins.len() + self.spiders.len() + 1,
        );

        sprites.push(DrawSprite::new(
            self.background,
            Vec2::new(LEVEL_WIDTH / 2.0, LEVEL_HEIGHT / 2.0),
            Vec2::new(LEVEL_WIDTH, LEVEL_HEIGHT),
        ));

        for platform in &self.platforms {
            sprites.push(DrawSprite::new(
                platform.image,
                platform.position,
                platform.size,
            ));
        }

        for coin in &self.coins {
            sprites.push(DrawSprite::with_uv(
                self.coin_image,
                coin.position,
                self.coin_size,
                images.frame_uv(self.coin_image, coin.animation.frame()),
            ));
        }

        for spider in &self.spiders {
            let (x, y) = spider.position(&self.physics);
            sprites.push(DrawSprite::with_uv(
                self.spider_image,
                Vec2::new(x, y),
                self.spider_size,
                images.frame_uv(self.spider_image, spider.animation.frame()),
            ));
        }

        let (x, y) = self.hero.position(&self.physics);
        sprites.push(DrawSprite::new(
            self.hero_image,
            Vec2::new(x, y),
            self.hero_size,
        ));

        sprites
    }

    /// Number of coins still on the field
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    /// Number of spiders
    pub fn spider_count(&self) -> usize {
        self.spiders.len()
    }

    /// Number of invisible fence walls
    pub fn enemy_wall_count(&self) -> usize {
        self.enemy_walls.len()
    }

    /// Access to the physics world (tests and debugging)
    #[cfg(test)]
    pub(crate) fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    #[cfg(test)]
    pub(crate) fn hero(&self) -> &Hero {
        &self.hero
    }
}

/// Four static colliders framing the level
fn spawn_world_bounds(physics: &mut PhysicsWorld) {
    let sides = [
        // left, right
        (
            Vec2::new(-WORLD_BOUND_THICKNESS / 2.0, LEVEL_HEIGHT / 2.0),
            Vec2::new(WORLD_BOUND_THICKNESS, LEVEL_HEIGHT + 2.0 * WORLD_BOUND_THICKNESS),
        ),
        (
            Vec2::new(LEVEL_WIDTH + WORLD_BOUND_THICKNESS / 2.0, LEVEL_HEIGHT / 2.0),
            Vec2::new(WORLD_BOUND_THICKNESS, LEVEL_HEIGHT + 2.0 * WORLD_BOUND_THICKNESS),
        ),
        // bottom, top
        (
            Vec2::new(LEVEL_WIDTH / 2.0, -WORLD_BOUND_THICKNESS / 2.0),
            Vec2::new(LEVEL_WIDTH + 2.0 * WORLD_BOUND_THICKNESS, WORLD_BOUND_THICKNESS),
        ),
        (
            Vec2::new(LEVEL_WIDTH / 2.0, LEVEL_HEIGHT + WORLD_BOUND_THICKNESS / 2.0),
            Vec2::new(LEVEL_WIDTH + 2.0 * WORLD_BOUND_THICKNESS, WORLD_BOUND_THICKNESS),
        ),
    ];

    for (center, size) in sides {
        let handle = physics.add_body(body::fixed_body(center.x, center.y));
        physics.add_collider(
            body::block_collider(size.x, size.y, CollisionLayer::WorldBound),
            handle,
        );
    }
}

/// Spawn one platform; its size comes from its image
fn spawn_platform(
    physics: &mut PhysicsWorld,
    images: &ImageStore,
    spec: &PlatformSpec,
) -> Result<Platform> {
    let image = images.id(&spec.image)?;
    let size = Vec2::from(images.size(image));
    let position = Vec2::new(spec.x + size.x / 2.0, world_y(spec.y) - size.y / 2.0);

    let handle = physics.add_body(body::fixed_body(position.x, position.y));
    physics.add_collider(
        body::block_collider(size.x, size.y, CollisionLayer::Platform),
        handle,
    );

    Ok(Platform {
        image,
        position,
        size,
    })
}

/// Spawn one invisible fence wall, bottom-aligned to a platform's top edge
fn spawn_enemy_wall(
    physics: &mut PhysicsWorld,
    center: Vec2,
    size: Vec2,
) -> ColliderHandle {
    let handle = physics.add_body(body::fixed_body(center.x, center.y));
    physics.add_collider(
        body::block_collider(size.x, size.y, CollisionLayer::EnemyWall),
        handle,
    )
}

/// Spawn one coin with its wobble animation running
fn spawn_coin(physics: &mut PhysicsWorld, point: &SpawnPoint, size: Vec2) -> Coin {
    let position = Vec2::new(point.x, world_y(point.y));

    let handle = physics.add_body(body::fixed_body(position.x, position.y));
    let collider = physics.add_collider(body::coin_collider(size.x, size.y), handle);

    let mut animation = AnimationPlayer::new();
    animation.add_clip(AnimationClip::looping("rotate", &[0, 1, 2, 1], 6.0));
    animation.play("rotate");

    Coin {
        body: handle,
        collider,
        position,
        animation,
    }
}
