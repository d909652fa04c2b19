// Sprite draw list and quad batching

use super::vertex::Vertex;
use crate::core::math::round_to_pixel;
use crate::engine::assets::ImageId;
use glam::Vec2;
use std::ops::Range;

/// One sprite to draw this frame
///
/// Position is the sprite's center in world pixels (y-up). Draw order in
/// the list is paint order: later sprites cover earlier ones.
#[derive(Debug, Clone, Copy)]
pub struct DrawSprite {
    pub image: ImageId,
    pub position: Vec2,
    pub size: Vec2,
    /// UV rectangle `[u_min, v_min, u_max, v_max]`; the whole texture for
    /// plain images, one frame for spritesheets
    pub uv: [f32; 4],
}

impl DrawSprite {
    /// Draw an entire texture
    pub fn new(image: ImageId, position: Vec2, size: Vec2) -> Self {
        Self {
            image,
            position,
            size,
            uv: [0.0, 0.0, 1.0, 1.0],
        }
    }

    /// Draw one frame of a spritesheet
    pub fn with_uv(image: ImageId, position: Vec2, size: Vec2, uv: [f32; 4]) -> Self {
        Self {
            image,
            position,
            size,
            uv,
        }
    }
}

/// A run of consecutive quads sharing one texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub image: ImageId,
    pub indices: Range<u32>,
}

/// CPU-side geometry for one frame
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub batches: Vec<Batch>,
}

/// Turn the draw list into quads, batched by texture
///
/// Only consecutive sprites with the same texture share a batch, so paint
/// order is preserved exactly.
pub fn build_frame(sprites: &[DrawSprite]) -> FrameGeometry {
    let mut frame = FrameGeometry {
        vertices: Vec::with_capacity(sprites.len() * 4),
        indices: Vec::with_capacity(sprites.len() * 6),
        batches: Vec::new(),
    };

    for sprite in sprites {
        let base = frame.vertices.len() as u16;

        let x = round_to_pixel(sprite.position.x);
        let y = round_to_pixel(sprite.position.y);
        let half_w = sprite.size.x / 2.0;
        let half_h = sprite.size.y / 2.0;
        let [u_min, v_min, u_max, v_max] = sprite.uv;

        // Texture rows start at the top, world y grows upward: the quad's
        // top edge samples v_min.
        frame.vertices.extend_from_slice(&[
            Vertex::new([x - half_w, y - half_h], [u_min, v_max]),
            Vertex::new([x + half_w, y - half_h], [u_max, v_max]),
            Vertex::new([x + half_w, y + half_h], [u_max, v_min]),
            Vertex::new([x - half_w, y + half_h], [u_min, v_min]),
        ]);

        let first_index = frame.indices.len() as u32;
        frame
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

        match frame.batches.last_mut() {
            Some(batch) if batch.image == sprite.image => {
                batch.indices.end = first_index + 6;
            }
            _ => frame.batches.push(Batch {
                image: sprite.image,
                indices: first_index..first_index + 6,
            }),
        }
    }

    frame
}
