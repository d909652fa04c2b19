// Decoded image cache
//
// Images are decoded once on the CPU side and kept here; the renderer
// uploads them to the GPU, and spawn logic reads their dimensions.

use super::{AssetError, AssetKind, AssetLoader};
use anyhow::Result;
use image::RgbaImage;
use std::collections::HashMap;

/// Index of a loaded image in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub(crate) usize);

impl ImageId {
    /// Position of the image in load order; the renderer's texture list
    /// uses the same indices
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Fixed frame grid of a spritesheet
#[derive(Debug, Clone, Copy)]
pub struct FrameGrid {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
}

struct ImageEntry {
    image: RgbaImage,
    grid: Option<FrameGrid>,
}

/// All decoded images for the current scene, keyed by name
#[derive(Default)]
pub struct ImageStore {
    entries: Vec<ImageEntry>,
    by_name: HashMap<String, ImageId>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single-frame image, e.g. `load_image(&loader, "hero", "hero_stopped.png")`
    pub fn load_image(&mut self, loader: &AssetLoader, name: &str, file: &str) -> Result<ImageId> {
        let image = self.decode(loader, file)?;
        Ok(self.insert_image(name, image))
    }

    /// Load a spritesheet with a fixed frame size
    pub fn load_sheet(
        &mut self,
        loader: &AssetLoader,
        name: &str,
        file: &str,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<ImageId> {
        let image = self.decode(loader, file)?;
        Ok(self.insert_sheet(name, image, frame_width, frame_height))
    }

    fn decode(&self, loader: &AssetLoader, file: &str) -> Result<RgbaImage> {
        let bytes = loader.load_bytes(AssetKind::Image, file)?;
        let image = image::load_from_memory(&bytes).map_err(|e| AssetError::DecodeError {
            name: file.to_string(),
            reason: e.to_string(),
        })?;
        Ok(image.to_rgba8())
    }

    /// Register an already-decoded image under a name
    pub fn insert_image(&mut self, name: &str, image: RgbaImage) -> ImageId {
        self.insert(name, image, None)
    }

    /// Register an already-decoded spritesheet under a name
    pub fn insert_sheet(
        &mut self,
        name: &str,
        image: RgbaImage,
        frame_width: u32,
        frame_height: u32,
    ) -> ImageId {
        let columns = (image.width() / frame_width).max(1);
        self.insert(
            name,
            image,
            Some(FrameGrid {
                frame_width,
                frame_height,
                columns,
            }),
        )
    }

    fn insert(&mut self, name: &str, image: RgbaImage, grid: Option<FrameGrid>) -> ImageId {
        if let Some(&id) = self.by_name.get(name) {
            self.entries[id.0] = ImageEntry { image, grid };
            return id;
        }
        let id = ImageId(self.entries.len());
        self.entries.push(ImageEntry { image, grid });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up an image by name
    pub fn id(&self, name: &str) -> Result<ImageId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownImage(name.to_string()).into())
    }

    /// Pixel dimensions of the whole image
    pub fn size(&self, id: ImageId) -> (f32, f32) {
        let image = &self.entries[id.0].image;
        (image.width() as f32, image.height() as f32)
    }

    /// Pixel dimensions of one frame (the whole image if not a sheet)
    pub fn frame_size(&self, id: ImageId) -> (f32, f32) {
        match self.entries[id.0].grid {
            Some(grid) => (grid.frame_width as f32, grid.frame_height as f32),
            None => self.size(id),
        }
    }

    /// UV rectangle `[u_min, v_min, u_max, v_max]` of a frame
    ///
    /// For plain images the whole texture is the single frame 0.
    pub fn frame_uv(&self, id: ImageId, frame: usize) -> [f32; 4] {
        let entry = &self.entries[id.0];
        let Some(grid) = entry.grid else {
            return [0.0, 0.0, 1.0, 1.0];
        };

        let (width, height) = (entry.image.width() as f32, entry.image.height() as f32);
        let col = (frame as u32 % grid.columns) as f32;
        let row = (frame as u32 / grid.columns) as f32;

        [
            col * grid.frame_width as f32 / width,
            row * grid.frame_height as f32 / height,
            (col + 1.0) * grid.frame_width as f32 / width,
            (row + 1.0) * grid.frame_height as f32 / height,
        ]
    }

    /// Raw pixels for GPU upload
    pub fn pixels(&self, id: ImageId) -> &RgbaImage {
        &self.entries[id.0].image
    }

    /// Iterate over every loaded image
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &RgbaImage)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ImageId(i), &entry.image))
    }

    /// Number of loaded images
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
