// Level data
//
// Levels are plain JSON files listing where everything goes. Coordinates
// are authored top-left/y-down (platforms anchor at their top-left corner,
// actors and coins at their center) and converted to the y-up world when
// the scene spawns them.

use serde::Deserialize;

/// Level width in pixels
pub const LEVEL_WIDTH: f32 = 960.0;

/// Level height in pixels
pub const LEVEL_HEIGHT: f32 = 600.0;

/// A full level description, read once at scene creation
#[derive(Debug, Clone, Deserialize)]
pub struct LevelData {
    /// The single hero spawn point
    pub hero: SpawnPoint,
    /// Spider spawn points
    #[serde(default)]
    pub spiders: Vec<SpawnPoint>,
    /// Platform placements
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,
    /// Coin placements
    #[serde(default)]
    pub coins: Vec<SpawnPoint>,
}

/// Where an actor or coin is centered
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// A platform placement: top-left corner plus the image that sizes it
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub image: String,
}

impl LevelData {
    /// Parse a level from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Convert an authored y coordinate to world space (y-up)
pub fn world_y(data_y: f32) -> f32 {
    LEVEL_HEIGHT - data_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_level() {
        let json = r#"{
            "hero": { "x": 21, "y": 495 },
            "spiders": [ { "x": 121, "y": 500 }, { "x": 800, "y": 362 } ],
            "platforms": [
                { "x": 0, "y": 546, "image": "ground" },
                { "x": 420, "y": 336, "image": "grass_8x1" }
            ],
            "coins": [ { "x": 147, "y": 524 } ]
        }"#;

        let level = LevelData::from_json(json).unwrap();

        assert_eq!(level.hero.x, 21.0);
        assert_eq!(level.spiders.len(), 2);
        assert_eq!(level.platforms.len(), 2);
        assert_eq!(level.platforms[1].image, "grass_8x1");
        assert_eq!(level.coins.len(), 1);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let level = LevelData::from_json(r#"{ "hero": { "x": 0, "y": 0 } }"#).unwrap();

        assert!(level.spiders.is_empty());
        assert!(level.platforms.is_empty());
        assert!(level.coins.is_empty());
    }

    #[test]
    fn test_missing_hero_is_an_error() {
        assert!(LevelData::from_json(r#"{ "platforms": [] }"#).is_err());
    }

    #[test]
    fn test_world_y_flips_the_axis() {
        assert_eq!(world_y(0.0), 600.0);
        assert_eq!(world_y(600.0), 0.0);
    }
}
