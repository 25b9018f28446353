//! Game asset definitions

use serde::{Deserialize, Serialize};

/// Sprite image referenced by a [`crate::components::Drawable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    /// Player ship, drawn with a heading arrow
    Ship,

    /// Rock
    Rock,
}

/// Loadable sprite asset: an alias plus the image path it resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAsset {
    /// Name the renderer registers the texture under
    pub alias: &'static str,

    /// Image path relative to the game root
    pub source: &'static str,
}

impl SpriteKind {
    /// Every sprite the game draws
    pub const ALL: [SpriteKind; 2] = [SpriteKind::Ship, SpriteKind::Rock];

    /// Asset backing this sprite
    pub fn asset(self) -> SpriteAsset {
        match self {
            SpriteKind::Ship => SpriteAsset {
                alias: "ship",
                source: "public/green box arrow.png",
            },
            SpriteKind::Rock => SpriteAsset {
                alias: "rock",
                source: "public/green box.png",
            },
        }
    }
}

/// Asset manifest a renderer preloads before the first frame
pub fn manifest() -> Vec<SpriteAsset> {
    SpriteKind::ALL.iter().map(|kind| kind.asset()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_has_unique_aliases() {
        let manifest = manifest();
        assert_eq!(manifest.len(), 2);
        assert_ne!(manifest[0].alias, manifest[1].alias);
        assert_eq!(SpriteKind::Ship.asset().alias, "ship");
    }
}
