//! Render extraction: turns drawables and their kinematic state into
//! screen-space sprite instances for whatever backend draws them.

use arcade_engine::prelude::*;

use crate::assets::SpriteKind;
use crate::components::Drawable;

/// One sprite to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    /// Entity the sprite belongs to
    pub entity: Entity,
    /// Sprite to draw
    pub sprite: SpriteKind,
    /// Screen-space position of the anchor (playfield offset applied)
    pub position: Vec2,
    /// Heading in radians
    pub rotation: f32,
    /// Normalized pivot within the sprite
    pub anchor: Vec2,
}

/// Collect a sprite instance for every drawable, ordered by entity id.
///
/// A drawable whose entity has no movable is an error.
pub fn collect_sprites(playfield: &Playfield) -> Result<Vec<SpriteInstance>, PlayfieldError> {
    let world = playfield.world();
    if !world.has_store::<Drawable>() {
        return Ok(Vec::new());
    }

    let offset = playfield.offset();
    let mut sprites = world
        .store_ref::<Drawable>()?
        .iter()
        .map(|(entity, drawable)| {
            let movable = playfield.movable(entity)?;
            Ok(SpriteInstance {
                entity,
                sprite: drawable.sprite,
                position: movable.position + offset,
                rotation: movable.rotation,
                anchor: drawable.anchor,
            })
        })
        .collect::<Result<Vec<_>, PlayfieldError>>()?;

    sprites.sort_by_key(|sprite| sprite.entity);
    Ok(sprites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprites_follow_movables_with_offset() {
        let mut playfield = Playfield::new(&PlayfieldConfig {
            x: 100.0,
            y: 50.0,
            seed: Some(2),
            ..PlayfieldConfig::default()
        });
        let movable = playfield
            .movable_builder()
            .position(Vec2::new(10.0, 20.0))
            .rotation(1.0)
            .build();
        let entity = playfield.spawn(movable).unwrap();
        playfield
            .world_mut()
            .add_component(entity, Drawable::new(SpriteKind::Ship))
            .unwrap();

        let sprites = collect_sprites(&playfield).unwrap();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].entity, entity);
        assert_eq!(sprites[0].position, Vec2::new(110.0, 70.0));
        assert_eq!(sprites[0].rotation, 1.0);
    }

    #[test]
    fn test_no_drawables() {
        let playfield = Playfield::new(&PlayfieldConfig::default());
        assert!(collect_sprites(&playfield).unwrap().is_empty());
    }

    #[test]
    fn test_drawable_without_movable_fails() {
        let mut playfield = Playfield::new(&PlayfieldConfig::default());
        let anchor = playfield.movable_builder().position(Vec2::new(1.0, 1.0)).build();
        playfield.spawn(anchor).unwrap();
        playfield
            .world_mut()
            .add_component(Entity::from_raw(7), Drawable::new(SpriteKind::Rock))
            .unwrap();

        assert!(collect_sprites(&playfield).is_err());
    }
}
