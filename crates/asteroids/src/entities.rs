//! Entity spawning: the player ship and the starting rocks

use arcade_engine::foundation::math::unit_right;
use arcade_engine::prelude::*;
use rand::Rng;

use crate::assets::SpriteKind;
use crate::components::{Drawable, Rock, Ship};
use crate::config::GameplayConfig;

/// Spawn the player ship at rest at the configured position
pub fn spawn_ship(playfield: &mut Playfield, gameplay: &GameplayConfig) -> Result<Entity, PlayfieldError> {
    let [x, y] = gameplay.ship_position;
    let movable = playfield.movable_builder().position(Vec2::new(x, y)).build();
    let ship = playfield.spawn(movable)?;

    let world = playfield.world_mut();
    world.add_component(ship, Drawable::new(SpriteKind::Ship))?;
    world.add_component(ship, Ship { thrust: gameplay.ship_thrust })?;

    log::info!("Ship {} spawned at ({}, {})", ship, x, y);
    Ok(ship)
}

/// Spawn `rock_count` rocks along a diagonal starting at `rock_origin`.
///
/// With a positive `rock_drift` each rock starts moving in a random
/// direction at up to that speed.
pub fn spawn_rocks<R: Rng>(
    playfield: &mut Playfield,
    gameplay: &GameplayConfig,
    rng: &mut R,
) -> Result<Vec<Entity>, PlayfieldError> {
    let origin = Vec2::new(gameplay.rock_origin[0], gameplay.rock_origin[1]);
    let spacing = Vec2::new(gameplay.rock_spacing[0], gameplay.rock_spacing[1]);

    let mut rocks = Vec::with_capacity(gameplay.rock_count as usize);
    for index in 0..gameplay.rock_count {
        let position = origin + spacing * index as f32;
        let velocity = if gameplay.rock_drift > 0.0 {
            let heading = rng.gen_range(0.0..TAU);
            unit_right().rotated(heading) * rng.gen_range(0.0..=gameplay.rock_drift)
        } else {
            Vec2::zeros()
        };

        let movable = playfield
            .movable_builder()
            .position(position)
            .velocity(velocity)
            .build();
        let rock = playfield.spawn(movable)?;
        let world = playfield.world_mut();
        world.add_component(rock, Drawable::new(SpriteKind::Rock))?;
        world.add_component(rock, Rock)?;
        rocks.push(rock);
    }

    log::info!("Spawned {} rocks", rocks.len());
    Ok(rocks)
}
