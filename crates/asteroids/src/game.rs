//! Game session: playfield, player controls, clock and debug state

use arcade_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::Rock;
use crate::config::GameConfig;
use crate::controls::{Action, KeyBindings, ShipControls};
use crate::entities;
use crate::render::{self, SpriteInstance};

/// A running game
pub struct Game {
    playfield: Playfield,
    controls: ShipControls,
    bindings: KeyBindings,
    clock: GameClock,
    debug: bool,
}

impl Game {
    /// Build the playfield and spawn the starting entities
    pub fn new(config: &GameConfig) -> Result<Self, PlayfieldError> {
        log::info!("Creating game...");
        let mut playfield = Playfield::new(&config.playfield);
        let mut rng = config
            .playfield
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let ship = entities::spawn_ship(&mut playfield, &config.gameplay)?;
        entities::spawn_rocks(&mut playfield, &config.gameplay, &mut rng)?;

        Ok(Self {
            playfield,
            controls: ShipControls::new(ship, config.gameplay.turn_rate),
            bindings: KeyBindings::from_config(&config.controls),
            clock: GameClock::with_speed(config.simulation.speed),
            debug: false,
        })
    }

    /// The world
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Player ship
    pub fn ship(&self) -> Entity {
        self.controls.ship()
    }

    /// Live rocks, by id
    pub fn rocks(&self) -> Result<Vec<Entity>, PlayfieldError> {
        let mut rocks: Vec<Entity> = self.playfield.world().store_ref::<Rock>()?.ids().collect();
        rocks.sort();
        Ok(rocks)
    }

    /// Simulation clock
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Whether debug mode is on
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Handle a key going down; returns the action it triggered
    pub fn key_down(&mut self, combo: &str) -> Result<Option<Action>, PlayfieldError> {
        let Some(action) = self.bindings.action_for(combo) else {
            return Ok(None);
        };

        match action {
            Action::Debug => self.toggle_debug(),
            // Speed changes are only honored in debug mode
            Action::SpeedDown if self.debug => self.clock.multiply_speed(0.5),
            Action::SpeedUp if self.debug => self.clock.multiply_speed(2.0),
            Action::SpeedDown | Action::SpeedUp => {}
            Action::Up | Action::Down | Action::Left | Action::Right => {
                self.controls.press(action, &mut self.playfield)?;
            }
        }
        Ok(Some(action))
    }

    /// Handle a key going up; returns the action it released
    pub fn key_up(&mut self, combo: &str) -> Result<Option<Action>, PlayfieldError> {
        let Some(action) = self.bindings.action_for(combo) else {
            return Ok(None);
        };

        self.controls.release(action, &mut self.playfield)?;
        Ok(Some(action))
    }

    /// Advance one frame of `raw_delta`; returns the speed-scaled delta applied
    pub fn update(&mut self, raw_delta: f32) -> Result<f32, PlayfieldError> {
        let delta_time = self.clock.advance(raw_delta);
        self.playfield.tick(delta_time)?;
        Ok(delta_time)
    }

    /// Sprites to draw this frame
    pub fn sprites(&self) -> Result<Vec<SpriteInstance>, PlayfieldError> {
        render::collect_sprites(&self.playfield)
    }

    /// Debug text: clock state, held keys and every movable's kinematic state.
    ///
    /// `None` unless debug mode is on.
    pub fn debug_report(&self) -> Result<Option<String>, PlayfieldError> {
        if !self.debug {
            return Ok(None);
        }

        let mut report = format!(
            "Frame: {}\nDelta: {:.4}\nSpeed: {:.2}\n",
            self.clock.frame_count(),
            self.clock.delta_time(),
            self.clock.speed()
        );
        let held: Vec<String> = [Action::Up, Action::Down, Action::Left, Action::Right]
            .into_iter()
            .filter(|action| self.controls.is_held(*action))
            .map(|action| format!("{action:?}"))
            .collect();
        report.push_str(&format!("Held: [{}]\n", held.join(", ")));

        let movables = self.playfield.movables()?;
        let mut entries: Vec<_> = movables.iter().collect();
        entries.sort_by_key(|(entity, _)| *entity);
        for (entity, movable) in entries {
            report.push_str(&format!("\n{entity}\n{movable}\n"));
        }
        Ok(Some(report))
    }

    fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        log::info!("Debug mode: {}", self.debug);
    }
}
