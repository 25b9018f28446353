//! Keyboard bindings and ship control handlers
//!
//! Key combos are normalized (lowercased, split on `+`, sorted) so that
//! `"Shift+Ctrl+D"` and `"ctrl+shift+d"` resolve to the same [`Action`].

use std::collections::{HashMap, HashSet};

use arcade_engine::prelude::*;

use crate::components::Ship;
use crate::config::ControlsConfig;

/// Game action a key combo resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Forward thrust
    Up,
    /// Reverse thrust
    Down,
    /// Turn counter-clockwise
    Left,
    /// Turn clockwise
    Right,
    /// Toggle debug mode
    Debug,
    /// Halve game speed
    SpeedDown,
    /// Double game speed
    SpeedUp,
}

/// Canonical form of a key combo
pub fn normalize_combo(combo: &str) -> String {
    let mut keys: Vec<String> = combo
        .split('+')
        .map(|key| key.trim().to_lowercase())
        .filter(|key| !key.is_empty())
        .collect();
    keys.sort();
    keys.join("+")
}

/// Lookup table from normalized key combo to action
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<String, Action>,
}

impl KeyBindings {
    /// Build bindings from configuration; later entries win on duplicate combos
    pub fn from_config(config: &ControlsConfig) -> Self {
        let mut bindings = Self::default();
        let groups = [
            (&config.up, Action::Up),
            (&config.down, Action::Down),
            (&config.left, Action::Left),
            (&config.right, Action::Right),
            (&config.debug, Action::Debug),
            (&config.speed_down, Action::SpeedDown),
            (&config.speed_up, Action::SpeedUp),
        ];
        for (combos, action) in groups {
            for combo in combos {
                bindings.bind(combo, action);
            }
        }
        bindings
    }

    /// Bind a combo to an action
    pub fn bind(&mut self, combo: &str, action: Action) {
        if let Some(previous) = self.bindings.insert(normalize_combo(combo), action) {
            log::warn!("Key combo '{}' rebound from {:?} to {:?}", combo, previous, action);
        }
    }

    /// Action bound to `combo`, if any
    pub fn action_for(&self, combo: &str) -> Option<Action> {
        self.bindings.get(&normalize_combo(combo)).copied()
    }
}

/// Press/release handlers that steer one ship.
///
/// Thrust comes from the ship's [`Ship`] component at press time.
#[derive(Debug, Clone)]
pub struct ShipControls {
    ship: Entity,
    turn_rate: f32,
    held: HashSet<Action>,
}

impl ShipControls {
    /// Create controls for `ship`
    pub fn new(ship: Entity, turn_rate: f32) -> Self {
        Self {
            ship,
            turn_rate,
            held: HashSet::new(),
        }
    }

    /// Controlled entity
    pub fn ship(&self) -> Entity {
        self.ship
    }

    /// Whether `action` is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Handle a key press. Returns `false` for repeats and non-ship actions.
    pub fn press(&mut self, action: Action, playfield: &mut Playfield) -> Result<bool, PlayfieldError> {
        if !Self::steers_ship(action) || self.held.contains(&action) {
            return Ok(false);
        }

        let thrust = playfield.world().get_component::<Ship>(self.ship)?.thrust;
        let movable = playfield.movable_mut(self.ship)?;
        let turn = self.turn_rate.min(movable.max_angular_acceleration);
        match action {
            Action::Up => movable.accelerate_relative_to_rotation(Vec2::new(0.0, -thrust)),
            Action::Down => movable.accelerate_relative_to_rotation(Vec2::new(0.0, thrust)),
            Action::Left => movable.rotate(-turn),
            Action::Right => movable.rotate(turn),
            Action::Debug | Action::SpeedDown | Action::SpeedUp => {}
        }
        self.held.insert(action);
        log::trace!("{:?} pressed for {}", action, self.ship);
        Ok(true)
    }

    /// Handle a key release, undoing the matching press
    pub fn release(&mut self, action: Action, playfield: &mut Playfield) -> Result<bool, PlayfieldError> {
        if !self.held.remove(&action) {
            return Ok(false);
        }

        let movable = playfield.movable_mut(self.ship)?;
        let turn = self.turn_rate.min(movable.max_angular_acceleration);
        match action {
            Action::Up | Action::Down => movable.accelerate_relative_to_rotation(Vec2::zeros()),
            Action::Left => movable.rotate(turn),
            Action::Right => movable.rotate(-turn),
            Action::Debug | Action::SpeedDown | Action::SpeedUp => {}
        }
        log::trace!("{:?} released for {}", action, self.ship);
        Ok(true)
    }

    fn steers_ship(action: Action) -> bool {
        matches!(action, Action::Up | Action::Down | Action::Left | Action::Right)
    }
}
