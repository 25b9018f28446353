//! Game configuration

use arcade_engine::config::Config;
use arcade_engine::playfield::PlayfieldConfig;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World region, spatial index and movement limits
    pub playfield: PlayfieldConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Controls settings
    pub controls: ControlsConfig,

    /// Headless run settings
    pub simulation: SimulationConfig,
}

impl Config for GameConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Ship spawn position
    pub ship_position: [f32; 2],

    /// Ship thrust while up or down is held
    pub ship_thrust: f32,

    /// Rocks placed at startup
    pub rock_count: u32,

    /// Position of the first rock
    pub rock_origin: [f32; 2],

    /// Offset between consecutive rocks
    pub rock_spacing: [f32; 2],

    /// Largest initial rock speed; rocks start at rest when zero
    pub rock_drift: f32,

    /// Angular acceleration applied per turn press (radians per tick squared)
    pub turn_rate: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            ship_position: [400.0, 400.0],
            ship_thrust: 0.5,
            rock_count: 10,
            rock_origin: [500.0, 500.0],
            rock_spacing: [50.0, 20.0],
            rock_drift: 0.0,
            turn_rate: std::f32::consts::TAU / 5000.0,
        }
    }
}

/// Key bindings; combos like `"ctrl+d"` are matched case-insensitively in any order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Forward thrust keys
    pub up: Vec<String>,

    /// Reverse thrust keys
    pub down: Vec<String>,

    /// Turn counter-clockwise keys
    pub left: Vec<String>,

    /// Turn clockwise keys
    pub right: Vec<String>,

    /// Debug toggle keys
    pub debug: Vec<String>,

    /// Halve game speed (debug only)
    pub speed_down: Vec<String>,

    /// Double game speed (debug only)
    pub speed_up: Vec<String>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        fn keys(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|key| (*key).to_string()).collect()
        }

        Self {
            up: keys(&["w", "arrowup"]),
            down: keys(&["s", "arrowdown"]),
            left: keys(&["a", "arrowleft"]),
            right: keys(&["d", "arrowright"]),
            debug: keys(&["ctrl+shift+d"]),
            speed_down: keys(&["ctrl+shift+arrowdown"]),
            speed_up: keys(&["ctrl+shift+arrowup"]),
        }
    }
}

/// Headless simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames to run before exiting
    pub frames: u64,

    /// Raw frame delta fed to the clock (1.0 is one frame at the target rate)
    pub frame_delta: f32,

    /// Initial game speed multiplier
    pub speed: f32,

    /// Log a state report every this many frames (0 disables)
    pub report_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_delta: 1.0,
            speed: 1.0,
            report_interval: 60,
        }
    }
}
