//! Time management utilities

/// Simulation clock that scales raw frame time by a game-speed multiplier
///
/// The frame driver feeds the raw delta of each frame to [`GameClock::advance`]
/// and hands the returned, speed-scaled delta to the integrator.
#[derive(Debug, Clone)]
pub struct GameClock {
    speed: f32,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Create a clock running at normal speed
    pub fn new() -> Self {
        Self::with_speed(1.0)
    }

    /// Create a clock running at the given speed multiplier
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame of `raw_delta` and return the scaled delta
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        self.delta_time = raw_delta * self.speed;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Multiply the current speed (e.g. `0.5` to halve, `2.0` to double)
    pub fn multiply_speed(&mut self, multiplier: f32) {
        self.speed = (self.speed * multiplier).max(0.0);
        log::debug!("Game speed now {:.3}", self.speed);
    }

    /// Current speed multiplier
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Scaled delta of the last frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total scaled time since creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames advanced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(1.0), 1.0);

        clock.multiply_speed(0.5);
        assert_eq!(clock.advance(1.0), 0.5);
        clock.multiply_speed(4.0);
        assert_eq!(clock.advance(1.0), 2.0);

        assert_eq!(clock.frame_count(), 3);
        assert_eq!(clock.total_time(), 3.5);
        assert_eq!(clock.delta_time(), 2.0);
    }

    #[test]
    fn test_speed_never_negative() {
        let mut clock = GameClock::with_speed(1.0);
        clock.multiply_speed(-3.0);
        assert_eq!(clock.speed(), 0.0);
        assert_eq!(clock.advance(1.0), 0.0);
    }
}
