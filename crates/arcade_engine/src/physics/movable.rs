//! Kinematic component for entities that move in the 2D playfield
//!
//! Holds position, velocity, acceleration and rotational state, and advances
//! them once per tick with speed clamping, friction and a wall-stop at the
//! world bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants::PI, wrap_angle, Vec2, Vec2Ext};
use crate::playfield::WorldBounds;

/// Tunable limits applied to newly created [`Movable`]s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovableDefaults {
    /// Velocity damping factor per tick, in `[0, 1)`
    pub friction: f32,
    /// Maximum linear speed
    pub max_speed: f32,
    /// Maximum magnitude of an applied acceleration
    pub max_thrust: f32,
    /// Upper bound on angular velocity (radians per tick)
    pub max_angular_velocity: f32,
    /// Largest angular acceleration a single input may apply
    pub max_angular_acceleration: f32,
}

impl Default for MovableDefaults {
    fn default() -> Self {
        Self {
            friction: 0.005,
            max_speed: 500.0,
            max_thrust: 100.0,
            max_angular_velocity: PI / 4.0,
            max_angular_acceleration: PI / 8.0,
        }
    }
}

/// Kinematic state of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Movable {
    /// Position in world units
    pub position: Vec2,

    /// Linear velocity in units per tick
    pub velocity: Vec2,

    /// Linear acceleration in units per tick squared
    pub acceleration: Vec2,

    /// Heading in radians, kept in `[0, 2π)`
    pub rotation: f32,

    /// Angular velocity in radians per tick
    pub angular_velocity: f32,

    /// Angular acceleration in radians per tick squared
    pub angular_acceleration: f32,

    /// Damping factor applied to both velocities every tick
    pub friction: f32,

    /// Linear speed limit
    pub max_speed: f32,

    /// Acceleration magnitude limit
    pub max_thrust: f32,

    /// Upper bound on angular velocity
    pub max_angular_velocity: f32,

    /// Largest angular acceleration a single input may apply
    pub max_angular_acceleration: f32,

    /// Extent of the world this entity is confined to
    pub bounds: WorldBounds,
}

impl Movable {
    /// Create a movable at rest at `position` with default limits
    pub fn new(position: Vec2, bounds: WorldBounds) -> Self {
        MovableBuilder::new(bounds).position(position).build()
    }

    /// Start building a movable confined to `bounds`
    pub fn builder(bounds: WorldBounds) -> MovableBuilder {
        MovableBuilder::new(bounds)
    }

    /// Advance the simulation by `delta_time`
    pub fn update(&mut self, delta_time: f32) {
        self.velocity += self.acceleration * delta_time;
        self.velocity = self.velocity.clamp_magnitude(self.max_speed);
        self.velocity *= 1.0 - self.friction;
        self.position += self.velocity * delta_time;

        self.angular_velocity += self.angular_acceleration * delta_time;
        // Upper bound only: spinning the other way is never capped
        if self.angular_velocity > self.max_angular_velocity {
            self.angular_velocity = self.max_angular_velocity;
        }
        self.angular_velocity *= 1.0 - self.friction;
        self.rotation = wrap_angle(self.rotation + self.angular_velocity * delta_time);

        self.bounds_check();
    }

    /// Replace the current acceleration, clamped to `max_thrust`
    pub fn accelerate(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration.clamp_magnitude(self.max_thrust);
    }

    /// Accelerate along `thrust` expressed in the entity's own frame
    pub fn accelerate_relative_to_rotation(&mut self, thrust: Vec2) {
        self.accelerate(thrust.rotated(self.rotation));
    }

    /// Add `delta` to the angular acceleration.
    ///
    /// Additive so that opposite press and release deltas cancel exactly.
    pub fn rotate(&mut self, delta: f32) {
        self.angular_acceleration += delta;
    }

    /// Predicted position after `time` assuming constant acceleration
    pub fn position_at(&self, time: f32) -> Vec2 {
        self.position + self.velocity * time + self.acceleration * (0.5 * time * time)
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = Vec2::zeros();
        self.acceleration = Vec2::zeros();
        self.angular_velocity = 0.0;
        self.angular_acceleration = 0.0;
    }

    fn bounds_check(&mut self) {
        if self.position.x > self.bounds.width {
            self.position.x = self.bounds.width;
            self.velocity.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = 0.0;
        }

        if self.position.y > self.bounds.height {
            self.position.y = self.bounds.height;
            self.velocity.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
        }
    }
}

impl fmt::Display for Movable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position: {:.2}, {:.2}", self.position.x, self.position.y)?;
        writeln!(f, "Velocity: {:.2}, {:.2}", self.velocity.x, self.velocity.y)?;
        writeln!(f, "Acceleration: {:.2}, {:.2}", self.acceleration.x, self.acceleration.y)?;
        writeln!(f, "Rotation: {:.2} PI", self.rotation / PI)?;
        writeln!(f, "Angular Velocity: {:.2} PI", self.angular_velocity / PI)?;
        write!(f, "Angular Acceleration: {:.2} PI", self.angular_acceleration / PI)
    }
}

/// Builder for [`Movable`] with every field optional
#[derive(Debug, Clone)]
pub struct MovableBuilder {
    movable: Movable,
}

impl MovableBuilder {
    /// Start from rest at the origin with [`MovableDefaults::default`]
    pub fn new(bounds: WorldBounds) -> Self {
        Self::with_defaults(bounds, &MovableDefaults::default())
    }

    /// Start from rest at the origin with the given limits
    pub fn with_defaults(bounds: WorldBounds, defaults: &MovableDefaults) -> Self {
        Self {
            movable: Movable {
                position: Vec2::zeros(),
                velocity: Vec2::zeros(),
                acceleration: Vec2::zeros(),
                rotation: 0.0,
                angular_velocity: 0.0,
                angular_acceleration: 0.0,
                friction: defaults.friction,
                max_speed: defaults.max_speed,
                max_thrust: defaults.max_thrust,
                max_angular_velocity: defaults.max_angular_velocity,
                max_angular_acceleration: defaults.max_angular_acceleration,
                bounds,
            },
        }
    }

    /// Set the starting position
    pub fn position(mut self, position: Vec2) -> Self {
        self.movable.position = position;
        self
    }

    /// Set the starting velocity
    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.movable.velocity = velocity;
        self
    }

    /// Set the starting acceleration
    pub fn acceleration(mut self, acceleration: Vec2) -> Self {
        self.movable.acceleration = acceleration;
        self
    }

    /// Set the starting heading
    pub fn rotation(mut self, rotation: f32) -> Self {
        self.movable.rotation = wrap_angle(rotation);
        self
    }

    /// Set the starting angular velocity
    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.movable.angular_velocity = angular_velocity;
        self
    }

    /// Set the friction factor, clamped into `[0, 1)`
    pub fn friction(mut self, friction: f32) -> Self {
        self.movable.friction = friction.clamp(0.0, 1.0 - f32::EPSILON);
        self
    }

    /// Set the linear speed limit
    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.movable.max_speed = max_speed.max(0.0);
        self
    }

    /// Set the acceleration magnitude limit
    pub fn max_thrust(mut self, max_thrust: f32) -> Self {
        self.movable.max_thrust = max_thrust.max(0.0);
        self
    }

    /// Set the angular velocity upper bound
    pub fn max_angular_velocity(mut self, max_angular_velocity: f32) -> Self {
        self.movable.max_angular_velocity = max_angular_velocity;
        self
    }

    /// Finish building; velocity and acceleration are clamped to the final limits
    pub fn build(self) -> Movable {
        let mut movable = self.movable;
        movable.velocity = movable.velocity.clamp_magnitude(movable.max_speed);
        movable.acceleration = movable.acceleration.clamp_magnitude(movable.max_thrust);
        movable
    }
}
