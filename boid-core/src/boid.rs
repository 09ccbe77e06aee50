use boid_shared::{AgentState, BoidSettings};

use crate::boundary::Boundary;
use crate::rules::{FlockingRule, RuleSet};
use crate::vector::Vector2D;

/// Forces with a squared magnitude below this are dropped as noise.
const FORCE_EPSILON_SQ: f32 = 0.001;

/// Heading is only refreshed above this speed.
const HEADING_MIN_SPEED: f32 = 0.1;

/// Opaque handle to an agent, stable until the flock is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(pub u32);

/// Per-frame steering contributions of one agent, already weighted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceBreakdown {
    pub cohesion: Vector2D,
    pub alignment: Vector2D,
    pub separation: Vector2D,
    pub boundary: Vector2D,
}

impl ForceBreakdown {
    /// Contributions in the order they are applied.
    pub fn ordered(&self) -> [Vector2D; 4] {
        [self.cohesion, self.alignment, self.separation, self.boundary]
    }

    /// Plain sum, without the per-application clamp.
    pub fn total(&self) -> Vector2D {
        self.cohesion + self.alignment + self.separation + self.boundary
    }
}

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub id: AgentId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Accumulated steering for the current frame; zeroed by `update`.
    pub acceleration: Vector2D,
    /// Facing angle in radians.
    pub heading: f32,
}

impl Boid {
    pub fn new(id: AgentId, position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vector2D::zero(),
            heading: velocity.angle(),
        }
    }

    /// Boid moving along `angle` at `speed`.
    pub fn with_heading(id: AgentId, position: Vector2D, angle: f32, speed: f32) -> Self {
        let mut boid = Self::new(id, position, Vector2D::from_angle(angle) * speed);
        boid.heading = angle;
        boid
    }

    /// Add a steering force, keeping the accumulator under `max_steer_force`.
    ///
    /// The clamp runs after every call, so once the limit is reached later
    /// forces only rotate the accumulator.
    pub fn apply_force(&mut self, force: Vector2D, settings: &BoidSettings) {
        if force.sqr_magnitude() < FORCE_EPSILON_SQ {
            return;
        }

        self.acceleration += force;
        self.acceleration = self.acceleration.limit(settings.max_steer_force);
    }

    /// Evaluate every rule and the boundary against this frame's snapshot.
    ///
    /// Read-only: `flock` must be the unmodified state of the whole flock,
    /// `self` included.
    pub fn steering<B: Boundary + ?Sized>(
        &self,
        flock: &[Boid],
        rules: &RuleSet,
        boundary: &B,
        settings: &BoidSettings,
    ) -> ForceBreakdown {
        ForceBreakdown {
            cohesion: rules.cohesion.force(self, flock, settings),
            alignment: rules.alignment.force(self, flock, settings),
            separation: rules.separation.force(self, flock, settings),
            boundary: boundary.steering_force(self.position) * settings.boundary_weight,
        }
    }

    /// Feed a breakdown computed by [`Boid::steering`] into the accumulator.
    pub fn accumulate(&mut self, forces: &ForceBreakdown, settings: &BoidSettings) {
        for force in forces.ordered() {
            self.apply_force(force, settings);
        }
    }

    /// Integrate one frame and keep the speed within `[max_speed / 2, max_speed]`.
    pub fn update(&mut self, delta_time: f32, settings: &BoidSettings) {
        self.position += self.velocity * delta_time;
        self.velocity += self.acceleration * delta_time;

        let speed = self.velocity.magnitude();
        if speed > settings.max_speed {
            self.velocity = self.velocity.normalize() * settings.max_speed;
        } else if speed < settings.min_speed() {
            // A stalled boid keeps flying the way it last faced.
            let direction = self
                .velocity
                .try_normalize()
                .unwrap_or_else(|| Vector2D::from_angle(self.heading));
            self.velocity = direction * settings.min_speed();
        }

        self.acceleration = Vector2D::zero();

        if self.velocity.magnitude() > HEADING_MIN_SPEED {
            self.heading = self.velocity.angle();
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn state(&self) -> AgentState {
        AgentState {
            id: self.id.0,
            position: self.position.into(),
            velocity: self.velocity.into(),
            heading: self.heading,
        }
    }
}
