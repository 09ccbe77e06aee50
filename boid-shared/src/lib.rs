#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

mod error;

pub use error::ConfigError;

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Velocity in world units per second
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }
}

/// Width and height of an axis-aligned region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        positive(field, self.width)?;
        positive(field, self.height)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Tunable steering parameters, fixed for the lifetime of a simulation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoidSettings {
    /// Upper bound on velocity magnitude; the lower bound is half of this.
    pub max_speed: f32,
    /// Upper bound on the accumulated steering acceleration.
    pub max_steer_force: f32,
    /// Neighbors closer than this feed cohesion and alignment.
    pub perception_radius: f32,
    /// Neighbors closer than this feed separation.
    pub avoidance_radius: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub boundary_weight: f32,
}

impl Default for BoidSettings {
    fn default() -> Self {
        Self {
            max_speed: 3.5,
            max_steer_force: 2.5,
            perception_radius: 3.5,
            avoidance_radius: 1.25,
            cohesion_weight: 1.2,
            alignment_weight: 1.5,
            separation_weight: 2.0,
            boundary_weight: 2.5,
        }
    }
}

impl BoidSettings {
    pub fn min_speed(&self) -> f32 {
        self.max_speed * 0.5
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_speed", self.max_speed)?;
        positive("max_steer_force", self.max_steer_force)?;
        positive("perception_radius", self.perception_radius)?;
        positive("avoidance_radius", self.avoidance_radius)?;
        non_negative("cohesion_weight", self.cohesion_weight)?;
        non_negative("alignment_weight", self.alignment_weight)?;
        non_negative("separation_weight", self.separation_weight)?;
        non_negative("boundary_weight", self.boundary_weight)
    }
}

/// Rectangular region that softly contains the flock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryConfig {
    pub center: Position,
    pub size: Extent,
    /// Width of the repulsion band as a fraction of each axis extent.
    pub padding: f32,
    /// Force applied exactly on the edge.
    pub bounce_strength: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            center: Position::new(0.0, 0.0),
            size: Extent::new(16.0, 9.0),
            padding: 0.05,
            bounce_strength: 3.0,
        }
    }
}

impl BoundaryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("boundary.center", self.center.x)?;
        finite("boundary.center", self.center.y)?;
        self.size.validate("boundary.size")?;
        finite("boundary.padding", self.padding)?;
        if !(0.0..=1.0).contains(&self.padding) {
            return Err(ConfigError::OutOfRange {
                field: "boundary.padding",
                value: self.padding,
                min: 0.0,
                max: 1.0,
            });
        }
        non_negative("boundary.bounce_strength", self.bounce_strength)
    }
}

/// How initial positions are laid out
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpawnLayout {
    /// Uniformly random inside the spawn bounds
    #[default]
    Random,
    /// One agent per cell of a near-square grid covering the spawn bounds
    Grid,
    /// Clustered inside a disk of a quarter of the shorter side
    Formation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: usize,
    pub center: Position,
    pub bounds: Extent,
    pub layout: SpawnLayout,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 50,
            center: Position::new(0.0, 0.0),
            bounds: Extent::new(10.0, 6.0),
            layout: SpawnLayout::Random,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("spawn.center", self.center.x)?;
        finite("spawn.center", self.center.y)?;
        self.bounds.validate("spawn.bounds")
    }
}

/// Everything a host hands over to start a simulation run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for spawn positions and initial headings; `None` draws from entropy.
    pub seed: Option<u64>,
    pub settings: BoidSettings,
    pub boundary: BoundaryConfig,
    pub spawn: SpawnConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        self.boundary.validate()?;
        self.spawn.validate()
    }

    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Read-only view of one agent, as exported to hosts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub id: u32,
    pub position: Position,
    pub velocity: Velocity,
    /// Facing angle in radians
    pub heading: f32,
}

impl AgentState {
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// All agents after a given frame
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockSnapshot {
    pub frame: u64,
    pub agents: Vec<AgentState>,
}
