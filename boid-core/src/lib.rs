#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking core: steering rules, soft boundary, and the two-phase frame update.
//!
//! `FlockSimulation` owns a heap-allocated flock with seeded spawning;
//! `FixedFlock` runs the same update over a fixed-capacity buffer for
//! embedded targets.

pub mod boid;
pub mod boundary;
pub mod fixed;
pub mod rules;
pub mod step;
pub mod vector;

#[cfg(feature = "std")]
pub mod simulation;
#[cfg(feature = "std")]
pub mod spawn;

pub use boid::{AgentId, Boid, ForceBreakdown};
pub use boundary::{Boundary, RectBoundary};
pub use fixed::FixedFlock;
pub use rules::{AlignmentRule, CohesionRule, FlockingRule, RuleKind, RuleSet, SeparationRule};
pub use vector::Vector2D;

#[cfg(feature = "std")]
pub use simulation::FlockSimulation;

pub use boid_shared::{
    BoidSettings, BoundaryConfig, ConfigError, Extent, Position, SimulationConfig, SpawnConfig,
    SpawnLayout, Velocity,
};
