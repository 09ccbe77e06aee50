use boid_shared::{BoidSettings, BoundaryConfig, ConfigError};

use crate::boid::{AgentId, Boid, ForceBreakdown};
use crate::boundary::RectBoundary;
use crate::rules::RuleSet;
use crate::step;

/// A collection of boids for embedded (no_std) environments
///
/// Capacity is fixed at compile time. The host supplies every boid,
/// including its initial velocity, since no random source is assumed.
pub struct FixedFlock<const N: usize> {
    boids: heapless::Vec<Boid, N>,
    forces: heapless::Vec<ForceBreakdown, N>,
    settings: BoidSettings,
    rules: RuleSet,
    boundary: RectBoundary,
}

impl<const N: usize> FixedFlock<N> {
    pub fn new(settings: BoidSettings, boundary: &BoundaryConfig) -> Result<Self, ConfigError> {
        settings.validate()?;
        boundary.validate()?;

        Ok(Self {
            boids: heapless::Vec::new(),
            forces: heapless::Vec::new(),
            settings,
            rules: RuleSet::from_settings(&settings),
            boundary: RectBoundary::from_config(boundary),
        })
    }

    /// Add a boid, handing it back when the flock is full.
    pub fn add_boid(&mut self, boid: Boid) -> Result<AgentId, Boid> {
        let id = boid.id;
        self.boids.push(boid)?;
        // Both buffers share capacity N, so this cannot fail after the push above.
        let _ = self.forces.push(ForceBreakdown::default());
        Ok(id)
    }

    pub fn tick(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return;
        }

        step::advance(
            &mut self.boids,
            &mut self.forces,
            &self.rules,
            &self.boundary,
            &self.settings,
            delta_time,
        );
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn forces(&self) -> &[ForceBreakdown] {
        &self.forces
    }

    pub fn boundary(&self) -> &RectBoundary {
        &self.boundary
    }

    pub fn is_full(&self) -> bool {
        self.boids.is_full()
    }

    pub fn clear(&mut self) {
        self.boids.clear();
        self.forces.clear();
    }
}
