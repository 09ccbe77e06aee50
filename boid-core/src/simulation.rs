use boid_shared::{
    BoidSettings, BoundaryConfig, ConfigError, FlockSnapshot, SimulationConfig, SpawnConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boid::{AgentId, Boid, ForceBreakdown};
use crate::boundary::{Boundary, RectBoundary};
use crate::rules::RuleSet;
use crate::spawn;
use crate::step;
use crate::vector::Vector2D;

/// A flock of boids driven one frame at a time by its host
pub struct FlockSimulation {
    boids: Vec<Boid>,
    forces: Vec<ForceBreakdown>,
    settings: BoidSettings,
    rules: RuleSet,
    boundary: RectBoundary,
    spawn: SpawnConfig,
    rng: StdRng,
    next_id: u32,
    frame: u64,
}

impl FlockSimulation {
    /// Validate `config`, build the boundary and rule set, and spawn the flock.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let settings = config.settings;
        if settings.avoidance_radius > settings.perception_radius {
            log::warn!(
                "avoidance radius {} exceeds perception radius {}",
                settings.avoidance_radius,
                settings.perception_radius
            );
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut simulation = Self {
            boids: Vec::with_capacity(config.spawn.count),
            forces: Vec::with_capacity(config.spawn.count),
            settings,
            rules: RuleSet::from_settings(&settings),
            boundary: RectBoundary::from_config(&config.boundary),
            spawn: config.spawn,
            rng,
            next_id: 0,
            frame: 0,
        };

        log::info!(
            "Initializing flock: {} boids, {:?} layout, boundary {}x{}",
            config.spawn.count,
            config.spawn.layout,
            config.boundary.size.width,
            config.boundary.size.height
        );
        simulation.spawn_flock();

        Ok(simulation)
    }

    fn spawn_flock(&mut self) {
        let positions = spawn::positions(&self.spawn, &mut self.rng);
        for position in positions {
            self.create_agent(position);
        }
        log::debug!("Spawned {} boids", self.boids.len());
    }

    /// Add one boid at `position` with a random heading and cruising speed.
    pub fn create_agent(&mut self, position: Vector2D) -> AgentId {
        let velocity = spawn::initial_velocity(&self.settings, &mut self.rng);
        self.create_agent_with_velocity(position, velocity)
    }

    /// Add one boid with a host-chosen velocity; speed limits apply from the next tick.
    pub fn create_agent_with_velocity(&mut self, position: Vector2D, velocity: Vector2D) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.boids.push(Boid::new(id, position, velocity));
        self.forces.push(ForceBreakdown::default());
        id
    }

    /// Run one full frame: evaluate every boid, then move every boid.
    ///
    /// Negative or non-finite `delta_time` skips the frame.
    pub fn tick(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Skipping frame with invalid delta time {}", delta_time);
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
        self.frame += 1;
    }

    /// Remove every boid and respawn the flock with the same configuration.
    pub fn reset(&mut self) {
        log::debug!("Resetting flock of {} boids", self.boids.len());
        self.boids.clear();
        self.forces.clear();
        self.frame = 0;
        self.spawn_flock();
    }

    pub fn agents(&self) -> &[Boid] {
        &self.boids
    }

    pub fn agent(&self, id: AgentId) -> Option<&Boid> {
        self.index_of(id).map(|i| &self.boids[i])
    }

    fn index_of(&self, id: AgentId) -> Option<usize> {
        // Ids are handed out in increasing order and never reordered.
        self.boids.binary_search_by_key(&id, |boid| boid.id).ok()
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Frames advanced since construction or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn settings(&self) -> &BoidSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn boundary(&self) -> &RectBoundary {
        &self.boundary
    }

    pub fn boundary_descriptor(&self) -> BoundaryConfig {
        self.boundary.descriptor()
    }

    pub fn spawn_config(&self) -> &SpawnConfig {
        &self.spawn
    }

    /// Weighted rule contributions from the last frame, in agent order.
    pub fn forces(&self) -> &[ForceBreakdown] {
        &self.forces
    }

    pub fn forces_of(&self, id: AgentId) -> Option<&ForceBreakdown> {
        self.index_of(id).map(|i| &self.forces[i])
    }

    /// Pairs of boids currently within perception range of each other.
    pub fn neighbor_pairs(&self) -> Vec<(AgentId, AgentId)> {
        let radius = self.settings.perception_radius;
        let mut pairs = Vec::new();

        for (i, a) in self.boids.iter().enumerate() {
            for b in &self.boids[i + 1..] {
                if a.position.distance(&b.position) < radius {
                    pairs.push((a.id, b.id));
                }
            }
        }

        pairs
    }

    /// Number of boids inside the nominal boundary rectangle.
    pub fn count_inside(&self) -> usize {
        self.boids
            .iter()
            .filter(|boid| self.boundary.is_inside(boid.position))
            .count()
    }

    pub fn snapshot(&self) -> FlockSnapshot {
        FlockSnapshot {
            frame: self.frame,
            agents: self.boids.iter().map(Boid::state).collect(),
        }
    }
}
