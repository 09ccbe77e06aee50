//! Local steering rules.
//!
//! Every rule sees the agent and the full snapshot of the flock for the
//! current frame and filters neighbors itself. Cohesion and alignment count
//! the agent too when it is part of the snapshot; separation skips it by
//! identity.

use boid_shared::BoidSettings;

use crate::boid::Boid;
use crate::vector::Vector2D;

/// Neighbors closer than this are treated as coincident by separation.
const MIN_SEPARATION_DISTANCE: f32 = 0.001;

/// Which rule produced a force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Cohesion,
    Alignment,
    Separation,
}

/// A steering rule evaluated against an agent's neighborhood
pub trait FlockingRule {
    fn kind(&self) -> RuleKind;

    fn weight(&self) -> f32;

    /// Weighted steering force for `boid` given every agent in the flock.
    fn force(&self, boid: &Boid, flock: &[Boid], settings: &BoidSettings) -> Vector2D;
}

fn others<'a>(boid: &'a Boid, flock: &'a [Boid]) -> impl Iterator<Item = &'a Boid> + 'a {
    flock.iter().filter(move |other| !core::ptr::eq(*other, boid))
}

/// Reynolds steering: head at full speed along `direction`, minus current velocity.
fn steer_towards(direction: Vector2D, boid: &Boid, settings: &BoidSettings) -> Option<Vector2D> {
    direction
        .try_normalize()
        .map(|unit| unit * settings.max_speed - boid.velocity)
}

/// Steer towards the centroid of neighbors inside the perception radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohesionRule {
    pub weight: f32,
}

impl CohesionRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl FlockingRule for CohesionRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Cohesion
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn force(&self, boid: &Boid, flock: &[Boid], settings: &BoidSettings) -> Vector2D {
        let mut center_of_mass = Vector2D::zero();
        let mut count = 0;

        for other in flock {
            if boid.position.distance(&other.position) < settings.perception_radius {
                center_of_mass += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vector2D::zero();
        }

        center_of_mass = center_of_mass / count as f32;

        steer_towards(center_of_mass - boid.position, boid, settings)
            .map(|steering| steering * self.weight)
            .unwrap_or_else(Vector2D::zero)
    }
}

/// Steer towards the mean velocity of neighbors inside the perception radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentRule {
    pub weight: f32,
}

impl AlignmentRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl FlockingRule for AlignmentRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Alignment
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn force(&self, boid: &Boid, flock: &[Boid], settings: &BoidSettings) -> Vector2D {
        let mut average_velocity = Vector2D::zero();
        let mut count = 0;

        for other in flock {
            if boid.position.distance(&other.position) < settings.perception_radius {
                average_velocity += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vector2D::zero();
        }

        average_velocity = average_velocity / count as f32;

        steer_towards(average_velocity, boid, settings)
            .map(|steering| steering * self.weight)
            .unwrap_or_else(Vector2D::zero)
    }
}

/// Steer away from neighbors inside the avoidance radius, closest first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationRule {
    pub weight: f32,
}

impl SeparationRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }

    /// Raw inverse-square repulsion summed over close neighbors.
    ///
    /// `None` when nobody is inside the avoidance radius.
    pub fn repulsion(&self, boid: &Boid, flock: &[Boid], settings: &BoidSettings) -> Option<Vector2D> {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in others(boid, flock) {
            let distance = boid.position.distance(&other.position);

            if distance < settings.avoidance_radius && distance > MIN_SEPARATION_DISTANCE {
                let away = (boid.position - other.position).normalize();
                sum += away / (distance * distance);
                count += 1;
            }
        }

        (count > 0).then_some(sum)
    }
}

impl FlockingRule for SeparationRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Separation
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn force(&self, boid: &Boid, flock: &[Boid], settings: &BoidSettings) -> Vector2D {
        let Some(repulsion) = self.repulsion(boid, flock, settings) else {
            return Vector2D::zero();
        };

        // Near-cancelled repulsion is too small to steer by; pass it through as is.
        if repulsion.magnitude() <= MIN_SEPARATION_DISTANCE {
            return repulsion * self.weight;
        }

        steer_towards(repulsion, boid, settings)
            .map(|steering| steering.limit(settings.max_steer_force) * self.weight)
            .unwrap_or_else(Vector2D::zero)
    }
}

/// The fixed rule set shared by every agent of one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSet {
    pub cohesion: CohesionRule,
    pub alignment: AlignmentRule,
    pub separation: SeparationRule,
}

impl RuleSet {
    pub fn from_settings(settings: &BoidSettings) -> Self {
        Self {
            cohesion: CohesionRule::new(settings.cohesion_weight),
            alignment: AlignmentRule::new(settings.alignment_weight),
            separation: SeparationRule::new(settings.separation_weight),
        }
    }

    /// Rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn FlockingRule> {
        [
            &self.cohesion as &dyn FlockingRule,
            &self.alignment as &dyn FlockingRule,
            &self.separation as &dyn FlockingRule,
        ]
        .into_iter()
    }
}
