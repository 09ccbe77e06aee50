//! The per-frame update shared by every flock container.
//!
//! Steering is evaluated for all agents against the same pre-frame state
//! before any agent is moved. Interleaving the two would make the result
//! depend on iteration order.

use boid_shared::BoidSettings;

use crate::boid::{Boid, ForceBreakdown};
use crate::boundary::Boundary;
use crate::rules::RuleSet;

/// Advance `boids` by one frame.
///
/// `forces` must be as long as `boids`; on return it holds each agent's
/// weighted rule contributions for the frame.
pub fn advance<B: Boundary + ?Sized>(
    boids: &mut [Boid],
    forces: &mut [ForceBreakdown],
    rules: &RuleSet,
    boundary: &B,
    settings: &BoidSettings,
    delta_time: f32,
) {
    debug_assert_eq!(boids.len(), forces.len());

    // Phase 1: read-only evaluation against the snapshot.
    let snapshot: &[Boid] = boids;
    for (slot, boid) in forces.iter_mut().zip(snapshot.iter()) {
        *slot = boid.steering(snapshot, rules, boundary, settings);
    }

    // Phase 2: every accumulator is filled before anyone moves.
    for (boid, frame_forces) in boids.iter_mut().zip(forces.iter()) {
        boid.accumulate(frame_forces, settings);
    }

    for boid in boids.iter_mut() {
        boid.update(delta_time, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::AgentId;
    use crate::boundary::RectBoundary;
    use crate::vector::Vector2D;
    use boid_shared::Extent;

    fn boundary() -> RectBoundary {
        RectBoundary::new(Vector2D::zero(), Extent::new(100.0, 100.0), 0.05, 3.0)
    }

    /// Interleaved compute-and-move, used to show the two-phase result differs.
    fn advance_interleaved(
        boids: &mut [Boid],
        rules: &RuleSet,
        boundary: &RectBoundary,
        settings: &BoidSettings,
        dt: f32,
    ) {
        for i in 0..boids.len() {
            let forces = boids[i].steering(boids, rules, boundary, settings);
            boids[i].accumulate(&forces, settings);
            boids[i].update(dt, settings);
        }
    }

    fn flock() -> Vec<Boid> {
        vec![
            Boid::new(AgentId(0), Vector2D::new(0.0, 0.0), Vector2D::new(2.0, 0.0)),
            Boid::new(AgentId(1), Vector2D::new(0.6, 0.2), Vector2D::new(0.0, 2.0)),
            Boid::new(AgentId(2), Vector2D::new(-0.5, 0.8), Vector2D::new(-2.0, 1.0)),
        ]
    }

    #[test]
    fn test_advance_is_order_independent() {
        let settings = BoidSettings::default();
        let rules = RuleSet::from_settings(&settings);
        let boundary = boundary();

        let mut forward = flock();
        let mut reversed: Vec<Boid> = flock().into_iter().rev().collect();
        let mut forces = vec![ForceBreakdown::default(); 3];

        advance(&mut forward, &mut forces, &rules, &boundary, &settings, 0.1);
        advance(&mut reversed, &mut forces, &rules, &boundary, &settings, 0.1);
        reversed.reverse();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_interleaving_changes_the_result() {
        let settings = BoidSettings::default();
        let rules = RuleSet::from_settings(&settings);
        let boundary = boundary();

        let mut two_phase = flock();
        let mut forces = vec![ForceBreakdown::default(); 3];
        advance(&mut two_phase, &mut forces, &rules, &boundary, &settings, 0.1);

        let mut interleaved = flock();
        advance_interleaved(&mut interleaved, &rules, &boundary, &settings, 0.1);

        assert_ne!(two_phase, interleaved);
    }

    #[test]
    fn test_forces_are_recorded() {
        let settings = BoidSettings::default();
        let rules = RuleSet::from_settings(&settings);
        let boundary = boundary();
        let mut boids = flock();
        let before = boids.clone();
        let mut forces = vec![ForceBreakdown::default(); 3];

        advance(&mut boids, &mut forces, &rules, &boundary, &settings, 0.1);

        for (boid, recorded) in before.iter().zip(forces.iter()) {
            assert_eq!(*recorded, boid.steering(&before, &rules, &boundary, &settings));
        }
    }

    #[test]
    fn test_speed_band_after_advance() {
        let settings = BoidSettings::default();
        let rules = RuleSet::from_settings(&settings);
        let boundary = boundary();
        let mut boids = flock();
        let mut forces = vec![ForceBreakdown::default(); 3];

        for _ in 0..50 {
            advance(&mut boids, &mut forces, &rules, &boundary, &settings, 1.0 / 60.0);
            for boid in &boids {
                let speed = boid.speed();
                assert!(speed >= settings.min_speed() - 1e-4, "{}", speed);
                assert!(speed <= settings.max_speed + 1e-4, "{}", speed);
            }
        }
    }
}
