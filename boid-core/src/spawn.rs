//! Initial placement and headings for a freshly spawned flock.

use boid_shared::{BoidSettings, SpawnConfig, SpawnLayout};
use rand::Rng;

use crate::vector::Vector2D;

/// Spawn positions for `config.count` agents.
pub fn positions<R: Rng + ?Sized>(config: &SpawnConfig, rng: &mut R) -> Vec<Vector2D> {
    let center: Vector2D = config.center.into();
    let half = Vector2D::new(config.bounds.width * 0.5, config.bounds.height * 0.5);
    let count = config.count;

    match config.layout {
        SpawnLayout::Random => (0..count)
            .map(|_| {
                center
                    + Vector2D::new(
                        rng.gen_range(-half.x..half.x),
                        rng.gen_range(-half.y..half.y),
                    )
            })
            .collect(),
        SpawnLayout::Grid => {
            let (rows, cols) = grid_shape(count);
            let cell = Vector2D::new(
                config.bounds.width / cols as f32,
                config.bounds.height / rows as f32,
            );
            let origin = center - half;

            (0..count)
                .map(|i| {
                    let row = i / cols;
                    let col = i % cols;
                    origin
                        + Vector2D::new(
                            (col as f32 + 0.5) * cell.x,
                            (row as f32 + 0.5) * cell.y,
                        )
                })
                .collect()
        }
        SpawnLayout::Formation => {
            let radius = config.bounds.min_side() * 0.25;
            (0..count)
                .map(|_| {
                    let angle = rng.gen_range(0.0..core::f32::consts::TAU);
                    let distance = rng.gen_range(0.0..radius);
                    center + Vector2D::from_angle(angle) * distance
                })
                .collect()
        }
    }
}

/// Rows and columns of the smallest near-square grid holding `count` cells.
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let rows = (count as f64).sqrt().ceil() as usize;
    let cols = count.div_ceil(rows);
    (rows, cols)
}

/// Random heading with a speed between half and full `max_speed`.
pub fn initial_velocity<R: Rng + ?Sized>(settings: &BoidSettings, rng: &mut R) -> Vector2D {
    let angle = rng.gen_range(0.0..core::f32::consts::TAU);
    let speed = rng.gen_range(settings.min_speed()..=settings.max_speed);
    Vector2D::from_angle(angle) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_shared::{Extent, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(layout: SpawnLayout, count: usize) -> SpawnConfig {
        SpawnConfig {
            count,
            center: Position::new(2.0, -1.0),
            bounds: Extent::new(10.0, 6.0),
            layout,
        }
    }

    fn within(config: &SpawnConfig, p: Vector2D) -> bool {
        let hw = config.bounds.width * 0.5;
        let hh = config.bounds.height * 0.5;
        p.x >= config.center.x - hw
            && p.x <= config.center.x + hw
            && p.y >= config.center.y - hh
            && p.y <= config.center.y + hh
    }

    #[test]
    fn test_grid_shape() {
        assert_eq!(grid_shape(0), (0, 0));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(50), (8, 7));
        assert_eq!(grid_shape(9), (3, 3));
        assert_eq!(grid_shape(10), (4, 3));
    }

    #[test]
    fn test_grid_positions_are_unique_and_inside() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = config(SpawnLayout::Grid, 50);
        let points = positions(&cfg, &mut rng);

        assert_eq!(points.len(), 50);
        for (i, p) in points.iter().enumerate() {
            assert!(within(&cfg, *p), "{:?}", p);
            for q in &points[i + 1..] {
                assert_ne!(p, q);
            }
        }
    }

    #[test]
    fn test_random_positions_inside() {
        let mut rng = StdRng::seed_from_u64(2);
        let cfg = config(SpawnLayout::Random, 200);
        for p in positions(&cfg, &mut rng) {
            assert!(within(&cfg, p), "{:?}", p);
        }
    }

    #[test]
    fn test_formation_inside_disk() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = config(SpawnLayout::Formation, 200);
        let center: Vector2D = cfg.center.into();
        for p in positions(&cfg, &mut rng) {
            assert!(p.distance(&center) <= 1.5 + 1e-4);
        }
    }

    #[test]
    fn test_seeded_positions_repeat() {
        let cfg = config(SpawnLayout::Random, 20);
        let a = positions(&cfg, &mut StdRng::seed_from_u64(42));
        let b = positions(&cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_initial_velocity_in_speed_band() {
        let settings = BoidSettings::default();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let speed = initial_velocity(&settings, &mut rng).magnitude();
            assert!(speed >= settings.min_speed() - 1e-4);
            assert!(speed <= settings.max_speed + 1e-4);
        }
    }
}
