//! Soft rectangular containment.
//!
//! The boundary never moves an agent. It only contributes a steering force
//! that grows inside a padding band along each edge, so fast agents can still
//! overshoot the nominal edge for a few frames.

use boid_shared::{BoundaryConfig, Extent};

use crate::vector::{inverse_lerp, Vector2D};

/// A region that pushes agents back towards its interior
pub trait Boundary {
    /// Containment force for an agent at `position`, before `boundary_weight`.
    fn steering_force(&self, position: Vector2D) -> Vector2D;

    /// Diagnostic containment test; never used for correction.
    fn is_inside(&self, position: Vector2D) -> bool;
}

/// Axis-aligned rectangle with a padded repulsion band on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBoundary {
    min: Vector2D,
    max: Vector2D,
    padding: f32,
    bounce_strength: f32,
}

impl RectBoundary {
    pub fn new(center: Vector2D, size: Extent, padding: f32, bounce_strength: f32) -> Self {
        let half = Vector2D::new(size.width * 0.5, size.height * 0.5);
        Self {
            min: center - half,
            max: center + half,
            padding,
            bounce_strength,
        }
    }

    pub fn from_config(config: &BoundaryConfig) -> Self {
        Self::new(
            config.center.into(),
            config.size,
            config.padding,
            config.bounce_strength,
        )
    }

    pub fn min(&self) -> Vector2D {
        self.min
    }

    pub fn max(&self) -> Vector2D {
        self.max
    }

    pub fn center(&self) -> Vector2D {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector2D {
        self.max - self.min
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn bounce_strength(&self) -> f32 {
        self.bounce_strength
    }

    /// The descriptor this boundary was built from.
    pub fn descriptor(&self) -> BoundaryConfig {
        let size = self.size();
        BoundaryConfig {
            center: self.center().into(),
            size: Extent::new(size.x, size.y),
            padding: self.padding,
            bounce_strength: self.bounce_strength,
        }
    }

    fn axis_force(&self, value: f32, min: f32, max: f32) -> f32 {
        let pad = (max - min) * self.padding;

        if value < min + pad {
            let intensity = inverse_lerp(min, min + pad, value);
            self.bounce_strength * (1.0 - intensity)
        } else if value > max - pad {
            let intensity = inverse_lerp(max, max - pad, value);
            -self.bounce_strength * (1.0 - intensity)
        } else {
            0.0
        }
    }
}

impl Boundary for RectBoundary {
    fn steering_force(&self, position: Vector2D) -> Vector2D {
        Vector2D::new(
            self.axis_force(position.x, self.min.x, self.max.x),
            self.axis_force(position.y, self.min.y, self.max.y),
        )
    }

    fn is_inside(&self, position: Vector2D) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}
