use serde::Serialize;

use crate::clusterer::{centroid::shift_toward, distance::euclidean_distance};

/// Slack allowed by [`Cluster::contains`] so boundary points don't flicker in and out.
pub const EPSILON: f64 = 1e-9;

/// One discovered group of points.
///
/// Fields are only reachable through accessors; the engine is the sole writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    center: Vec<f64>,
    radius: f64,
    instances: Vec<Vec<f64>>,
}

impl Cluster {
    pub(crate) fn create(point: &[f64]) -> Self {
        Self {
            center: point.to_vec(),
            radius: 0.0,
            instances: vec![point.to_vec()],
        }
    }

    /// Record a point that is already covered, leaving the geometry alone.
    pub(crate) fn absorb(&mut self, point: &[f64]) {
        self.instances.push(point.to_vec());
    }

    /// Grow to `new_radius`, dragging the center toward `point` so that
    /// `point` lands exactly on the new boundary.
    pub(crate) fn update(&mut self, point: &[f64], new_radius: f64) {
        let gap = self.distance_to(point);

        if gap > 0.0 {
            shift_toward(&mut self.center, point, gap, new_radius - self.radius);
        }

        self.radius = new_radius;
        self.instances.push(point.to_vec());
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        self.distance_to(point) <= self.radius + EPSILON
    }

    pub fn distance_to(&self, point: &[f64]) -> f64 {
        euclidean_distance(point, &self.center)
    }

    pub fn center(&self) -> &[f64] {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Member points in arrival order.
    pub fn instances(&self) -> &[Vec<f64>] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// What a single `add` did with its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Assignment {
    /// Point was already inside the nearest cluster.
    Joined(usize),
    /// An existing cluster moved and widened to take the point.
    Grew(usize),
    /// A new cluster was spawned.
    Created(usize),
}

impl Assignment {
    pub fn index(self) -> usize {
        match self {
            Assignment::Joined(i) | Assignment::Grew(i) | Assignment::Created(i) => i,
        }
    }
}
