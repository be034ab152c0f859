use tracing::{debug, warn};

use crate::clusterer::{
    EcmConfig, EcmError,
    descriptor::Descriptor,
    distance::argmin,
    store::ClusterStore,
    types::{Assignment, Cluster},
};

/// Name reported by [`Ecm::describe`].
pub const ALGORITHM_NAME: &str = "ECM";

/// Evolving Clustering Method: single-pass clustering of a vector stream.
///
/// Every [`add`](Ecm::add) either drops the point into the nearest cluster that
/// already covers it, widens the cluster with the smallest `distance + radius`
/// while that stays within `2 * distance_threshold`, or starts a new cluster.
/// Clusters are never merged or removed, and the outcome depends on input order.
#[derive(Debug, Clone)]
pub struct Ecm {
    distance_threshold: f64,
    dimension: Option<usize>,
    store: ClusterStore,
}

impl Ecm {
    pub fn new(distance_threshold: f64) -> Result<Self, EcmError> {
        Self::from_config(&EcmConfig::new(distance_threshold))
    }

    pub fn from_config(config: &EcmConfig) -> Result<Self, EcmError> {
        config.validate()?;

        Ok(Self {
            distance_threshold: config.distance_threshold,
            dimension: None,
            store: ClusterStore::new(),
        })
    }

    pub fn config(&self) -> EcmConfig {
        EcmConfig::new(self.distance_threshold)
    }

    pub fn distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    /// Dimension fixed by the first point, if any point was added.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &ClusterStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Feed one point into the model.
    ///
    /// Exactly one cluster is created or touched. On error the model is unchanged.
    pub fn add(&mut self, point: &[f64]) -> Result<Assignment, EcmError> {
        self.check_point(point)?;

        let distances: Vec<f64> = self.store.iter().map(|c| c.distance_to(point)).collect();

        let Some((nearest, nearest_distance)) = argmin(distances.iter().copied().enumerate())
        else {
            return Ok(self.spawn(point));
        };

        let nearest_radius = self.store.as_slice()[nearest].radius();
        if nearest_distance <= nearest_radius {
            self.store.cluster_mut(nearest).absorb(point);
            debug!(index = nearest, distance = nearest_distance, "point joined cluster");
            return Ok(Assignment::Joined(nearest));
        }

        let spread = argmin(
            self.store
                .iter()
                .zip(&distances)
                .map(|(c, d)| d + c.radius())
                .enumerate(),
        );

        match spread {
            Some((index, s)) if s <= 2.0 * self.distance_threshold => {
                let radius = s / 2.0;
                self.store.cluster_mut(index).update(point, radius);
                debug!(index, radius, "cluster grew");
                Ok(Assignment::Grew(index))
            }
            _ => Ok(self.spawn(point)),
        }
    }

    /// Add every point in order, stopping at the first error.
    pub fn extend<I>(&mut self, points: I) -> Result<Vec<Assignment>, EcmError>
    where
        I: IntoIterator,
        I::Item: AsRef<[f64]>,
    {
        points.into_iter().map(|p| self.add(p.as_ref())).collect()
    }

    /// Label for `point`: the nearest cluster that contains it, or the nearest
    /// cluster overall when none does. Ties go to the lower index.
    pub fn index_of_cluster_containing(&self, point: &[f64]) -> Result<usize, EcmError> {
        if self.store.is_empty() {
            return Err(EcmError::EmptyModel);
        }
        self.check_point(point)?;

        if let Some((index, _)) = self.store.nearest_containing(point) {
            return Ok(index);
        }

        let (index, distance) = self.store.nearest(point).ok_or(EcmError::EmptyModel)?;
        warn!(index, distance, "no cluster contains point, using nearest");
        Ok(index)
    }

    /// Labels for a sequence of points, one per point, in order.
    pub fn labels<I>(&self, points: I) -> Result<Vec<usize>, EcmError>
    where
        I: IntoIterator,
        I::Item: AsRef<[f64]>,
    {
        points
            .into_iter()
            .map(|p| self.index_of_cluster_containing(p.as_ref()))
            .collect()
    }

    pub fn describe(&self) -> Descriptor {
        Descriptor::new(ALGORITHM_NAME).with_parameter("distance_threshold", self.distance_threshold)
    }

    fn spawn(&mut self, point: &[f64]) -> Assignment {
        self.dimension.get_or_insert(point.len());
        let index = self.store.push(Cluster::create(point));
        debug!(index, "created cluster");
        Assignment::Created(index)
    }

    fn check_point(&self, point: &[f64]) -> Result<(), EcmError> {
        if let Some(expected) = self.dimension {
            if point.len() != expected {
                return Err(EcmError::DimensionMismatch {
                    expected,
                    actual: point.len(),
                });
            }
        }

        if point.is_empty() {
            return Err(EcmError::InvalidPoint("point has no coordinates".to_string()));
        }

        if let Some(i) = point.iter().position(|x| !x.is_finite()) {
            return Err(EcmError::InvalidPoint(format!(
                "coordinate {} is not finite: {}",
                i, point[i]
            )));
        }

        Ok(())
    }
}
