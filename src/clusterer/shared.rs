use parking_lot::RwLock;
use std::sync::Arc;

use crate::clusterer::{Assignment, Cluster, Descriptor, Ecm, EcmError};

/// Thread-safe handle to an [`Ecm`].
///
/// `add` holds the write lock for the whole decision; every read takes the
/// read lock, so readers never see a cluster half-way through an update.
#[derive(Debug, Clone)]
pub struct SharedEcm {
    inner: Arc<RwLock<Ecm>>,
}

impl SharedEcm {
    pub fn new(ecm: Ecm) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ecm)),
        }
    }

    pub fn add(&self, point: &[f64]) -> Result<Assignment, EcmError> {
        self.inner.write().add(point)
    }

    pub fn index_of_cluster_containing(&self, point: &[f64]) -> Result<usize, EcmError> {
        self.inner.read().index_of_cluster_containing(point)
    }

    /// Label a whole sequence under one read lock, so no `add` lands mid-way.
    pub fn labels<I>(&self, points: I) -> Result<Vec<usize>, EcmError>
    where
        I: IntoIterator,
        I::Item: AsRef<[f64]>,
    {
        self.inner.read().labels(points)
    }

    pub fn describe(&self) -> Descriptor {
        self.inner.read().describe()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of the clusters as of now.
    pub fn snapshot(&self) -> Vec<Cluster> {
        self.inner.read().clusters().to_vec()
    }

    /// Recover the engine once every other handle is gone.
    pub fn into_inner(self) -> Result<Ecm, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Ecm> for SharedEcm {
    fn from(ecm: Ecm) -> Self {
        Self::new(ecm)
    }
}
