use crate::clusterer::{distance::argmin, types::Cluster};

/// Append-only list of clusters. A cluster's index never changes once assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterStore {
    clusters: Vec<Cluster>,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cluster and return its index.
    pub(crate) fn push(&mut self, cluster: Cluster) -> usize {
        self.clusters.push(cluster);
        self.clusters.len() - 1
    }

    pub(crate) fn cluster_mut(&mut self, index: usize) -> &mut Cluster {
        &mut self.clusters[index]
    }

    pub fn get(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn as_slice(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Index and distance of the closest center.
    pub fn nearest(&self, point: &[f64]) -> Option<(usize, f64)> {
        argmin(
            self.clusters
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.distance_to(point))),
        )
    }

    /// Like [`nearest`](Self::nearest), restricted to clusters that contain `point`.
    pub fn nearest_containing(&self, point: &[f64]) -> Option<(usize, f64)> {
        argmin(
            self.clusters
                .iter()
                .enumerate()
                .filter(|(_, c)| c.contains(point))
                .map(|(i, c)| (i, c.distance_to(point))),
        )
    }
}

impl<'a> IntoIterator for &'a ClusterStore {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
