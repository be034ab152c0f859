mod centroid;
mod config;
mod descriptor;
mod distance;
mod ecm;
mod error;
mod shared;
mod store;
mod types;


pub use config::EcmConfig;
pub use descriptor::Descriptor;
pub use distance::euclidean_distance;
pub use ecm::{ALGORITHM_NAME, Ecm};
pub use error::EcmError;
pub use shared::SharedEcm;
pub use store::ClusterStore;
pub use types::{Assignment, Cluster, EPSILON};
