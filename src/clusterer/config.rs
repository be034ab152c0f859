use serde::{Deserialize, Serialize};

use crate::clusterer::EcmError;

/// Construction-time parameters for [`Ecm`](crate::Ecm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcmConfig {
    /// Smaller values give more, tighter clusters; larger values give fewer, wider ones.
    pub distance_threshold: f64,
}

impl EcmConfig {
    pub fn new(distance_threshold: f64) -> Self {
        Self { distance_threshold }
    }

    pub fn validate(&self) -> Result<(), EcmError> {
        if !self.distance_threshold.is_finite() {
            return Err(EcmError::InvalidParameter {
                name: "distance_threshold",
                reason: format!("must be finite, got {}", self.distance_threshold),
            });
        }

        if self.distance_threshold <= 0.0 {
            return Err(EcmError::InvalidParameter {
                name: "distance_threshold",
                reason: format!("must be positive, got {}", self.distance_threshold),
            });
        }

        Ok(())
    }
}
