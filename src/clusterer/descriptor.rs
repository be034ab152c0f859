use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Identity and parameters of an engine, for naming and deduplicating experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub parameters: BTreeMap<String, f64>,
}

impl Descriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// `name=value` pairs in key order, e.g. `["distance_threshold=5"]`.
    pub fn parameter_parts(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect()
    }

    /// Canonical single-line form: `ECM;distance_threshold=5`.
    pub fn canonical(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.parameter_parts());
        parts.join(";")
    }

    /// Hex SHA-256 of [`canonical`](Self::canonical).
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical().as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        let d = Descriptor::new("ECM").with_parameter("distance_threshold", 5.0);
        assert_eq!(d.canonical(), "ECM;distance_threshold=5");
        assert_eq!(d.parameter_parts(), vec!["distance_threshold=5"]);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = Descriptor::new("ECM").with_parameter("distance_threshold", 0.5);
        let b = Descriptor::new("ECM").with_parameter("distance_threshold", 0.5);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_hashes_canonical_form() {
        let d = Descriptor::new("ECM").with_parameter("distance_threshold", 5.0);
        assert_eq!(
            d.fingerprint(),
            "f846520f88cbb1ddb087ecf6c92f3f8fbaee9dbad9e15e88386910cd1078d58b"
        );
    }

    #[test]
    fn test_fingerprint_tracks_parameters() {
        let a = Descriptor::new("ECM").with_parameter("distance_threshold", 1.0);
        let b = Descriptor::new("ECM").with_parameter("distance_threshold", 2.0);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_json_shape() {
        let d = Descriptor::new("ECM").with_parameter("distance_threshold", 10.0);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["name"], "ECM");
        assert_eq!(json["parameters"]["distance_threshold"], 10.0);
    }
}
