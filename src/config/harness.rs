use super::traits::{ConfigSection, FieldManifest};
use crate::error::GeneticsError;
use crate::generation::TraversalShape;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Upper limit on values one sampling walk may produce
pub const MAX_SAMPLES: usize = 1_000_000;

/// Settings for recording and verifying decoded test vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub shape: Vec<usize>,
    pub min: f64,
    pub max: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            shape: TraversalShape::default().0,
            min: 0.0,
            max: 1.0,
        }
    }
}

impl HarnessConfig {
    pub fn traversal_shape(&self) -> TraversalShape {
        TraversalShape::new(self.shape.clone())
    }
}

impl ConfigSection for HarnessConfig {
    fn section_name() -> &'static str {
        "harness"
    }

    fn validate(&self) -> Result<(), GeneticsError> {
        if self.shape.is_empty() {
            return Err(GeneticsError::InvalidConfiguration(
                "Traversal shape needs at least one level".to_string()
            ));
        }
        let samples = self.traversal_shape().node_count();
        if samples > MAX_SAMPLES {
            return Err(GeneticsError::InvalidConfiguration(
                format!("Traversal shape {:?} exceeds {} samples", self.shape, MAX_SAMPLES)
            ));
        }
        if self.min > self.max {
            return Err(GeneticsError::InvalidConfiguration(
                format!("Range minimum {} exceeds maximum {}", self.min, self.max)
            ));
        }
        Ok(())
    }

    fn fields(&self) -> Vec<FieldManifest> {
        vec![
            FieldManifest::new(
                "shape",
                "list",
                json!([10, 10, 10]),
                "Fan-out per nesting level of the sampling walk",
            ),
            FieldManifest::new("min", "float", json!(0.0), "Lower bound of decoded values"),
            FieldManifest::new(
                "max",
                "float",
                json!(1.0),
                "Upper bound of decoded values, never reached",
            ),
        ]
    }
}
