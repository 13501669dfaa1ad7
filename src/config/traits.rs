use crate::error::GeneticsError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, self-validating block of `geneseq.toml`
pub trait ConfigSection: Serialize + DeserializeOwned + Default + Clone {
    /// Table name in the TOML file and first segment of environment overrides
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), GeneticsError>;
    /// Static description of every field; `current` is filled by `to_manifest`.
    fn fields(&self) -> Vec<FieldManifest>;

    fn to_manifest(&self) -> ConfigManifest {
        let current = serde_json::to_value(self).unwrap_or(Value::Null);
        let fields = self
            .fields()
            .into_iter()
            .map(|mut field| {
                field.current = current.get(&field.name).cloned().unwrap_or(Value::Null);
                field
            })
            .collect();

        ConfigManifest {
            section: Self::section_name().to_string(),
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: Value,
    pub current: Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

impl FieldManifest {
    pub fn new(name: &str, field_type: &str, default: Value, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            default,
            current: Value::Null,
            min: None,
            max: None,
            description: description.to_string(),
        }
    }

    pub fn bounded(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}
