use super::{
    harness::HarnessConfig,
    sequence::SequenceConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::GeneticsError;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `GENESEQ_SEQUENCE__SEED=7`
pub const ENV_PREFIX: &str = "GENESEQ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sequence: SequenceConfig,
    pub harness: HarnessConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GeneticsError> {
        self.sequence.validate()?;
        self.harness.validate()?;
        Ok(())
    }

    /// One manifest per section, current values included.
    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![self.sequence.to_manifest(), self.harness.to_manifest()]
    }
}

#[derive(Debug, Default)]
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file, apply `GENESEQ_*` environment overrides on top and validate.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GeneticsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.as_ref().display());
        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GeneticsError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// Apply `f` and keep the result only if it validates.
    pub fn update<F>(&mut self, f: F) -> Result<(), GeneticsError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MutationModulus;

    fn scratch_file(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("geneseq-config-{}-{}.toml", tag, std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("roundtrip");
        let mut manager = ConfigManager::new();
        manager
            .update(|c| {
                c.sequence.chromosome_length = 8;
                c.sequence.seed = Some(99);
                c.sequence.mutation_modulus = MutationModulus::Byte256;
                c.harness.shape = vec![4, 4];
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let mut loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.get(), manager.get());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = scratch_file("partial");
        std::fs::write(&path, "[sequence]\nnum_genes = 16\n").unwrap();

        let mut manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.sequence.num_genes, 16);
        assert_eq!(config.sequence.chromosome_length, 4);
        assert_eq!(config.harness, HarnessConfig::default());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = scratch_file("invalid");
        std::fs::write(&path, "[sequence]\nchromosome_length = 0\n").unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_from_file(&path);
        assert!(matches!(result, Err(GeneticsError::InvalidConfiguration(_))));
        assert_eq!(manager.get(), AppConfig::default());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_rejected_update_keeps_previous() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| c.sequence.mutation_rate = -0.5);
        assert!(result.is_err());
        assert_eq!(manager.get().sequence.mutation_rate, 0.1);
    }

    #[test]
    fn test_manifests_cover_every_section() {
        let mut config = AppConfig::default();
        config.sequence.num_genes = 64;

        let manifests = config.manifests();
        let sections: Vec<&str> = manifests.iter().map(|m| m.section.as_str()).collect();
        assert_eq!(sections, vec![SequenceConfig::section_name(), HarnessConfig::section_name()]);

        let num_genes = &manifests[0].fields[0];
        assert_eq!(num_genes.name, "num_genes");
        assert_eq!(num_genes.current, serde_json::json!(64));
        assert_eq!(num_genes.default, serde_json::json!(4096));
    }
}
