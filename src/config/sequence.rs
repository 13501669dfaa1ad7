use super::traits::{ConfigSection, FieldManifest};
use crate::data::store::ByteStore;
use crate::error::GeneticsError;
use crate::generation::{GeneticSequence, MutationModulus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub num_genes: usize,
    pub chromosome_length: usize,
    pub mutation_rate: f64,
    pub mutation_modulus: MutationModulus,
    pub seed: Option<u64>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            num_genes: 4096,
            chromosome_length: 4,
            mutation_rate: 0.1,
            mutation_modulus: MutationModulus::Legacy255,
            seed: None,
        }
    }
}

impl SequenceConfig {
    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn build_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn random_sequence<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<GeneticSequence, GeneticsError> {
        GeneticSequence::random(self.num_genes, self.chromosome_length, rng)
    }

    /// Load a genome from `store`. Lengths that disagree with `num_genes` are
    /// accepted with a warning.
    pub fn load_sequence<S: ByteStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<GeneticSequence, GeneticsError> {
        let sequence = GeneticSequence::from_store(store, self.chromosome_length)?;
        if sequence.len() != self.num_genes {
            log::warn!(
                "Loaded genome has {} genes, configuration expects {}",
                sequence.len(),
                self.num_genes
            );
        }
        Ok(sequence)
    }

    /// Mutate with the configured rate and modulus.
    pub fn mutate<R: Rng>(&self, sequence: &mut GeneticSequence, rng: &mut R) -> usize {
        sequence.mutate_with(self.mutation_rate, self.mutation_modulus, rng)
    }
}

impl ConfigSection for SequenceConfig {
    fn section_name() -> &'static str {
        "sequence"
    }

    fn validate(&self) -> Result<(), GeneticsError> {
        if self.num_genes == 0 {
            return Err(GeneticsError::InvalidConfiguration(
                "Genome must have at least one gene".to_string()
            ));
        }
        if self.chromosome_length == 0 {
            return Err(GeneticsError::InvalidConfiguration(
                "Chromosome length must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticsError::InvalidConfiguration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }

    fn fields(&self) -> Vec<FieldManifest> {
        vec![
            FieldManifest::new(
                "num_genes",
                "integer",
                json!(4096),
                "Genome length in bytes for freshly generated sequences",
            )
            .bounded(Some(1.0), None),
            FieldManifest::new(
                "chromosome_length",
                "integer",
                json!(4),
                "Genes decoded into one value",
            )
            .bounded(Some(1.0), None),
            FieldManifest::new(
                "mutation_rate",
                "float",
                json!(0.1),
                "Per-gene probability of perturbation",
            )
            .bounded(Some(0.0), Some(1.0)),
            FieldManifest::new(
                "mutation_modulus",
                "enum",
                json!("Legacy255"),
                "Legacy255 reduces mutated genes mod 255, Byte256 wraps",
            ),
            FieldManifest::new(
                "seed",
                "integer",
                Value::Null,
                "Random seed; unset draws from entropy",
            )
            .bounded(Some(0.0), None),
        ]
    }
}
