use crate::generation::genome::Genome;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a mutated gene is reduced after the random delta is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MutationModulus {
    /// `(gene + delta) % 255`. A mutated gene can never become 255.
    #[default]
    Legacy255,
    /// `(gene + delta) % 256`, plain wrapping byte addition.
    Byte256,
}

impl MutationModulus {
    pub fn apply(self, gene: u8, delta: u8) -> u8 {
        let sum = gene as u16 + delta as u16;
        match self {
            MutationModulus::Legacy255 => (sum % 255) as u8,
            MutationModulus::Byte256 => (sum % 256) as u8,
        }
    }
}

/// Generate random genome
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

/// Mutation: each gene is perturbed independently with probability `mutation_rate`.
///
/// Returns how many positions were selected for perturbation. A selected gene
/// may keep its value when the delta reduces to zero under `modulus`.
pub fn mutate<R: Rng>(
    genome: &mut [u8],
    mutation_rate: f64,
    modulus: MutationModulus,
    rng: &mut R,
) -> usize {
    let mut selected = 0;
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = modulus.apply(*gene, rng.gen::<u8>());
            selected += 1;
        }
    }
    selected
}

/// Uniform crossover onto a copy of `base`.
///
/// Every position of the child starts as the `base` gene and is overwritten
/// with probability 0.5 by `overrides[i % overrides.len()]`. The child always
/// has the length of `base`.
pub fn crossover<R: Rng>(base: &[u8], overrides: &[u8], rng: &mut R) -> Genome {
    let mut child = base.to_vec();
    if overrides.is_empty() {
        return child;
    }

    for (i, gene) in child.iter_mut().enumerate() {
        if rng.gen::<f64>() < 0.5 {
            *gene = overrides[i % overrides.len()];
        }
    }

    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_legacy_modulus() {
        assert_eq!(MutationModulus::Legacy255.apply(200, 100), 45);
        assert_eq!(MutationModulus::Legacy255.apply(255, 0), 0);
        assert_eq!(MutationModulus::Legacy255.apply(0, 255), 0);
        assert_eq!(MutationModulus::Legacy255.apply(255, 255), 0);
        assert_eq!(MutationModulus::Legacy255.apply(254, 0), 254);
    }

    #[test]
    fn test_byte_modulus() {
        assert_eq!(MutationModulus::Byte256.apply(200, 100), 44);
        assert_eq!(MutationModulus::Byte256.apply(255, 0), 255);
        assert_eq!(MutationModulus::Byte256.apply(255, 1), 0);
    }

    #[test]
    fn test_random_genome_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_genome(4096, &mut rng).len(), 4096);
        assert!(random_genome(0, &mut rng).is_empty());
    }

    #[test]
    fn test_mutate_zero_rate_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = random_genome(256, &mut rng);
        let mut genome = original.clone();

        let selected = mutate(&mut genome, 0.0, MutationModulus::Legacy255, &mut rng);

        assert_eq!(selected, 0);
        assert_eq!(genome, original);
    }

    #[test]
    fn test_mutate_full_rate_selects_everything() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut genome = vec![0u8; 128];

        let selected = mutate(&mut genome, 1.0, MutationModulus::Legacy255, &mut rng);

        assert_eq!(selected, 128);
        // Legacy reduction never produces 255
        assert!(genome.iter().all(|&g| g < 255));
    }

    #[test]
    fn test_crossover_takes_base_length() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = vec![1u8; 10];
        let overrides = vec![2u8; 3];

        let child = crossover(&base, &overrides, &mut rng);

        assert_eq!(child.len(), 10);
        assert!(child.iter().all(|&g| g == 1 || g == 2));
    }

    #[test]
    fn test_crossover_wraps_short_overrides() {
        let mut rng = StdRng::seed_from_u64(4);
        let base = vec![0u8; 64];
        let overrides = vec![10u8, 20, 30];

        let child = crossover(&base, &overrides, &mut rng);

        for (i, &gene) in child.iter().enumerate() {
            assert!(gene == 0 || gene == overrides[i % 3]);
        }
    }
}
