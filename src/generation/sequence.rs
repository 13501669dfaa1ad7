use crate::data::store::ByteStore;
use crate::error::{GeneticsError, Result};
use crate::generation::genome::Genome;
use crate::generation::operators::{self, MutationModulus};
use rand::Rng;

/// Largest `f64` strictly below 1.0.
const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// A circular genome read chromosome by chromosome through a cursor.
///
/// The cursor always lies in `[0, len)` and advances by `chromosome_length`
/// genes per read, wrapping at the end of the genome. `push`/`pop` save and
/// restore the cursor so that tree-shaped structures can be decoded against
/// the same genome.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticSequence {
    genes: Genome,
    chromosome_length: usize,
    cursor: usize,
    checkpoints: Vec<usize>,
}

impl GeneticSequence {
    /// Fill a fresh genome with `num_genes` uniform random bytes.
    pub fn random<R: Rng>(
        num_genes: usize,
        chromosome_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_bytes(operators::random_genome(num_genes, rng), chromosome_length)
    }

    /// Take `genes` as the genome verbatim.
    pub fn from_bytes(genes: Genome, chromosome_length: usize) -> Result<Self> {
        check_chromosome_length(chromosome_length)?;
        check_genes(&genes)?;

        let mut sequence = Self {
            genes,
            chromosome_length,
            cursor: 0,
            checkpoints: Vec::new(),
        };
        sequence.reset();
        Ok(sequence)
    }

    /// Build a sequence from whatever `store` holds.
    pub fn from_store<S: ByteStore + ?Sized>(
        store: &mut S,
        chromosome_length: usize,
    ) -> Result<Self> {
        let bytes = store.load()?;
        log::debug!("Loaded {} genes from store", bytes.len());
        Self::from_bytes(bytes, chromosome_length)
    }

    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always false for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of saved checkpoints, including the reset baseline.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Move the cursor to `index`, wrapped into the genome.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index % self.genes.len();
    }

    /// Cursor back to 0, checkpoint stack back to `[0]`.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.checkpoints.clear();
        self.checkpoints.push(self.cursor);
    }

    /// The `chromosome_length` genes starting at `start`, read circularly.
    pub fn get_chromosome(&self, start: usize) -> Vec<u8> {
        let len = self.genes.len();
        let start = start % len;
        (0..self.chromosome_length)
            .map(|offset| self.genes[(start + offset % len) % len])
            .collect()
    }

    /// Decode a chromosome as a little-endian base-256 fraction mapped onto `[min, max)`.
    ///
    /// `frac = sum(gene[i] * 256^i) / 256^len`, result `min + frac * (max - min)`.
    /// `min <= max` is the caller's responsibility; with `min > max` the value
    /// lies in `(max, min]` instead.
    pub fn decode(chromosome: &[u8], min: f64, max: f64) -> f64 {
        let value = min + fraction(chromosome) * (max - min);
        if min < max && max.is_finite() && value >= max {
            // Rounding in the interpolation can land on max for wide ranges
            return next_below(max);
        }
        value
    }

    /// Decode the chromosome at the cursor without moving it.
    pub fn peek(&self, min: f64, max: f64) -> f64 {
        Self::decode(&self.get_chromosome(self.cursor), min, max)
    }

    /// Decode the chromosome at the cursor, then advance the cursor by one chromosome.
    pub fn read_next(&mut self, min: f64, max: f64) -> f64 {
        if min > max {
            log::warn!("read_next called with min {} > max {}", min, max);
        }
        Self::decode(&self.read_next_chromosome(), min, max)
    }

    /// Raw genes at the cursor, advancing like `read_next`.
    pub fn read_next_chromosome(&mut self) -> Vec<u8> {
        let chromosome = self.get_chromosome(self.cursor);
        self.advance();
        chromosome
    }

    fn advance(&mut self) {
        let len = self.genes.len();
        self.cursor = (self.cursor + self.chromosome_length % len) % len;
    }

    /// Save the current cursor.
    pub fn push(&mut self) {
        self.checkpoints.push(self.cursor);
    }

    /// Restore the most recently saved cursor.
    pub fn pop(&mut self) -> Result<()> {
        self.cursor = self
            .checkpoints
            .pop()
            .ok_or(GeneticsError::EmptyCheckpointStack)?;
        Ok(())
    }

    /// Perturb each gene with probability `mutation_rate`, reducing modulo 255.
    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) -> usize {
        self.mutate_with(mutation_rate, MutationModulus::Legacy255, rng)
    }

    pub fn mutate_with<R: Rng>(
        &mut self,
        mutation_rate: f64,
        modulus: MutationModulus,
        rng: &mut R,
    ) -> usize {
        let selected = operators::mutate(&mut self.genes, mutation_rate, modulus, rng);
        log::debug!(
            "Mutated {}/{} genes (rate {}, {:?})",
            selected,
            self.genes.len(),
            mutation_rate,
            modulus
        );
        selected
    }

    /// Child shaped like `donor` (length, chromosome length, cursor, checkpoints)
    /// whose genes each come from `self` with probability 0.5.
    ///
    /// Neither parent is modified.
    pub fn breed<R: Rng>(&self, donor: &GeneticSequence, rng: &mut R) -> GeneticSequence {
        let mut child = donor.clone();
        child.genes = operators::crossover(&donor.genes, &self.genes, rng);
        log::debug!(
            "Bred child of {} genes from donor {} and parent {}",
            child.genes.len(),
            donor.genes.len(),
            self.genes.len()
        );
        child
    }

    /// Write the raw genome to `store`.
    pub fn save_to<S: ByteStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.save(&self.genes)?;
        log::debug!("Saved {} genes", self.genes.len());
        Ok(())
    }

    /// Replace the genome with the contents of `store` and reset the cursor.
    ///
    /// The chromosome length is kept as is.
    pub fn load_from<S: ByteStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        let bytes = store.load()?;
        check_genes(&bytes)?;
        if bytes.len() % self.chromosome_length != 0 {
            log::warn!(
                "Loaded genome of {} genes is not a multiple of chromosome length {}",
                bytes.len(),
                self.chromosome_length
            );
        }
        self.genes = bytes;
        self.reset();
        log::debug!("Loaded {} genes", self.genes.len());
        Ok(())
    }
}

fn check_chromosome_length(chromosome_length: usize) -> Result<()> {
    if chromosome_length == 0 {
        return Err(GeneticsError::InvalidConfiguration(
            "Chromosome length must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn check_genes(genes: &[u8]) -> Result<()> {
    if genes.is_empty() {
        return Err(GeneticsError::InvalidConfiguration(
            "Genome must contain at least one gene".to_string(),
        ));
    }
    Ok(())
}

/// `sum(gene[i] * 256^i) / 256^len`, accumulated from the least significant
/// gene so long chromosomes never overflow. Exact for up to six genes.
fn fraction(chromosome: &[u8]) -> f64 {
    let frac = chromosome
        .iter()
        .fold(0.0, |acc, &gene| (acc + gene as f64) / 256.0);
    frac.min(LARGEST_BELOW_ONE)
}

fn next_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}
