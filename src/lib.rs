pub mod config;
pub mod data;
pub mod error;
pub mod generation;

pub use error::{GeneticsError, Result};
pub use generation::{GeneticSequence, Genome, MutationModulus};
