pub mod genome;
pub mod operators;
pub mod sequence;
pub mod traversal;

pub use genome::Genome;
pub use operators::MutationModulus;
pub use sequence::GeneticSequence;
pub use traversal::{nested_sample, TraversalShape};
