/// Byte-buffer genome
///
/// A genome is a flat run of bytes read as a circular tape. Each byte is one
/// gene; `chromosome_length` consecutive genes decode into one value through
/// `GeneticSequence::decode`.
///
/// # Why bytes?
///
/// - **Any buffer is valid**: every byte pattern decodes, so mutation and
///   crossover can never produce an unreadable individual
/// - **Persistence is trivial**: the genome is saved and loaded as a raw dump
/// - **Wraparound**: reads past the end continue from index 0, so the genome
///   length does not have to be a multiple of the chromosome length
///
/// # Example
///
/// ```
/// use geneseq::generation::GeneticSequence;
///
/// let seq = GeneticSequence::from_bytes(vec![10, 20, 30, 40, 50], 3).unwrap();
/// assert_eq!(seq.get_chromosome(4), vec![50, 10, 20]);
/// ```
pub type Genome = Vec<u8>;
