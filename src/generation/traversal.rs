use crate::error::{GeneticsError, Result};
use crate::generation::sequence::GeneticSequence;
use serde::{Deserialize, Serialize};

const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Branching factors of a decision tree decoded from one genome.
///
/// `[10, 10, 10]` means ten root reads, each with ten children, each of those
/// with ten leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalShape(pub Vec<usize>);

impl TraversalShape {
    pub fn new(levels: Vec<usize>) -> Self {
        Self(levels)
    }

    pub fn levels(&self) -> &[usize] {
        &self.0
    }

    /// Number of values a full walk produces, saturating at `usize::MAX`.
    pub fn node_count(&self) -> usize {
        let mut total: usize = 0;
        let mut width: usize = 1;
        for &fanout in &self.0 {
            width = width.saturating_mul(fanout);
            total = total.saturating_add(width);
        }
        total
    }
}

impl Default for TraversalShape {
    fn default() -> Self {
        Self(vec![10, 10, 10])
    }
}

/// Walk `shape` over the genome and collect every decoded value in pre-order.
///
/// Each node saves the cursor, reads one value, walks its children and then
/// restores the cursor, so siblings read from the same position their parent
/// started at plus one chromosome per nesting level. The cursor is restored
/// when the walk finishes.
pub fn nested_sample(
    sequence: &mut GeneticSequence,
    shape: &TraversalShape,
    min: f64,
    max: f64,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(shape.node_count().min(PREALLOCATE_LIMIT));
    let depth_before = sequence.checkpoint_depth();
    let cursor_before = sequence.cursor();

    walk(sequence, shape.levels(), min, max, &mut values)?;

    if sequence.checkpoint_depth() != depth_before || sequence.cursor() != cursor_before {
        return Err(GeneticsError::InvalidConfiguration(
            "Traversal left checkpoint stack unbalanced".to_string(),
        ));
    }

    log::debug!("Sampled {} values with shape {:?}", values.len(), shape.levels());
    Ok(values)
}

fn walk(
    sequence: &mut GeneticSequence,
    levels: &[usize],
    min: f64,
    max: f64,
    values: &mut Vec<f64>,
) -> Result<()> {
    let Some((&fanout, rest)) = levels.split_first() else {
        return Ok(());
    };

    for _ in 0..fanout {
        sequence.push();
        values.push(sequence.read_next(min, max));
        walk(sequence, rest, min, max, values)?;
        sequence.pop()?;
    }
    Ok(())
}
