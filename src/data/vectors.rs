use crate::error::{GeneticsError, Result};
use std::fmt::Write as _;
use std::path::Path;

/// One position where recorded and freshly decoded values disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub expected: Option<f64>,
    pub recorded: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationReport {
    pub matched: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Write one value per line using shortest round-trip formatting.
pub fn write_vectors<P: AsRef<Path>>(path: P, values: &[f64]) -> Result<()> {
    let mut contents = String::with_capacity(values.len() * 24);
    for value in values {
        // Writing to a String cannot fail
        let _ = writeln!(contents, "{}", value);
    }
    std::fs::write(path.as_ref(), contents)?;
    log::debug!("Recorded {} values to {}", values.len(), path.as_ref().display());
    Ok(())
}

pub fn read_vectors<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let contents = std::fs::read_to_string(path)?;
    parse_vectors(&contents)
}

/// Parse one float per line; blank lines are skipped.
pub fn parse_vectors(contents: &str) -> Result<Vec<f64>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim().parse::<f64>().map_err(|_| GeneticsError::VectorParse {
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

/// Compare bit-for-bit. Values present on only one side count as mismatches.
pub fn verify(expected: &[f64], recorded: &[f64]) -> VerificationReport {
    let mut report = VerificationReport::default();

    for index in 0..expected.len().max(recorded.len()) {
        let e = expected.get(index).copied();
        let r = recorded.get(index).copied();
        match (e, r) {
            (Some(a), Some(b)) if a.to_bits() == b.to_bits() => report.matched += 1,
            _ => report.mismatches.push(Mismatch {
                index,
                expected: e,
                recorded: r,
            }),
        }
    }

    if !report.is_clean() {
        log::warn!(
            "{} of {} values disagree with the recording",
            report.mismatches.len(),
            report.matched + report.mismatches.len()
        );
    }
    report
}
