use std::fmt;

use crate::fasta::{Alignment, FastaRecord};

pub const GAP: u8 = b'-';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GapHandling {
    /// Every aligned position is compared; a gap against a residue is a mutation
    Include,
    /// Positions with a gap in either sequence are not compared
    Exclude,
}

impl fmt::Display for GapHandling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Include => write!(f, "include gaps"),
            Self::Exclude => write!(f, "exclude gaps"),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MutationCounts {
    mutations: usize,
    comparable: usize,
}

impl MutationCounts {
    /// Count mismatches between two aligned sequences of equal length
    pub fn compare(reference: &[u8], target: &[u8], gaps: GapHandling) -> anyhow::Result<Self> {
        if reference.len() != target.len() {
            return Err(anyhow!(
                "Aligned sequences must be of equal length ({} vs {})",
                reference.len(),
                target.len()
            ));
        }
        let mut cts = Self::default();
        for (r, t) in reference.iter().zip(target) {
            if gaps == GapHandling::Exclude && (*r == GAP || *t == GAP) {
                continue;
            }
            cts.comparable += 1;
            if r != t {
                cts.mutations += 1;
            }
        }
        Ok(cts)
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn comparable(&self) -> usize {
        self.comparable
    }

    /// Fraction of comparable positions that differ, 0 if nothing was comparable
    pub fn rate(&self) -> f64 {
        if self.comparable > 0 {
            self.mutations as f64 / self.comparable as f64
        } else {
            0.0
        }
    }
}

pub struct MutationRecord<'a> {
    id: &'a str,
    counts: MutationCounts,
}

impl<'a> MutationRecord<'a> {
    pub fn new(id: &'a str, counts: MutationCounts) -> Self {
        Self { id, counts }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn counts(&self) -> &MutationCounts {
        &self.counts
    }
}

/// One record per sequence in `aln` (the reference included), in file order
pub fn compute_rates<'a>(
    aln: &'a Alignment,
    reference: &FastaRecord,
    gaps: GapHandling,
) -> anyhow::Result<Vec<MutationRecord<'a>>> {
    aln.iter()
        .map(|rec| {
            let counts = MutationCounts::compare(reference.seq(), rec.seq(), gaps)
                .map_err(|e| anyhow!("Sequence {}: {}", rec.id(), e))?;
            trace!(
                "{}: {} mutations in {} positions",
                rec.id(),
                counts.mutations,
                counts.comparable
            );
            Ok(MutationRecord::new(rec.id(), counts))
        })
        .collect()
}
