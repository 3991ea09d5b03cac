use std::path::{Path, PathBuf};

use crate::mutation::GapHandling;

mod mk_config;

pub struct Config {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    reference_id: Box<str>,
    gap_handling: GapHandling,
}

impl Config {
    pub fn new(
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        reference_id: &str,
        gap_handling: GapHandling,
    ) -> Self {
        Self {
            input,
            output,
            reference_id: Box::from(reference_id),
            gap_handling,
        }
    }

    /// Input FASTA path; `None` reads from stdin
    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    /// Output CSV path; `None` writes to stdout
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    pub fn gap_handling(&self) -> GapHandling {
        self.gap_handling
    }
}
