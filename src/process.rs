use std::{
    fmt,
    io::{self, Write},
};

use anyhow::Context;

use crate::{
    cli::Config,
    fasta::Alignment,
    mutation::compute_rates,
    output::{open_output, write_csv},
};

/// Stage at which a run failed, used to pick the exit code
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Failure {
    ReadInput,
    MissingReference,
    NotAligned,
    WriteOutput,
}

impl Failure {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ReadInput => 1,
            Self::MissingReference => 2,
            Self::NotAligned => 3,
            Self::WriteOutput => 4,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::ReadInput => "Error reading FASTA",
            Self::MissingReference => "Reference sequence not found",
            Self::NotAligned => "FASTA appears not aligned",
            Self::WriteOutput => "Error writing output",
        };
        f.write_str(s)
    }
}

pub fn process_data(cfg: &Config) -> anyhow::Result<()> {
    process_with_status(cfg, &mut io::stdout().lock())
}

// `status` receives the completion message when results go to a file
fn process_with_status<W: Write>(cfg: &Config, status: &mut W) -> anyhow::Result<()> {
    let aln = Alignment::from_path(cfg.input()).context(Failure::ReadInput)?;
    if aln.is_empty() {
        warn!("No sequences found in input");
    } else {
        info!("Read in {} sequences", aln.len());
    }

    let reference = aln
        .get(cfg.reference_id())
        .ok_or_else(|| anyhow!("{}", cfg.reference_id()))
        .context(Failure::MissingReference)?;

    let seq_len = aln
        .aligned_length()
        .map_err(|e| {
            warn!("{}", e);
            anyhow!("sequences have different lengths")
        })
        .context(Failure::NotAligned)?
        .unwrap_or(0);
    debug!("Alignment length: {}", seq_len);

    let rates = compute_rates(&aln, reference, cfg.gap_handling())?;
    info!(
        "Computed mutation rates against {} ({})",
        reference.id(),
        cfg.gap_handling()
    );

    let mut wrt = open_output(cfg.output()).context(Failure::WriteOutput)?;
    write_csv(&mut wrt, &rates)
        .and_then(|_| wrt.flush().map_err(anyhow::Error::from))
        .context(Failure::WriteOutput)?;
    // Waits for any compression process to finish
    drop(wrt);

    if let Some(p) = cfg.output() {
        writeln!(status, "Wrote results to {}", p.display())?;
    }
    Ok(())
}
