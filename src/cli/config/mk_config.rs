use std::path::PathBuf;

use clap::ArgMatches;

use crate::mutation::GapHandling;

use super::Config;

impl Config {
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let input = m
            .try_get_one::<PathBuf>("input")?
            .ok_or_else(|| anyhow!("Missing input file"))?;
        let input = if input.as_os_str() == "-" {
            None
        } else {
            Some(input.clone())
        };

        let output = m.try_get_one::<PathBuf>("output")?.cloned();

        let reference_id = m
            .try_get_one::<String>("reference")?
            .map(|s| s.trim())
            .ok_or_else(|| anyhow!("Missing reference sequence ID"))?;

        let gap_handling = if m.get_flag("exclude_gaps") {
            GapHandling::Exclude
        } else {
            GapHandling::Include
        };

        match input.as_ref() {
            Some(p) => debug!("Input file: {}", p.display()),
            None => debug!("Input from stdin"),
        }
        debug!("Reference: {}, {}", reference_id, gap_handling);

        Ok(Config::new(input, output, reference_id, gap_handling))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cli::cli_model::cli_model;

    fn config(args: &[&str]) -> Config {
        let m = cli_model()
            .try_get_matches_from(std::iter::once("mutrate").chain(args.iter().copied()))
            .unwrap();
        Config::from_matches(&m).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = config(&["-i", "aln.fa", "-r", "ref1"]);
        assert_eq!(cfg.input(), Some(std::path::Path::new("aln.fa")));
        assert!(cfg.output().is_none());
        assert_eq!(cfg.reference_id(), "ref1");
        assert_eq!(cfg.gap_handling(), GapHandling::Include);
    }

    #[test]
    fn all_options() {
        let cfg = config(&[
            "--input", "-", "--reference", "ref 1", "--exclude-gaps", "-o", "out.csv", "-l", "DEBUG",
        ]);
        assert!(cfg.input().is_none());
        assert_eq!(cfg.output(), Some(std::path::Path::new("out.csv")));
        assert_eq!(cfg.reference_id(), "ref 1");
        assert_eq!(cfg.gap_handling(), GapHandling::Exclude);
    }

    #[test]
    fn reference_id_trimmed() {
        let cfg = config(&["-i", "aln.fa", "-r", "  ref1 \t"]);
        assert_eq!(cfg.reference_id(), "ref1");
    }

    #[test]
    fn required_args() {
        assert!(cli_model().try_get_matches_from(["mutrate", "-i", "x.fa"]).is_err());
        assert!(cli_model().try_get_matches_from(["mutrate", "-r", "ref"]).is_err());
        assert!(cli_model()
            .try_get_matches_from(["mutrate", "-i", "x.fa", "-r", "ref", "-l", "loud"])
            .is_err());
    }
}
