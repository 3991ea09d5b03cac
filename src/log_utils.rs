use std::fmt;

use clap::{builder::PossibleValue, ArgMatches, ValueEnum};

/// Minimum level of messages that will be logged to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

const LEVELS: [(LogLevel, &str); 6] = [
    (LogLevel::None, "none"),
    (LogLevel::Error, "error"),
    (LogLevel::Warn, "warn"),
    (LogLevel::Info, "info"),
    (LogLevel::Debug, "debug"),
    (LogLevel::Trace, "trace"),
];

impl LogLevel {
    fn name(&self) -> &'static str {
        LEVELS[*self as usize].1
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// stderrlog verbosity (0 = errors only)
    pub fn verbosity(&self) -> usize {
        (*self as usize).saturating_sub(1)
    }
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::None,
            Self::Error,
            Self::Warn,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Initialize logging from command line arguments
pub fn init_log(m: &ArgMatches) -> anyhow::Result<()> {
    let level = m
        .get_one::<LogLevel>("loglevel")
        .copied()
        .unwrap_or(LogLevel::Warn);

    stderrlog::new()
        .quiet(level.is_none())
        .verbosity(level.verbosity())
        .init()
        .map_err(|e| anyhow!("Could not initialize logging: {}", e))?;
    debug!("Log level set to {}", level);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogLevel::Error.verbosity(), 0);
        assert_eq!(LogLevel::Warn.verbosity(), 1);
        assert_eq!(LogLevel::Trace.verbosity(), 4);
        assert!(LogLevel::None.is_none());
        assert!(!LogLevel::Error.is_none());
    }

    #[test]
    fn names_round_trip_through_clap() {
        for (lvl, name) in LEVELS {
            assert_eq!(lvl.to_string(), name);
            assert_eq!(LogLevel::from_str(&name.to_uppercase(), true).unwrap(), lvl);
        }
    }
}
