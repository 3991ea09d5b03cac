use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, command, value_parser};

use crate::log_utils::LogLevel;

pub(super) fn cli_model() -> Command {
    command!()
    .next_help_heading("Operation")
    .arg(
        Arg::new("reference")
            .short('r')
            .long("reference")
            .value_parser(value_parser!(String))
            .required(true)
            .value_name("ID")
            .help("Reference sequence ID (header without '>')"),
    )
    .arg(
        Arg::new("exclude_gaps")
            .long("exclude-gaps")
            .action(ArgAction::SetTrue)
            .help("Exclude positions where either reference or target has a gap ('-') from comparison"),
    )
    .next_help_heading("Input/Output")
    .arg(
        Arg::new("input")
            .short('i')
            .long("input")
            .value_parser(value_parser!(PathBuf))
            .required(true)
            .value_name("FASTA File")
            .help("Aligned FASTA file (may be compressed, '-' for stdin)"),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(value_parser!(PathBuf))
            .value_name("CSV File")
            .help("Output CSV file [default: stdout]"),
    )
    .arg(
        Arg::new("loglevel")
            .short('l')
            .long("loglevel")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("warn")
            .help("Set log level"),
    )
}
