#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

use std::process::ExitCode;

mod cli;
mod fasta;
mod log_utils;
mod mutation;
mod output;
mod process;

use process::Failure;

fn run() -> anyhow::Result<()> {
    let cfg = cli::handle_cli()?;
    process::process_data(&cfg)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.downcast_ref::<Failure>().map(|f| f.exit_code()).unwrap_or(1);
            eprintln!("{:#}", e);
            ExitCode::from(code)
        }
    }
}
