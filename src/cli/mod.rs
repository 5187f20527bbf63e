mod compare;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

pub use compare::CompareArgs;

#[derive(Parser, Debug)]
#[command(name = "capr-compare-rs")]
#[command(version = crate::VERSION, about = "Compare LinearCapR profile outputs")]
pub struct Cli {
    #[command(flatten)]
    args: CompareArgs,
}

/// Parse the command line and run the comparison.
///
/// Exit code is 0 when both files match, 1 on any discrepancy.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    if compare::run(cli.args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
