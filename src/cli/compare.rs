use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::verify::parity::{run_compare, CompareConfig, DEFAULT_TOLERANCE};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First profile file
    pub file_a: PathBuf,
    /// Second profile file
    pub file_b: PathBuf,
    /// Allowed max absolute deviation per position
    #[arg(short = 't', long, default_value_t = DEFAULT_TOLERANCE, allow_negative_numbers = true)]
    pub tolerance: f64,
    /// Show per-index values where mismatches exceed tolerance
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Also write the comparison as JSON to this path
    #[arg(long)]
    pub output_report: Option<PathBuf>,
}

/// Returns `true` when the two files match.
pub fn run(args: CompareArgs) -> Result<bool> {
    let cfg = CompareConfig {
        file_a: args.file_a,
        file_b: args.file_b,
        tolerance: args.tolerance,
        verbose: args.verbose,
        output_report: args.output_report,
    };
    let stdout = std::io::stdout();
    let comparison = run_compare(&cfg, &mut stdout.lock())?;
    Ok(comparison.passed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: CompareArgs,
    }

    #[test]
    fn test_negative_tolerance_accepted() {
        let cli = TestCli::try_parse_from(["prog", "a.txt", "b.txt", "-t", "-0.5"]).unwrap();
        assert_eq!(cli.args.tolerance, -0.5);
        assert_eq!(cli.args.file_b, PathBuf::from("b.txt"));
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["prog", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.args.tolerance, DEFAULT_TOLERANCE);
        assert!(!cli.args.verbose);
        assert!(cli.args.output_report.is_none());
    }
}
