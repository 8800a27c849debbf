//! lotclean CLI - normalize addition names and split multi-lot rows
//!
//! ```bash
//! lotclean -i auction.csv -o auction-clean.csv
//! ```
//!
//! The input is read as Latin-1 and must have `Addition` and `Lot` columns.
//! Progress is logged to stderr (`RUST_LOG` controls the level). A failing
//! run always prints one `Error:` line to stderr and exits with status 1.

use clap::Parser;
use lotclean::{clean_file, logs, CleanOptions, CleanResult, CleanStats};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lotclean")]
#[command(about = "Normalize addition names and split multi-lot records.", long_about = None)]
#[command(after_help = lotclean::operations_description())]
struct Cli {
    /// Input CSV filename
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV filename
    #[arg(short, long)]
    output: PathBuf,
}

fn run(cli: &Cli) -> CleanResult<CleanStats> {
    clean_file(&cli.input, &cli.output, &CleanOptions::default())
}

fn main() {
    let cli = Cli::parse();
    logs::init_logging();

    match run(&cli) {
        Ok(stats) => {
            logs::log_success(format!(
                "Done: {} rows in, {} rows out",
                stats.input_rows, stats.output_rows
            ));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_both_paths_required() {
        assert!(Cli::try_parse_from(["lotclean", "-i", "in.csv"]).is_err());
        assert!(Cli::try_parse_from(["lotclean", "-o", "out.csv"]).is_err());

        let cli = Cli::try_parse_from(["lotclean", "--input", "in.csv", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_run_missing_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            input: dir.path().join("missing.csv"),
            output: dir.path().join("out.csv"),
        };

        let err = run(&cli).unwrap_err();
        assert!(matches!(err, lotclean::PipelineError::Csv(lotclean::CsvError::Io(_))));
        assert!(format!("Error: {}", err).starts_with("Error: "));
        assert!(!cli.output.exists());
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            input: dir.path().join("in.csv"),
            output: dir.path().join("out.csv"),
        };
        std::fs::write(&cli.input, r#"Addition,Lot
Fifth,"1,2"
"#).unwrap();

        let stats = run(&cli).unwrap();
        assert_eq!((stats.input_rows, stats.output_rows), (1, 2));
        assert!(cli.output.exists());
    }
}
