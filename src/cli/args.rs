use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-markers")]
#[command(about = "Build clustered map markers from published spreadsheet sheets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every category sheet and write the markers as GeoJSON
    Build {
        #[arg(
            short,
            long,
            help = "Output GeoJSON file path [default: output/markers-{YYMMDD}.geojson]"
        )]
        output_file: Option<PathBuf>,

        #[arg(
            short,
            long = "category",
            help = "Only load this category (repeatable)"
        )]
        categories: Vec<String>,

        #[arg(long, help = "Read {sheet}.csv files from this directory instead of HTTP")]
        source_dir: Option<PathBuf>,

        #[arg(long, help = "Stop loading after the first failed category")]
        abort_on_error: bool,

        #[arg(long, default_value = "false")]
        validate_only: bool,

        #[arg(long, help = "Write compact JSON")]
        compact: bool,
    },

    /// Load the sheets and list rows with unusable coordinates
    Validate {
        #[arg(short, long = "category", help = "Only check this category (repeatable)")]
        categories: Vec<String>,

        #[arg(long, help = "Read {sheet}.csv files from this directory instead of HTTP")]
        source_dir: Option<PathBuf>,
    },

    /// Display information about a GeoJSON marker file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },

    /// List configured categories and their marker colors
    Categories,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_arguments() {
        let cli = Cli::try_parse_from([
            "sheet-markers",
            "build",
            "-c",
            "和食",
            "--category",
            "中華",
            "--abort-on-error",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Build {
                categories,
                abort_on_error,
                output_file,
                ..
            } => {
                assert_eq!(categories, vec!["和食", "中華"]);
                assert!(abort_on_error);
                assert!(output_file.is_none());
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_info_defaults() {
        let cli = Cli::try_parse_from(["sheet-markers", "info", "-f", "markers.geojson"]).unwrap();
        match cli.command {
            Commands::Info { file, sample } => {
                assert_eq!(file, PathBuf::from("markers.geojson"));
                assert_eq!(sample, 10);
            }
            _ => panic!("expected info command"),
        }
    }
}
