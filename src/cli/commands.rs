use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::models::{MarkerCollection, MarkerDescriptor, StyleMap};
use crate::processors::{
    CategoryLoader, FailurePolicy, LoadReport, RejectedRow, TracingEventLog,
};
use crate::readers::{DirectorySource, SheetClient, SheetSource};
use crate::utils::filename::generate_default_geojson_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::GeoJsonWriter;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load settings")?;
    tracing::debug!(
        spreadsheet = %config.spreadsheet_id,
        categories = config.categories.len(),
        "settings loaded"
    );

    match cli.command {
        Commands::Build {
            output_file,
            categories,
            source_dir,
            abort_on_error,
            validate_only,
            compact,
        } => {
            let categories = select_categories(&config, &categories);
            let policy = if abort_on_error {
                FailurePolicy::AbortRemaining
            } else {
                config.failure_policy
            };

            println!("Loading {} categories...", categories.len());

            let mut cluster = MarkerCollection::new();
            let report = load_markers(
                &config,
                source_dir.as_deref(),
                &categories,
                policy,
                cli.quiet,
                &mut cluster,
            )
            .await?;

            println!("\n{}", report.generate_summary());

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            if cluster.is_empty() {
                println!("No markers to write");
                return Ok(());
            }

            let output_file = output_file.unwrap_or_else(generate_default_geojson_filename);
            write_output(&cluster.into_markers(), &output_file, compact)?;
            println!("Processing complete!");
        }

        Commands::Validate {
            categories,
            source_dir,
        } => {
            let categories = select_categories(&config, &categories);
            println!("Validating {} categories...", categories.len());

            let mut cluster = MarkerCollection::new();
            let report = load_markers(
                &config,
                source_dir.as_deref(),
                &categories,
                FailurePolicy::ContinueOnError,
                cli.quiet,
                &mut cluster,
            )
            .await?;

            println!("\n{}", report.generate_summary());

            for outcome in &report.outcomes {
                for rejected in &outcome.rejected_rows {
                    println!("{}", rejected_row_line(&outcome.category, rejected));
                }
            }

            if report.total_rejected() == 0 && report.notices.is_empty() {
                println!("✅ All rows have usable coordinates");
            } else {
                println!(
                    "⚠️  Found {} rejected rows and {} failed categories",
                    report.total_rejected(),
                    report.failed_categories().len()
                );
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing GeoJSON file: {}", file.display());

            let writer = GeoJsonWriter::new();
            let file_info = writer
                .get_file_info(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("Sample Markers (showing up to {}):", sample);
                match writer.read_sample_markers(&file, sample) {
                    Ok(markers) => {
                        for (i, marker) in markers.iter().enumerate() {
                            println!(
                                "{}. {} at ({:.5}, {:.5}) [{}]",
                                i + 1,
                                marker.label,
                                marker.position.lat,
                                marker.position.lng,
                                marker.color
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample markers: {}", e),
                }
            }
        }

        Commands::Categories => {
            println!(
                "Map center: ({}, {}), zoom {}",
                config.map.center_lat, config.map.center_lng, config.map.zoom
            );
            println!("Categories (load order):");
            for (i, style) in config.categories.iter().enumerate() {
                println!("  {}. {} {}", i + 1, style.name, style.color);
            }
            println!("Default color: {}", config.default_color);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

/// Row numbers count data rows only; the header and blank lines are skipped.
fn rejected_row_line(category: &str, rejected: &RejectedRow) -> String {
    format!(
        "  {} data row {}: lat={} lng={}",
        category,
        rejected.row_number,
        rejected.latitude.as_deref().unwrap_or("<empty>"),
        rejected.longitude.as_deref().unwrap_or("<empty>")
    )
}

/// Requested categories in the order given, or every configured category.
fn select_categories(config: &AppConfig, requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        return config.category_names();
    }

    let styles = config.style_map();
    for category in requested {
        if !styles.contains(category) {
            tracing::warn!(
                sheet = %category,
                color = styles.default_color(),
                "category has no configured color"
            );
        }
    }
    requested.to_vec()
}

async fn load_markers(
    config: &AppConfig,
    source_dir: Option<&Path>,
    categories: &[String],
    policy: FailurePolicy,
    quiet: bool,
    cluster: &mut MarkerCollection,
) -> Result<LoadReport> {
    let styles = config.style_map();
    let progress = ProgressReporter::new_spinner("Loading categories...", quiet);

    let report = match source_dir {
        Some(dir) => {
            let source = DirectorySource::new(dir);
            load_from(&source, &styles, categories, policy, &progress, cluster).await
        }
        None => {
            let client = SheetClient::new(
                &config.base_url,
                &config.spreadsheet_id,
                config.timeout_secs,
            )
            .context("Failed to set up the spreadsheet client")?;
            load_from(&client, &styles, categories, policy, &progress, cluster).await
        }
    };

    progress.finish_with_message(&format!(
        "Loaded {} markers from {} categories",
        report.total_markers(),
        report.outcomes.len()
    ));

    Ok(report)
}

async fn load_from<S: SheetSource>(
    source: &S,
    styles: &StyleMap,
    categories: &[String],
    policy: FailurePolicy,
    progress: &ProgressReporter,
    cluster: &mut MarkerCollection,
) -> LoadReport {
    let log = TracingEventLog;
    CategoryLoader::new(source, styles, &log)
        .with_policy(policy)
        .with_progress(progress)
        .load_all(categories, cluster)
        .await
}

fn write_output(
    markers: &[MarkerDescriptor],
    output_file: &Path,
    compact: bool,
) -> Result<()> {
    println!("Writing {} markers to {}...", markers.len(), output_file.display());

    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let writer = GeoJsonWriter::new().with_pretty(!compact);
    writer
        .write_markers(markers, output_file)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    let file_info = writer.get_file_info(output_file)?;
    println!("\n{}", file_info.summary());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryStyle;

    #[test]
    fn test_select_categories_defaults_to_config_order() {
        let config = AppConfig::default();
        let selected = select_categories(&config, &[]);
        assert_eq!(selected.len(), 10);
        assert_eq!(selected.last().map(String::as_str), Some("販売"));
    }

    #[test]
    fn test_rejected_row_line_names_data_row() {
        let rejected = RejectedRow {
            row_number: 4,
            latitude: Some("abc".to_string()),
            longitude: None,
        };
        assert_eq!(
            rejected_row_line("和食", &rejected),
            "  和食 data row 4: lat=abc lng=<empty>"
        );
    }

    #[test]
    fn test_select_categories_keeps_requested_order() {
        let config = AppConfig {
            categories: vec![CategoryStyle::new("a", "red"), CategoryStyle::new("b", "blue")],
            ..AppConfig::default()
        };
        let requested = vec!["b".to_string(), "z".to_string()];
        assert_eq!(select_categories(&config, &requested), requested);
    }
}
