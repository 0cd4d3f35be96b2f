//! publish command - Upload the release artifact to every region
//!
//! Loads the run parameters from the environment, builds the S3 client and
//! walks the region table. Region failures are reported but only change the
//! exit code under `--require-all`.

use std::path::PathBuf;

use clap::Args;
use rf_core::{
    Artifact, ArtifactKind, DryRunStore, ObjectStore, PublishConfig, PublishOptions,
    PublishReport, REGIONS, RegionOutcome, RegionStatus,
};
use rf_s3::S3Client;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Publish the configured artifact
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Render and walk every region without uploading anything
    #[arg(long)]
    pub dry_run: bool,

    /// Directory for rendered templates (default: a temporary directory)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Exit with a non-zero code unless every region was published
    #[arg(long)]
    pub require_all: bool,
}

#[derive(Debug, Serialize)]
struct PublishOutput<'a> {
    status: &'static str,
    dry_run: bool,
    file_name: &'a str,
    mode: ArtifactKind,
    folder: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
    succeeded: usize,
    failed: usize,
    total: usize,
    published_at: jiff::Timestamp,
    regions: &'a [RegionOutcome],
}

/// Execute the publish command
pub async fn execute(args: PublishArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    load_and_run(&args, |name| std::env::var(name).ok(), None, &formatter).await
}

/// Load the configuration through `lookup`, then run the workflow
///
/// Nothing reaches storage when the configuration is incomplete.
async fn load_and_run<F>(
    args: &PublishArgs,
    lookup: F,
    store: Option<&dyn ObjectStore>,
    formatter: &Formatter,
) -> ExitCode
where
    F: Fn(&str) -> Option<String>,
{
    let config = match PublishConfig::from_lookup(lookup) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("{e}. Exiting"));
            return ExitCode::from_error(&e);
        }
    };

    run(args, &config, store, formatter).await
}

/// Run the workflow for an already loaded configuration
///
/// `store` stands in for the S3 client when given; otherwise dry runs use
/// [`DryRunStore`] and real runs build an [`S3Client`].
async fn run(
    args: &PublishArgs,
    config: &PublishConfig,
    store: Option<&dyn ObjectStore>,
    formatter: &Formatter,
) -> ExitCode {
    let artifact = match Artifact::from_path(&config.path_to_file) {
        Ok(a) => a,
        Err(e) => {
            formatter.error(&format!("{e}. Exiting"));
            return ExitCode::from_error(&e);
        }
    };

    let s3;
    let store: &dyn ObjectStore = match store {
        Some(store) => store,
        None if args.dry_run => &DryRunStore,
        None => {
            s3 = match S3Client::new(&config.credentials, config.endpoint_url.as_deref()).await {
                Ok(c) => c,
                Err(e) => {
                    formatter.error(&format!("Failed to create S3 client: {e}"));
                    return ExitCode::from_error(&e);
                }
            };
            &s3
        }
    };

    if !formatter.is_json() {
        formatter.println(&format!("File name: {}", artifact.file_name));
    }

    let options = PublishOptions {
        work_dir: args.work_dir.clone(),
    };
    let progress = ProgressBar::regions(formatter.config(), REGIONS.len() as u64);
    let report = rf_core::publish(config, store, &options, |outcome| {
        report_region(outcome, &progress, formatter);
    })
    .await;
    progress.finish_and_clear();

    let report = match report {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&format!(
                "Some error occurred while trying to upload file: {e}"
            ));
            return ExitCode::from_error(&e);
        }
    };

    print_summary(args, config, &artifact, &report, formatter);

    if args.require_all && !report.is_complete() {
        ExitCode::IncompletePublish
    } else {
        ExitCode::Success
    }
}

/// Per-region lines: above the progress bar when one is drawn
fn report_region(outcome: &RegionOutcome, progress: &ProgressBar, formatter: &Formatter) {
    let region = outcome.target.region.as_str();
    progress.tick_region(region);

    let failure = match &outcome.status {
        RegionStatus::Published => None,
        RegionStatus::Failed { reason } => Some(format!(
            "Error occurred for region {region}: {reason}. Skipping this region"
        )),
    };

    if progress.is_visible() {
        progress.println(&format!("Region: {region}"));
        if let Some(message) = failure {
            progress.println(&message);
        }
        return;
    }

    if formatter.is_json() {
        return;
    }
    formatter.println(&format!("Region: {region}"));
    if let Some(message) = failure {
        formatter.warning(&message);
    }
}

fn print_summary(
    args: &PublishArgs,
    config: &PublishConfig,
    artifact: &Artifact,
    report: &PublishReport,
    formatter: &Formatter,
) {
    let size_human = std::fs::metadata(&artifact.path)
        .ok()
        .map(|m| humansize::format_size(m.len(), humansize::BINARY));

    if formatter.is_json() {
        let output = PublishOutput {
            status: if report.is_complete() { "complete" } else { "partial" },
            dry_run: args.dry_run,
            file_name: &artifact.file_name,
            mode: artifact.kind,
            folder: &config.folder_name,
            version: &config.version_number,
            size_human,
            succeeded: report.succeeded(),
            failed: report.failed(),
            total: report.total(),
            published_at: jiff::Timestamp::now(),
            regions: &report.outcomes,
        };
        formatter.json(&output);
        return;
    }

    let verb = if args.dry_run { "Would upload" } else { "Uploaded" };
    let summary = format!(
        "{verb} {} ({}) to {} of {} regions",
        artifact.file_name,
        size_human.unwrap_or_default(),
        report.succeeded(),
        report.total()
    );

    if report.is_complete() {
        formatter.success(&summary);
    } else {
        let skipped: Vec<&str> = report
            .failed_regions()
            .map(|o| o.target.region.as_str())
            .collect();
        formatter.warning(&format!("{summary}; skipped: {}", skipped.join(", ")));
    }
}
