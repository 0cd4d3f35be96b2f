//! Region publisher
//!
//! Walks the region table and makes exactly one upload attempt per region.
//! A failure in one region is recorded in the report and the walk moves on;
//! nothing here returns early.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::target::{ObjectAcl, REGIONS, UploadTarget};
use crate::template::Template;
use crate::traits::ObjectStore;

/// Result of the attempt for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionStatus {
    /// The object was written
    Published,
    /// Rendering or uploading failed; the region was skipped
    Failed { reason: String },
}

/// Outcome of one region
#[derive(Debug, Clone, Serialize)]
pub struct RegionOutcome {
    #[serde(flatten)]
    pub target: UploadTarget,
    #[serde(flatten)]
    pub status: RegionStatus,
}

impl RegionOutcome {
    pub fn is_published(&self) -> bool {
        self.status == RegionStatus::Published
    }
}

/// Per-region outcomes of a publish run, in region order
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishReport {
    pub outcomes: Vec<RegionOutcome>,
}

impl PublishReport {
    /// Number of regions that received the artifact
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_published()).count()
    }

    /// Number of regions that were skipped
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Number of regions attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every attempted region succeeded
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    /// Regions that were skipped, in order
    pub fn failed_regions(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_published())
    }
}

/// What gets uploaded to each region
#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    /// The same local file everywhere
    File(&'a Path),
    /// A per-region rendering written into `work_dir`
    Template {
        template: &'a Template,
        work_dir: &'a Path,
    },
}

/// Drives one upload attempt per region against an [`ObjectStore`]
pub struct RegionPublisher<'a> {
    store: &'a dyn ObjectStore,
    folder_name: &'a str,
    version_number: &'a str,
    regions: &'a [&'a str],
    acl: ObjectAcl,
}

impl<'a> RegionPublisher<'a> {
    /// Create a publisher over the full region table
    pub fn new(store: &'a dyn ObjectStore, folder_name: &'a str, version_number: &'a str) -> Self {
        Self {
            store,
            folder_name,
            version_number,
            regions: &REGIONS,
            acl: ObjectAcl::PublicRead,
        }
    }

    /// Restrict the walk to a different region list
    pub fn with_regions(mut self, regions: &'a [&'a str]) -> Self {
        self.regions = regions;
        self
    }

    /// Upload the same file to every region
    pub async fn publish_file(
        &self,
        path: &Path,
        file_name: &str,
        on_region: impl FnMut(&RegionOutcome),
    ) -> PublishReport {
        self.run(Source::File(path), file_name, on_region).await
    }

    /// Render the template for each region and upload the rendered copy
    ///
    /// The rendered file is written to `work_dir/file_name` and removed after
    /// each region, whatever the outcome.
    pub async fn publish_template(
        &self,
        template: &Template,
        file_name: &str,
        work_dir: &Path,
        on_region: impl FnMut(&RegionOutcome),
    ) -> PublishReport {
        let source = Source::Template { template, work_dir };
        self.run(source, file_name, on_region).await
    }

    async fn run(
        &self,
        source: Source<'_>,
        file_name: &str,
        mut on_region: impl FnMut(&RegionOutcome),
    ) -> PublishReport {
        tracing::info!(file_name, "File name: {file_name}");

        let mut report = PublishReport::default();
        for region in self.regions {
            tracing::info!(region, "Region: {region}");
            let target =
                UploadTarget::for_region(region, self.folder_name, self.version_number, file_name);

            let status = match self.attempt(source, file_name, &target).await {
                Ok(()) => RegionStatus::Published,
                Err(e) => {
                    tracing::info!(region, error = %e, "Error occurred for region {region}, skipping it");
                    RegionStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            let outcome = RegionOutcome { target, status };
            on_region(&outcome);
            report.outcomes.push(outcome);
        }

        tracing::info!(
            succeeded = report.succeeded(),
            total = report.total(),
            "Uploaded to {} of {} regions",
            report.succeeded(),
            report.total()
        );
        report
    }

    async fn attempt(&self, source: Source<'_>, file_name: &str, target: &UploadTarget) -> Result<()> {
        match source {
            Source::File(path) => self.store.upload_file(path, target, self.acl).await,
            Source::Template { template, work_dir } => {
                let rendered =
                    template.render_to(work_dir, file_name, &target.region, self.version_number)?;
                self.store.upload_file(rendered.path(), target, self.acl).await
            }
        }
    }
}
