//! Workflow dispatch
//!
//! Decides whether the artifact is a template or a plain file and runs the
//! matching publisher mode. All fatal checks happen here, before the first
//! upload.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PublishConfig;
use crate::error::{Error, Result};
use crate::publisher::{PublishReport, RegionOutcome, RegionPublisher};
use crate::template::{TEMPLATE_FILE_NAME, Template};
use crate::traits::ObjectStore;

/// How an artifact is published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Uploaded unchanged to every region
    Direct,
    /// Rendered per region before upload
    Template,
}

impl ArtifactKind {
    /// Classify by exact file name
    pub fn classify(file_name: &str) -> Self {
        if file_name == TEMPLATE_FILE_NAME {
            ArtifactKind::Template
        } else {
            ArtifactKind::Direct
        }
    }
}

/// The local file being released
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: ArtifactKind,
}

impl Artifact {
    /// Derive file name and kind from a path
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::FileNotFound(path.to_path_buf()))?;
        let kind = ArtifactKind::classify(&file_name);

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            kind,
        })
    }
}

/// Knobs for a publish run
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Where rendered templates are written; a fresh temporary directory when unset
    pub work_dir: Option<PathBuf>,
}

/// Publish the configured artifact to every region
///
/// Returns an error only for problems found before the first upload; region
/// failures are reported in the returned [`PublishReport`].
pub async fn publish(
    config: &PublishConfig,
    store: &dyn ObjectStore,
    options: &PublishOptions,
    on_region: impl FnMut(&RegionOutcome),
) -> Result<PublishReport> {
    let artifact = Artifact::from_path(&config.path_to_file)?;
    let publisher = RegionPublisher::new(store, &config.folder_name, &config.version_number);

    tracing::debug!(file = %artifact.path.display(), kind = ?artifact.kind, "Dispatching artifact");

    match artifact.kind {
        ArtifactKind::Direct => {
            Ok(publisher
                .publish_file(&artifact.path, &artifact.file_name, on_region)
                .await)
        }
        ArtifactKind::Template => {
            let template = Template::load(&artifact.path)?;
            tracing::debug!(lines = template.line_count(), "Loaded base template");

            // Keep the TempDir alive until the walk is over.
            let (_scratch, work_dir) = match &options.work_dir {
                Some(dir) => (None, dir.clone()),
                None => {
                    let scratch = tempfile::tempdir()?;
                    let dir = scratch.path().to_path_buf();
                    (Some(scratch), dir)
                }
            };
            ensure_vacant(template.source(), &work_dir.join(&artifact.file_name))?;

            Ok(publisher
                .publish_template(&template, &artifact.file_name, &work_dir, on_region)
                .await)
        }
    }
}

/// Refuse a work directory that already holds a file at the rendered path
///
/// Rendered copies are deleted after each region, so anything already there
/// (the base template itself included) would be lost.
fn ensure_vacant(source: &Path, rendered: &Path) -> Result<()> {
    if !rendered.exists() {
        return Ok(());
    }

    let same = match (source.canonicalize(), rendered.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    let message = if same {
        format!(
            "Rendered template would overwrite the base template at {}; choose another work directory",
            source.display()
        )
    } else {
        format!(
            "{} already exists in the work directory; choose another work directory",
            rendered.display()
        )
    };
    Err(Error::General(message))
}
