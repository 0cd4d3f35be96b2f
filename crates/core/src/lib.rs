//! rf-core: Core library for the release-fanout publisher
//!
//! This crate provides the core functionality for release-fanout, including:
//! - Configuration loading from the environment
//! - The fixed region table and upload targets
//! - Template rendering
//! - The region publisher and workflow dispatch
//! - ObjectStore trait for storage operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the publish workflow to be tested against a mock store.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod publisher;
pub mod target;
pub mod template;
pub mod traits;

pub use config::{Credentials, PublishConfig};
pub use dispatch::{Artifact, ArtifactKind, PublishOptions, publish};
pub use error::{Error, Result};
pub use publisher::{PublishReport, RegionOutcome, RegionPublisher, RegionStatus};
pub use target::{BUCKET_NAME_PREFIX, ObjectAcl, REGIONS, UploadTarget};
pub use template::{RenderedArtifact, TEMPLATE_FILE_NAME, Template};
pub use traits::{DryRunStore, ObjectStore};
