//! ObjectStore trait definition
//!
//! This trait is the only view the publisher has of the storage service.
//! It keeps the core free of any SDK and lets tests substitute a mock.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::target::{ObjectAcl, UploadTarget};

/// Trait for the storage operations a publish run needs
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file to `target` with the given access policy
    async fn upload_file(
        &self,
        local_path: &Path,
        target: &UploadTarget,
        acl: ObjectAcl,
    ) -> Result<()>;
}

/// Store that records nothing and always succeeds
///
/// Backs dry runs: the workflow renders and walks every region exactly as a
/// real run would, without a client or credentials check.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunStore;

#[async_trait]
impl ObjectStore for DryRunStore {
    async fn upload_file(
        &self,
        local_path: &Path,
        target: &UploadTarget,
        acl: ObjectAcl,
    ) -> Result<()> {
        tracing::info!(
            file = %local_path.display(),
            %target,
            acl = acl.as_str(),
            "Dry run: would upload"
        );
        Ok(())
    }
}
