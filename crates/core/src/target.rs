//! Region table and upload targets
//!
//! Every release goes to the same fixed set of regional buckets. A bucket is
//! named `<prefix><region>` and the object key is `folder/version/file_name`
//! in every one of them.

use std::fmt;

use serde::Serialize;

/// Prefix shared by all regional bucket names
pub const BUCKET_NAME_PREFIX: &str = "logzio-aws-integrations-";

/// Regions that receive every release, in publish order
pub const REGIONS: [&str; 17] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ap-south-1",
    "ap-northeast-3",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "sa-east-1",
    "ca-central-1",
];

/// Bucket name for a region
pub fn bucket_name(region: &str) -> String {
    format!("{BUCKET_NAME_PREFIX}{region}")
}

/// Object key shared by every regional copy of an artifact
pub fn object_key(folder_name: &str, version_number: &str, file_name: &str) -> String {
    format!("{folder_name}/{version_number}/{file_name}")
}

/// Where one regional copy of the artifact is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTarget {
    /// Region that owns the bucket
    pub region: String,
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

impl UploadTarget {
    /// Build the target for `region`
    pub fn for_region(
        region: &str,
        folder_name: &str,
        version_number: &str,
        file_name: &str,
    ) -> Self {
        Self {
            region: region.to_string(),
            bucket: bucket_name(region),
            key: object_key(folder_name, version_number, file_name),
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Canned access policy applied to uploaded objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectAcl {
    /// Downloadable without authentication
    #[default]
    PublicRead,
}

impl ObjectAcl {
    /// Canned ACL name as S3 spells it
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectAcl::PublicRead => "public-read",
        }
    }
}
