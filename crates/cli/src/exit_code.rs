//! Exit code definitions for release-fanout
//!
//! Release pipelines branch on these values, so existing codes must keep
//! their meaning.

/// Exit codes for the release-fanout CLI.
///
/// A partially successful publish exits with `Success` unless the caller
/// asked for `--require-all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run finished
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// Missing configuration or unusable template
    UsageError = 2,

    /// Network or service error outside the region walk
    NetworkError = 3,

    /// Credentials rejected or malformed
    AuthError = 4,

    /// Artifact file does not exist
    NotFound = 5,

    /// At least one region was skipped under `--require-all`
    IncompletePublish = 6,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            6 => Some(Self::IncompletePublish),
            _ => None,
        }
    }

    /// Map a fatal workflow error onto its exit code
    pub fn from_error(err: &rf_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::Error;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::NetworkError.as_i32(), 3);
        assert_eq!(ExitCode::AuthError.as_i32(), 4);
        assert_eq!(ExitCode::NotFound.as_i32(), 5);
        assert_eq!(ExitCode::IncompletePublish.as_i32(), 6);
    }

    #[test]
    fn test_exit_code_from_i32() {
        for code in 0..=6 {
            assert_eq!(ExitCode::from_i32(code).map(ExitCode::as_i32), Some(code));
        }
        assert_eq!(ExitCode::from_i32(130), None);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&Error::MissingConfiguration("folder name")),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from_error(&Error::EmptyTemplate("sam-template.yaml".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from_error(&Error::FileNotFound("a.zip".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from_error(&Error::Auth("bad key".into())),
            ExitCode::AuthError
        );
        assert_eq!(
            ExitCode::from_error(&Error::General("x".into())),
            ExitCode::GeneralError
        );
    }
}
