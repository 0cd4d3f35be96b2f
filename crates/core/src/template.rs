//! Template rendering
//!
//! A template is a text artifact carrying `<<REGION>>` and `<<VERSION>>`
//! markers. Each region gets its own rendered copy, written into a
//! work directory under the template's original file name.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name that marks an artifact as a template
pub const TEMPLATE_FILE_NAME: &str = "sam-template.yaml";

/// Marker replaced with the region identifier
pub const REGION_PLACEHOLDER: &str = "<<REGION>>";

/// Marker replaced with the release version
pub const VERSION_PLACEHOLDER: &str = "<<VERSION>>";

/// Base template held in memory as lines with their terminators
#[derive(Debug, Clone)]
pub struct Template {
    source: PathBuf,
    lines: Vec<String>,
}

impl Template {
    /// Read a template from disk
    ///
    /// Fails with [`Error::EmptyTemplate`] when the file has no lines.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(path, &text)
    }

    /// Build a template from text already in memory
    pub fn parse(source: &Path, text: &str) -> Result<Self> {
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        if lines.is_empty() {
            return Err(Error::EmptyTemplate(source.to_path_buf()));
        }

        Ok(Self {
            source: source.to_path_buf(),
            lines,
        })
    }

    /// Path the template was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of lines in the base template
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Render the template for one region
    pub fn render(&self, region: &str, version: &str) -> String {
        let mut out = String::new();
        for line in &self.lines {
            substitute_into(&mut out, line, region, version);
        }
        out
    }

    /// Render for one region and write the result to `dir/file_name`
    ///
    /// The file must not exist yet; an existing file is left untouched and
    /// reported as an error. The returned guard removes the file when dropped,
    /// and a write that fails halfway removes it too.
    pub fn render_to(
        &self,
        dir: &Path,
        file_name: &str,
        region: &str,
        version: &str,
    ) -> Result<RenderedArtifact> {
        let path = dir.join(file_name);
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let rendered = RenderedArtifact { path };

        file.write_all(self.render(region, version).as_bytes())?;
        file.flush()?;

        tracing::debug!(path = %rendered.path.display(), region, "Rendered template");
        Ok(rendered)
    }
}

/// Replace both markers in `line` in a single left-to-right pass
///
/// Substituted values are never scanned again, so a value that happens to
/// contain a marker is copied verbatim.
fn substitute_into(out: &mut String, line: &str, region: &str, version: &str) {
    let mut rest = line;
    while let Some(start) = rest.find("<<") {
        let tail = &rest[start..];
        let (marker_len, value) = if tail.starts_with(REGION_PLACEHOLDER) {
            (REGION_PLACEHOLDER.len(), region)
        } else if tail.starts_with(VERSION_PLACEHOLDER) {
            (VERSION_PLACEHOLDER.len(), version)
        } else {
            out.push_str(&rest[..start + 1]);
            rest = &rest[start + 1..];
            continue;
        };
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &tail[marker_len..];
    }
    out.push_str(rest);
}

/// A rendered template on disk, removed when dropped
#[derive(Debug)]
pub struct RenderedArtifact {
    path: PathBuf,
}

impl RenderedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RenderedArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove rendered template");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASE: &str = "\
AWSTemplateFormatVersion: '2010-09-09'
Resources:
  Function:
    Properties:
      CodeUri:
        Bucket: logzio-aws-integrations-<<REGION>>
        Key: cloudwatch/<<VERSION>>/function.zip
      Environment:
        Variables:
          REGION: <<REGION>>
";

    fn template(text: &str) -> Template {
        Template::parse(Path::new(TEMPLATE_FILE_NAME), text).unwrap()
    }

    #[test]
    fn test_render_replaces_every_marker() {
        let rendered = template(BASE).render("eu-west-1", "1.0.7");

        assert_eq!(rendered.matches(REGION_PLACEHOLDER).count(), 0);
        assert_eq!(rendered.matches(VERSION_PLACEHOLDER).count(), 0);
        assert_eq!(rendered.matches("eu-west-1").count(), 2);
        assert_eq!(rendered.matches("1.0.7").count(), 1);
        assert!(rendered.contains("Key: cloudwatch/1.0.7/function.zip\n"));
    }

    #[test]
    fn test_render_preserves_other_content() {
        let text = "no markers here\r\nstill none\nlast line without newline";
        assert_eq!(template(text).render("us-east-1", "2.0.0"), text);
    }

    #[test]
    fn test_render_is_idempotent() {
        let t = template(BASE);
        assert_eq!(t.render("ap-south-1", "3.1.4"), t.render("ap-south-1", "3.1.4"));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let rendered = template("<<REGION>>-<<VERSION>>\n").render("<<VERSION>>", "<<REGION>>");
        assert_eq!(rendered, "<<VERSION>>-<<REGION>>\n");
    }

    #[test]
    fn test_partial_markers_are_kept() {
        let rendered = template("a << b <<REG <<REGION>>>\n").render("ca-central-1", "1");
        assert_eq!(rendered, "a << b <<REG ca-central-1>\n");
    }

    #[test]
    fn test_line_count() {
        assert_eq!(template(BASE).line_count(), 10);
        assert_eq!(template("single").line_count(), 1);
    }

    #[test]
    fn test_empty_template() {
        let err = Template::parse(Path::new("sam-template.yaml"), "").unwrap_err();
        assert!(matches!(err, Error::EmptyTemplate(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TEMPLATE_FILE_NAME);
        std::fs::write(&path, BASE).unwrap();

        let t = Template::load(&path).unwrap();
        assert_eq!(t.source(), path);

        std::fs::write(&path, "").unwrap();
        assert!(matches!(Template::load(&path), Err(Error::EmptyTemplate(_))));
    }

    #[test]
    fn test_rendered_artifact_is_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let t = template(BASE);

        let rendered = t
            .render_to(dir.path(), TEMPLATE_FILE_NAME, "eu-north-1", "0.9.0")
            .unwrap();
        let path = rendered.path().to_path_buf();
        assert_eq!(path, dir.path().join(TEMPLATE_FILE_NAME));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            t.render("eu-north-1", "0.9.0")
        );

        drop(rendered);
        assert!(!path.exists());
    }

    #[test]
    fn test_render_to_leaves_existing_file_alone() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join(TEMPLATE_FILE_NAME);
        std::fs::write(&existing, "keep me").unwrap();

        let err = template(BASE)
            .render_to(dir.path(), TEMPLATE_FILE_NAME, "us-west-2", "1.0.0")
            .unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    }
}
