use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::generators::android::{GeneratedFile, WritePolicy};

/// Outcome of writing a batch of generated files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    /// Editable files that already existed.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write generated files below `output_dir`, creating directories as needed.
///
/// Create-only files that already exist are left alone. A file that cannot
/// be written is logged and recorded; the remaining files are still written.
pub fn write_sources(output_dir: &Path, files: &[GeneratedFile]) -> Result<WriteReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut report = WriteReport::default();
    for file in files {
        let path = output_dir.join(&file.relative_path);
        if file.policy == WritePolicy::CreateOnly && path.exists() {
            debug!(path = %path.display(), "keeping existing editable file");
            report.skipped.push(path);
            continue;
        }

        match write_file(&path, &file.contents) {
            Ok(()) => {
                debug!(path = %path.display(), "wrote file");
                report.written.push(path);
            }
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "failed to write file");
                report.failed.push(path);
            }
        }
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "finished writing sources"
    );
    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing generated file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, contents: &str, policy: WritePolicy) -> GeneratedFile {
        GeneratedFile {
            relative_path: PathBuf::from(path),
            contents: contents.to_string(),
            policy,
        }
    }

    #[test]
    fn create_only_files_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            file("person/PersonBaseRecord.kt", "base v1", WritePolicy::Overwrite),
            file("person/Person.kt", "record v1", WritePolicy::CreateOnly),
        ];
        let first = write_sources(dir.path(), &files).unwrap();
        assert_eq!(first.written.len(), 2);

        let files = vec![
            file("person/PersonBaseRecord.kt", "base v2", WritePolicy::Overwrite),
            file("person/Person.kt", "record v2", WritePolicy::CreateOnly),
        ];
        let second = write_sources(dir.path(), &files).unwrap();
        assert_eq!(second.written, vec![dir.path().join("person/PersonBaseRecord.kt")]);
        assert_eq!(second.skipped, vec![dir.path().join("person/Person.kt")]);

        let read = |p: &str| fs::read_to_string(dir.path().join(p)).unwrap();
        assert_eq!(read("person/PersonBaseRecord.kt"), "base v2");
        assert_eq!(read("person/Person.kt"), "record v1");
    }

    #[test]
    fn failed_writes_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        fs::write(dir.path().join("blocked"), "").unwrap();
        let files = vec![
            file("blocked/Broken.kt", "x", WritePolicy::Overwrite),
            file("ok/Fine.kt", "y", WritePolicy::Overwrite),
        ];

        let report = write_sources(dir.path(), &files).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.failed, vec![dir.path().join("blocked/Broken.kt")]);
        assert_eq!(report.written, vec![dir.path().join("ok/Fine.kt")]);
    }
}
