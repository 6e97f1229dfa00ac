//! Main extractor implementation

use crate::{
    error::{ArchiveError, Result},
    path,
    progress::{NoProgressReporter, ProgressReporter},
};
use std::path::Path;

/// Builder for configuring archive extraction
pub struct ExtractorBuilder<P: ProgressReporter = NoProgressReporter> {
    progress_reporter: P,
}

impl ExtractorBuilder<NoProgressReporter> {
    /// Create a new extractor builder
    pub fn new() -> Self {
        Self {
            progress_reporter: NoProgressReporter,
        }
    }
}

impl<P: ProgressReporter> ExtractorBuilder<P> {
    /// Set a custom progress reporter
    pub fn with_progress_reporter<R: ProgressReporter>(self, reporter: R) -> ExtractorBuilder<R> {
        ExtractorBuilder {
            progress_reporter: reporter,
        }
    }

    /// Build the extractor
    pub fn build(self) -> Extractor<P> {
        Extractor {
            progress_reporter: self.progress_reporter,
        }
    }
}

impl Default for ExtractorBuilder<NoProgressReporter> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ExtractorBuilder<NoProgressReporter> {
    /// Set an indicatif progress bar
    pub fn with_progress_bar(
        self,
        progress_bar: indicatif::ProgressBar,
    ) -> ExtractorBuilder<crate::progress::IndicatifProgressReporter> {
        ExtractorBuilder {
            progress_reporter: crate::progress::IndicatifProgressReporter::new(progress_bar),
        }
    }
}

/// Archive extractor
pub struct Extractor<P: ProgressReporter = NoProgressReporter> {
    progress_reporter: P,
}

impl<P: ProgressReporter> Extractor<P> {
    /// Extract the ZIP archive at `source` below `destination`
    ///
    /// An empty `destination` means the current working directory. Entries are
    /// processed in the order of the archive index: directory entries are
    /// created with all their ancestors, file entries overwrite whatever exists
    /// at their target path. The first failing entry aborts the extraction.
    pub fn extract(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<()> {
        let source = path::normalize(source)?;
        let destination = destination.as_ref();
        let destination = if destination.as_os_str().is_empty() {
            let cwd = std::env::current_dir()
                .map_err(|e| ArchiveError::invalid_path(destination, e.to_string()))?;
            path::normalize(cwd)?
        } else {
            path::normalize(destination)?
        };

        let file = fs_err::File::open(&source)
            .map_err(|e| ArchiveError::archive_open(&source, e.to_string()))?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| ArchiveError::archive_open(&source, e.to_string()))?;

        tracing::info!(
            "extracting {} ({} entries) into {}",
            source,
            archive.len(),
            destination
        );

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| ArchiveError::archive_read(index, e.to_string()))?;

            if entry.enclosed_name().is_none() {
                return Err(ArchiveError::invalid_entry_name(entry.name()));
            }
            let target = path::join(&destination, entry.name());

            if entry.is_dir() {
                fs_err::create_dir_all(&target)?;
                continue;
            }

            fs_err::create_dir_all(path::dir_name(&target))?;
            self.progress_reporter.on_entry(&target);
            tracing::debug!("extracting {} to {}", entry.name(), target);

            let mut writer = fs_err::File::create(&target)?;
            std::io::copy(&mut entry, &mut writer)?;
        }

        self.progress_reporter.on_finish("Extracted ZIP archive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn create_test_zip(entries: &[(&str, Option<&str>)]) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let zip_path = temp_dir.path().join("test.zip");

        let file = fs_err::File::create(&zip_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            match content {
                Some(content) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(content.as_bytes()).unwrap();
                }
                None => writer.add_directory(*name, options).unwrap(),
            }
        }
        writer.finish().unwrap();
        (temp_dir, zip_path)
    }

    #[test]
    fn test_extract_files_and_directories() {
        let (_temp_archive_dir, archive_path) = create_test_zip(&[
            ("proj/", None),
            ("proj/empty/", None),
            ("proj/a.txt", Some("alpha")),
            ("proj/sub/b.txt", Some("beta")),
        ]);
        let extract_dir = tempfile::tempdir().unwrap();

        ExtractorBuilder::new()
            .build()
            .extract(&archive_path, extract_dir.path())
            .unwrap();

        let root = extract_dir.path().join("proj");
        assert!(root.join("empty").is_dir());
        assert_eq!(fs_err::read_to_string(root.join("a.txt")).unwrap(), "alpha");
        assert_eq!(
            fs_err::read_to_string(root.join("sub").join("b.txt")).unwrap(),
            "beta"
        );
    }

    #[test]
    fn test_reports_destination_paths_in_archive_order() {
        let (_temp_archive_dir, archive_path) =
            create_test_zip(&[("z.txt", Some("z")), ("dir/", None), ("a.txt", Some("a"))]);
        let extract_dir = tempfile::tempdir().unwrap();
        let lines = RefCell::new(Vec::new());

        ExtractorBuilder::new()
            .with_progress_reporter(|line: &str| lines.borrow_mut().push(line.to_string()))
            .build()
            .extract(&archive_path, extract_dir.path())
            .unwrap();

        let root = path::normalize(extract_dir.path()).unwrap();
        assert_eq!(
            lines.into_inner(),
            vec![format!("{root}/z.txt"), format!("{root}/a.txt")]
        );
    }

    #[test]
    fn test_extracting_twice_overwrites() {
        let (_temp_archive_dir, archive_path) =
            create_test_zip(&[("d/", None), ("d/f.txt", Some("fresh"))]);
        let extract_dir = tempfile::tempdir().unwrap();
        fs_err::create_dir_all(extract_dir.path().join("d")).unwrap();
        let stale = extract_dir.path().join("d").join("f.txt");
        fs_err::write(&stale, "stale and longer").unwrap();

        let extractor = ExtractorBuilder::new().build();
        extractor.extract(&archive_path, extract_dir.path()).unwrap();
        extractor.extract(&archive_path, extract_dir.path()).unwrap();

        assert_eq!(
            fs_err::read_to_string(extract_dir.path().join("d").join("f.txt")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_missing_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = ExtractorBuilder::new()
            .build()
            .extract(temp_dir.path().join("nope.zip"), temp_dir.path());
        assert_matches!(result, Err(ArchiveError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_malformed_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let bogus = temp_dir.path().join("bogus.zip");
        fs_err::write(&bogus, "this is not a zip file").unwrap();

        let result = ExtractorBuilder::new()
            .build()
            .extract(&bogus, temp_dir.path().join("out"));
        assert_matches!(result, Err(ArchiveError::ArchiveOpen { .. }));
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_rejects_entries_escaping_destination() {
        let (_temp_archive_dir, archive_path) =
            create_test_zip(&[("ok.txt", Some("ok")), ("../evil.txt", Some("evil"))]);
        let parent = tempfile::tempdir().unwrap();
        let extract_dir = parent.path().join("out");

        let result = ExtractorBuilder::new()
            .build()
            .extract(&archive_path, &extract_dir);

        assert_matches!(
            result,
            Err(ArchiveError::InvalidEntryName { name }) if name == "../evil.txt"
        );
        assert!(extract_dir.join("ok.txt").exists());
        assert!(!parent.path().join("evil.txt").exists());
    }
}
