//! Building ZIP archives from directory trees and file lists

use crate::{
    compression::CompressionMethod,
    error::{ArchiveError, Result},
    path,
    progress::{NoProgressReporter, ProgressReporter},
    walk::{TreeWalker, WalkEntry},
};
use std::{
    io::{ErrorKind, Read, Write},
    path::Path,
};
use zip::{write::SimpleFileOptions, ZipWriter};

/// Builder for configuring archive creation
pub struct ArchiverBuilder<P: ProgressReporter = NoProgressReporter> {
    progress_reporter: P,
    compression: CompressionMethod,
}

impl ArchiverBuilder<NoProgressReporter> {
    /// Create a new archiver builder
    pub fn new() -> Self {
        Self {
            progress_reporter: NoProgressReporter,
            compression: CompressionMethod::default(),
        }
    }
}

impl<P: ProgressReporter> ArchiverBuilder<P> {
    /// Set a custom progress reporter
    pub fn with_progress_reporter<R: ProgressReporter>(self, reporter: R) -> ArchiverBuilder<R> {
        ArchiverBuilder {
            progress_reporter: reporter,
            compression: self.compression,
        }
    }

    /// Set the compression method used for every entry
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    /// Build the archiver
    pub fn build(self) -> Archiver<P> {
        Archiver {
            progress_reporter: self.progress_reporter,
            compression: self.compression,
        }
    }
}

impl Default for ArchiverBuilder<NoProgressReporter> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ArchiverBuilder<NoProgressReporter> {
    /// Set an indicatif progress bar
    pub fn with_progress_bar(
        self,
        progress_bar: indicatif::ProgressBar,
    ) -> ArchiverBuilder<crate::progress::IndicatifProgressReporter> {
        ArchiverBuilder {
            progress_reporter: crate::progress::IndicatifProgressReporter::new(progress_bar),
            compression: self.compression,
        }
    }
}

/// Archive creator
///
/// A failed build may leave a partially written archive at the destination.
/// Removing it is up to the caller.
pub struct Archiver<P: ProgressReporter = NoProgressReporter> {
    progress_reporter: P,
    compression: CompressionMethod,
}

impl<P: ProgressReporter> Archiver<P> {
    /// Create an archive at `destination` from a list of files and directories
    ///
    /// Every source becomes a top-level entry named after its own base name, with
    /// directories expanded below it. Sources are added in order and the first
    /// failure aborts the rest.
    pub fn zip_files<I, S>(&self, sources: I, destination: impl AsRef<Path>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let destination = path::normalize(destination)?;
        let sources = sources
            .into_iter()
            .map(|source| path::normalize(source))
            .collect::<Result<Vec<_>>>()?;

        let mut writer = self.create(&destination)?;
        for source in &sources {
            let walker = TreeWalker::new(
                source.as_str(),
                destination.as_str(),
                path::base_name(source),
            );
            self.write_entries(&mut writer, walker)?;
        }
        self.finish(writer, &destination)
    }

    /// Create an archive at `destination` from the directory `source`
    ///
    /// An existing destination is removed first when `overwrite` is set, and is
    /// an [`ArchiveError::AlreadyExists`] error otherwise. With `create_root` the
    /// archive holds a single top-level directory named like `source`; without
    /// it the contents of `source` sit at the archive root.
    pub fn zip_dir(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        overwrite: bool,
        create_root: bool,
    ) -> Result<()> {
        let source_arg = source.as_ref();
        let destination_arg = destination.as_ref();
        let source = path::normalize(source_arg)?;
        let destination = path::normalize(destination_arg)?;

        match fs_err::metadata(&source) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(ArchiveError::not_directory(source_arg)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ArchiveError::not_found(source_arg))
            }
            Err(e) => return Err(e.into()),
        }

        match fs_err::symlink_metadata(&destination) {
            Ok(_) if !overwrite => return Err(ArchiveError::already_exists(destination_arg)),
            Ok(metadata) => {
                tracing::debug!("removing existing {}", destination);
                if metadata.is_dir() {
                    fs_err::remove_dir_all(&destination)?;
                } else {
                    fs_err::remove_file(&destination)?;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let prefix = if create_root {
            path::base_name(&source)
        } else {
            String::new()
        };

        let mut writer = self.create(&destination)?;
        let walker = TreeWalker::new(source.as_str(), destination.as_str(), prefix);
        self.write_entries(&mut writer, walker)?;
        self.finish(writer, &destination)
    }

    fn create(&self, destination: &str) -> Result<ZipWriter<fs_err::File>> {
        tracing::info!("creating zip archive {} ({})", destination, self.compression);
        let file = fs_err::File::create(destination)?;
        Ok(ZipWriter::new(file))
    }

    fn write_entries(
        &self,
        writer: &mut ZipWriter<fs_err::File>,
        walker: TreeWalker,
    ) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(self.compression.to_zip());

        for entry in walker {
            match entry? {
                WalkEntry::SkippedSelf { source } => {
                    tracing::debug!("not adding the archive to itself: {}", source);
                    self.progress_reporter.on_skip_self();
                }
                WalkEntry::File { source, entry_name } => {
                    let mut reader = fs_err::File::open(&source)?;
                    let large_file = reader.metadata()?.len() >= u64::from(u32::MAX);
                    writer
                        .start_file(entry_name.as_str(), options.large_file(large_file))
                        .map_err(|e| ArchiveError::archive_write(format!("{entry_name}: {e}")))?;
                    self.progress_reporter.on_entry(&source);
                    tracing::debug!("adding {} as {}", source, entry_name);
                    copy_into_entry(&mut reader, writer, &entry_name)?;
                }
            }
        }

        Ok(())
    }

    fn finish(&self, writer: ZipWriter<fs_err::File>, destination: &str) -> Result<()> {
        writer
            .finish()
            .map_err(|e| ArchiveError::archive_write(e.to_string()))?;
        self.progress_reporter.on_finish("Created ZIP archive");
        tracing::info!("finished zip archive {}", destination);
        Ok(())
    }
}

/// Stream `reader` into the currently open entry of `writer`
///
/// Failures on the read side stay I/O errors of the source file, failures on
/// the write side are archive write errors naming the entry.
fn copy_into_entry<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    entry_name: &str,
) -> Result<u64> {
    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(written),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| ArchiveError::archive_write(format!("{entry_name}: {e}")))?;
        written += n as u64;
    }
}
