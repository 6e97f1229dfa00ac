//! Pack files and directory trees into ZIP archives and unpack them again
//!
//! Entry names are derived from the filesystem layout with a fixed rule: every
//! path is made absolute and rendered with `/` separators, and each directory
//! level appends `/<name>` to the name of its parent. The same archive therefore
//! extracts to the same layout on every operating system.
//!
//! # Features
//!
//! - Archive a whole directory, with or without a wrapping root directory
//! - Archive an explicit list of files and directories
//! - The archive is never added to itself when it is written inside its source
//! - Progress reporting via `indicatif`, plain output, or any `Fn(&str)`
//! - Stored or DEFLATE-compressed entries
//!
//! # Examples
//!
//! ## Round trip
//!
//! ```no_run
//! use easyzip::{ArchiverBuilder, ExtractorBuilder};
//!
//! let archiver = ArchiverBuilder::new().build();
//! archiver.zip_dir("proj", "proj.zip", true, true)?;
//!
//! let extractor = ExtractorBuilder::new().build();
//! extractor.extract("proj.zip", "restored")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## With progress reporting
//!
//! ```no_run
//! use easyzip::ArchiverBuilder;
//!
//! let archiver = ArchiverBuilder::new()
//!     .with_progress_reporter(|line: &str| println!("add: {line}"))
//!     .build();
//!
//! archiver.zip_files(["notes.txt", "assets"], "bundle.zip")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archiver;
pub mod compression;
pub mod error;
pub mod extractor;
pub mod path;
pub mod progress;
pub mod walk;

pub use archiver::{Archiver, ArchiverBuilder};
pub use compression::CompressionMethod;
pub use error::{ArchiveError, Result};
pub use extractor::{Extractor, ExtractorBuilder};
pub use progress::{NoProgressReporter, PrintProgressReporter, ProgressReporter};
pub use walk::{TreeWalker, WalkEntry};

#[cfg(feature = "progress")]
pub use progress::IndicatifProgressReporter;
