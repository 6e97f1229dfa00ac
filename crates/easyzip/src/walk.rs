//! Depth-first traversal mapping filesystem paths to archive entry names

use crate::{
    error::{ArchiveError, Result},
    path,
};
use std::io::ErrorKind;

/// An item produced by [`TreeWalker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A regular file and the entry name it is stored under
    File { source: String, entry_name: String },
    /// The archive being written was found inside the tree and left out
    SkippedSelf { source: String },
}

struct Frame {
    source: String,
    entry_name: String,
}

/// Walks a file or directory tree, yielding one [`WalkEntry`] per file
///
/// Entry names are built by appending `/<child name>` to the prefix the walk
/// started with, or just `<child name>` while the prefix is empty. Directories
/// are expanded in the order the host returns their listing, children before
/// the next sibling. Empty directories produce nothing.
///
/// The first error ends the walk.
pub struct TreeWalker {
    stack: Vec<Frame>,
    self_path: String,
}

impl TreeWalker {
    /// Start a walk at `source`
    ///
    /// `source` and `self_path` must be in the form produced by
    /// [`path::normalize`] so they can be compared as strings.
    pub fn new(
        source: impl Into<String>,
        self_path: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            stack: vec![Frame {
                source: source.into(),
                entry_name: prefix.into(),
            }],
            self_path: self_path.into(),
        }
    }

    fn push_children(&mut self, frame: &Frame) -> Result<()> {
        let mut children = Vec::new();
        for entry in fs_err::read_dir(&frame.source)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_str().ok_or_else(|| {
                ArchiveError::invalid_path(entry.path(), "file name is not valid UTF-8")
            })?;

            let entry_name = if frame.entry_name.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", frame.entry_name, name)
            };
            children.push(Frame {
                source: path::join(&frame.source, name),
                entry_name,
            });
        }

        // Reversed so that popping visits children in listing order
        self.stack.extend(children.into_iter().rev());
        Ok(())
    }

    fn step(&mut self, frame: Frame) -> Result<Option<WalkEntry>> {
        if frame.source == self.self_path {
            return Ok(Some(WalkEntry::SkippedSelf {
                source: frame.source,
            }));
        }

        let metadata = match fs_err::metadata(&frame.source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ArchiveError::not_found(&frame.source))
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            self.push_children(&frame)?;
            Ok(None)
        } else {
            Ok(Some(WalkEntry::File {
                source: frame.source,
                entry_name: frame.entry_name,
            }))
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match self.step(frame) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
