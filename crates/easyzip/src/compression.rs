//! Compression method selection for newly written entries

use crate::error::ArchiveError;
use std::fmt;
use std::str::FromStr;

/// How file contents are stored inside a new archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// Contents are copied verbatim
    Stored,
    /// Contents are DEFLATE-compressed
    #[default]
    Deflated,
}

impl CompressionMethod {
    /// Parse a method from its name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "stored" | "store" => Some(Self::Stored),
            "deflated" | "deflate" => Some(Self::Deflated),
            _ => None,
        }
    }

    /// Get a human-readable name for this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Deflated => "deflated",
        }
    }

    pub(crate) fn to_zip(self) -> zip::CompressionMethod {
        match self {
            Self::Stored => zip::CompressionMethod::Stored,
            Self::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

impl FromStr for CompressionMethod {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ArchiveError::unsupported_compression(s))
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
