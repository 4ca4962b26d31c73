//! Delivery sinks for rendered calendar documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// File stem used when the caller does not pick one.
pub const DEFAULT_FILENAME: &str = "calendar";

/// File extension used when the caller does not pick one.
pub const DEFAULT_EXTENSION: &str = "ics";

/// MIME type of rendered calendar documents.
pub const CONTENT_TYPE: &str = "text/calendar";

/// A sink that accepts rendered calendar documents.
///
/// Implementations decide what the name means: a file on disk, an attachment
/// name, a download target.
pub trait Delivery {
    fn deliver(&mut self, text: &str, filename: &str, extension: &str) -> io::Result<()>;
}

/// Writes calendars into a directory as `<filename>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileDelivery {
    directory: PathBuf,
}

impl FileDelivery {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Delivery for FileDelivery {
    fn deliver(&mut self, text: &str, filename: &str, extension: &str) -> io::Result<()> {
        let path = self.directory.join(format!("{filename}.{extension}"));
        fs::write(&path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "calendar written");
        Ok(())
    }
}
