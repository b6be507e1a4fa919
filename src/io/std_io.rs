//! Standard stream and file sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::Sink;
use crate::config::FileExistsPolicy;

/// Sink writing to stdout. Baseline for the normal channel.
#[derive(Debug, Clone)]
pub struct StdoutSink {
    id: String,
}

impl StdoutSink {
    /// Create a new stdout sink.
    pub fn new() -> Self {
        Self { id: "-".into() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Sink writing to stderr. Baseline for the error channel.
///
/// Each chunk is flushed immediately, diagnostics must not sit in a buffer.
#[derive(Debug, Clone)]
pub struct StderrSink {
    id: String,
}

impl StderrSink {
    /// Create a new stderr sink.
    pub fn new() -> Self {
        Self {
            id: "stderr".into(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StderrSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        let mut handle = io::stderr().lock();
        handle.write_all(text.as_bytes())?;
        handle.flush()
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Sink writing to a file.
///
/// The file is opened once, when the sink is created. Writes from several
/// threads are serialized so chunks never interleave.
#[derive(Debug)]
pub struct FileSink {
    id: String,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` according to `policy`.
    pub fn open(path: impl AsRef<Path>, policy: FileExistsPolicy) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        match policy {
            FileExistsPolicy::Overwrite => options.create(true).truncate(true).write(true),
            FileExistsPolicy::Append => options.create(true).append(true),
            FileExistsPolicy::Error => options.create_new(true).write(true),
        };
        let file = options.open(&path)?;
        let id = path.to_string_lossy().into_owned();
        Ok(Self {
            id,
            path,
            file: Mutex::new(file),
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()
    }
}
