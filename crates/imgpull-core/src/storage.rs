//! Output file for one downloaded row.
//!
//! The file is created lazily: the extension is only known once response
//! headers have arrived, and a failed request must leave nothing behind.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::url_model::output_filename;

/// Destination for the body of one row's response, `dir/image_<row><ext>`.
#[derive(Debug)]
pub struct OutputFile {
    dir: PathBuf,
    row_num: usize,
    open: Option<(BufWriter<File>, PathBuf)>,
}

impl OutputFile {
    pub fn new(dir: &Path, row_num: usize) -> Self {
        Self {
            dir: dir.to_path_buf(),
            row_num,
            open: None,
        }
    }

    /// Final path for a given extension, without touching the filesystem.
    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.dir.join(output_filename(self.row_num, extension))
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Path of the opened file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.open.as_ref().map(|(_, p)| p.as_path())
    }

    /// Create (or truncate) the file for `extension`. Overwrites an existing
    /// file of the same name. Calling again after a successful open is a no-op.
    pub fn open(&mut self, extension: &str) -> io::Result<()> {
        if self.open.is_some() {
            return Ok(());
        }
        let path = self.path_for(extension);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        tracing::debug!(path = %path.display(), "created output file");
        self.open = Some((BufWriter::new(file), path));
        Ok(())
    }

    /// Append `data`. The file must have been opened first.
    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        match &mut self.open {
            Some((w, _)) => w.write_all(data),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "output file written before open",
            )),
        }
    }

    /// Flush buffered bytes and close the file. Returns the path written, or
    /// `None` if the file was never opened.
    pub fn finish(self) -> io::Result<Option<PathBuf>> {
        match self.open {
            Some((mut w, path)) => {
                w.flush()?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}
