//! The editable surface of a bulk operation.
//!
//! # Overview
//!
//! A [`TempDoc`] is the temporary text document a bulk flow materializes
//! its entry list into before handing it to the editor. Creation is
//! exclusive and private (0600), under the context's temp directory unless
//! stealth mode forces the system default. The document is unlinked on
//! every exit path, success or failure: the flows call [`TempDoc::unlink`]
//! so a failed unlink can be reported and folded into the exit status,
//! and dropping the guard unlinks as a backstop on panic paths.
//!
//! # Invariants
//!
//! - The non-comment line count of the written document equals the length
//!   of the entry sequence it was built from.
//! - Change detection runs on whole-second mtimes; a document saved within
//!   the same second as the write reads as unchanged.
//! - Reads after the editor go through a fresh handle on the *path*, not
//!   the creation descriptor: editors routinely replace the file rather
//!   than rewrite it in place.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::time::UNIX_EPOCH;

use clifm_core::BulkContext;
use tempfile::NamedTempFile;

use crate::error::{BulkError, BulkResult};

/// Exclusive, self-unlinking temporary document.
#[derive(Debug)]
pub struct TempDoc {
    file: NamedTempFile,
}

impl TempDoc {
    /// Creates an empty document in the context's temp directory.
    ///
    /// The file is created exclusively with mode 0600 so paths of
    /// otherwise-private files never become readable to other users.
    pub fn create(ctx: &BulkContext) -> BulkResult<Self> {
        let dir = ctx.temp_dir();
        let file = tempfile::Builder::new()
            .prefix("clifm.")
            .rand_bytes(6)
            .tempfile_in(&dir)
            .map_err(|source| BulkError::TempCreate { dir, source })?;

        tracing::debug!(path = %file.path().display(), "created bulk document");
        Ok(Self { file })
    }

    /// The document path, valid until the guard is dropped.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Writes the fixed comment header followed by one line per entry.
    pub fn write_header_and_lines<I, S>(&mut self, header: &str, lines: I) -> BulkResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let result = (|| {
            let out = self.file.as_file_mut();
            out.write_all(header.as_bytes())?;
            for line in lines {
                out.write_all(line.as_ref().as_bytes())?;
                out.write_all(b"\n")?;
            }
            out.flush()
        })();

        result.map_err(|source| BulkError::TempAccess {
            path: self.path().to_path_buf(),
            source,
        })
    }

    /// Last modification time of the document, in whole seconds since the
    /// epoch. This is the sole signal used to detect "no edits".
    pub fn mtime_secs(&self) -> BulkResult<u64> {
        let access = |source| BulkError::TempAccess {
            path: self.path().to_path_buf(),
            source,
        };

        let modified = std::fs::metadata(self.path())
            .map_err(access)?
            .modified()
            .map_err(access)?;

        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0))
    }

    /// Unlinks the document now rather than at drop.
    ///
    /// Dropping the guard also unlinks, but silently; the flows go through
    /// this method so a failed unlink carries its errno back to the caller.
    pub fn unlink(self) -> io::Result<()> {
        self.file.close()
    }

    /// Opens the document for reading after the editor has run.
    pub fn reopen_for_read(&self) -> BulkResult<BufReader<File>> {
        File::open(self.path())
            .map(BufReader::new)
            .map_err(|source| BulkError::TempAccess {
                path: self.path().to_path_buf(),
                source,
            })
    }
}
