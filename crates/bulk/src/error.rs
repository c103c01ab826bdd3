//! Error taxonomy for the bulk flows.
//!
//! These variants are the *aborting* failures: input, resource, editor,
//! structural, and environment errors stop the flow before (or instead of)
//! mutating anything. Per-item rename/remove failures are not errors in
//! this sense; the executor collects them and surfaces the first nonzero
//! status through its report.

use std::io;
use std::path::PathBuf;

use clifm_core::exit_code::{self, EXIT_FAILURE};
use rustix::io::Errno;
use thiserror::Error;

/// Result type for bulk operations.
pub type BulkResult<T> = Result<T, BulkError>;

/// Failures that abort a bulk flow.
#[derive(Debug, Error)]
pub enum BulkError {
    /// The temporary document could not be created.
    #[error("cannot create temporary file in '{}': {source}", dir.display())]
    TempCreate {
        /// Directory the document was to be created in.
        dir: PathBuf,
        /// Underlying creation failure.
        #[source]
        source: io::Error,
    },

    /// The temporary document disappeared or stopped being accessible.
    #[error("'{}': {source}", path.display())]
    TempAccess {
        /// Path of the temporary document.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The editor exited with a nonzero status or could not run.
    #[error("the editor exited with status {status}")]
    Editor {
        /// Exit status reported by the editor child.
        status: i32,
    },

    /// The edited document no longer has one line per entry.
    #[error("Line mismatch in temporary file")]
    LineMismatch,

    /// No argument survived pre-validation.
    #[error("Nothing to do")]
    EmptyInput,

    /// The remove target exists but is not a directory.
    #[error("'{}': Not a directory", path.display())]
    TargetNotDirectory {
        /// The offending parameter.
        path: PathBuf,
    },

    /// A remove parameter is neither a directory nor an executable on
    /// `$PATH`.
    #[error("'{}': No such file or directory", path.display())]
    TargetNotFound {
        /// The offending parameter.
        path: PathBuf,
    },

    /// The remove target directory has nothing to offer.
    #[error("'{}': Directory empty", path.display())]
    EmptyDirectory {
        /// The scanned directory.
        path: PathBuf,
    },

    /// The remove target directory could not be scanned.
    #[error("'{}': {source}", path.display())]
    ReadDir {
        /// The scanned directory.
        path: PathBuf,
        /// Underlying scan failure.
        #[source]
        source: io::Error,
    },
}

impl BulkError {
    /// Maps the error to the integer status contract: the underlying errno
    /// where one exists, the editor's own status for editor failures, and
    /// `EXIT_FAILURE` for structural errors.
    #[must_use]
    pub fn status(&self) -> i32 {
        match self {
            Self::TempCreate { .. } | Self::LineMismatch | Self::EmptyInput => EXIT_FAILURE,
            Self::EmptyDirectory { .. } => EXIT_FAILURE,
            Self::TempAccess { source, .. } | Self::ReadDir { source, .. } => {
                exit_code::errno_status(source)
            }
            Self::Editor { status } => *status,
            Self::TargetNotDirectory { .. } => Errno::NOTDIR.raw_os_error(),
            Self::TargetNotFound { .. } => Errno::NOENT.raw_os_error(),
        }
    }
}
