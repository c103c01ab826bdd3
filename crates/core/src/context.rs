//! Per-invocation snapshot of the process-wide state the bulk flows read.
//!
//! The original implementation consulted globals for the current workspace,
//! the cached directory listing, the selection set, and the temp-directory
//! configuration. The flows here receive all of it as one [`BulkContext`]
//! value; the contract is unchanged but the dependency is explicit.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::kind::FileKind;

/// One entry of the cached workspace listing.
///
/// Names are stored as listed (bare names for the workspace directory), not
/// resolved paths.
#[derive(Clone, Debug)]
pub struct ListedFile {
    name: OsString,
    kind: FileKind,
}

impl ListedFile {
    /// Creates a listing entry from a name and its reported kind.
    #[must_use]
    pub fn new(name: impl Into<OsString>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The entry name as listed.
    #[must_use]
    pub fn name(&self) -> &std::ffi::OsStr {
        &self.name
    }

    /// The entry kind captured when the listing was built.
    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }
}

/// Read-only snapshot of the state a bulk operation runs against.
#[derive(Clone, Debug)]
pub struct BulkContext {
    workspace: PathBuf,
    listing: Vec<ListedFile>,
    selection_count: usize,
    stealth_mode: bool,
    tmp_dir: PathBuf,
    auto_list: bool,
}

impl BulkContext {
    /// Creates a context for the given workspace directory.
    ///
    /// Defaults: empty listing, empty selection, stealth mode off, the
    /// system temp directory, auto-list enabled.
    #[must_use]
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            listing: Vec::new(),
            selection_count: 0,
            stealth_mode: false,
            tmp_dir: env::temp_dir(),
            auto_list: true,
        }
    }

    /// Replaces the cached workspace listing.
    #[must_use]
    pub fn with_listing(mut self, listing: Vec<ListedFile>) -> Self {
        self.listing = listing;
        self
    }

    /// Records how many files the selection set currently holds.
    #[must_use]
    pub const fn with_selection_count(mut self, count: usize) -> Self {
        self.selection_count = count;
        self
    }

    /// Enables or disables stealth mode.
    #[must_use]
    pub const fn with_stealth_mode(mut self, stealth: bool) -> Self {
        self.stealth_mode = stealth;
        self
    }

    /// Sets the application-owned temp directory used when stealth mode is
    /// off.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    /// Enables or disables the automatic listing refresh after mutations.
    #[must_use]
    pub const fn with_auto_list(mut self, auto_list: bool) -> Self {
        self.auto_list = auto_list;
        self
    }

    /// The current workspace directory.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// The cached listing of the workspace directory, in display order.
    #[must_use]
    pub fn listing(&self) -> &[ListedFile] {
        &self.listing
    }

    /// Number of files in the selection set.
    #[must_use]
    pub const fn selection_count(&self) -> usize {
        self.selection_count
    }

    /// Whether stealth mode forces the system default temp directory.
    #[must_use]
    pub const fn stealth_mode(&self) -> bool {
        self.stealth_mode
    }

    /// The directory temporary documents are created in.
    ///
    /// Stealth mode overrides the configured application temp directory
    /// with the system default so no application-owned paths are touched.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        if self.stealth_mode {
            env::temp_dir()
        } else {
            self.tmp_dir.clone()
        }
    }

    /// Whether the listing should be refreshed after a mutating operation.
    #[must_use]
    pub const fn auto_list(&self) -> bool {
        self.auto_list
    }
}
