//! Participants of a bulk operation.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

use clifm_core::FileKind;

/// One participant in a bulk operation.
///
/// Identity is the entry's position in the sequence, never the path text:
/// the i-th non-comment line of the edited document corresponds to the
/// i-th entry. Entries are immutable after enumeration; edits live only in
/// the document and are realized by the executor.
#[derive(Clone, Debug)]
pub struct Entry {
    path: OsString,
    kind: FileKind,
    cwd_relative: bool,
}

impl Entry {
    /// Creates an entry from its display path and reported kind.
    #[must_use]
    pub fn new(path: impl Into<OsString>, kind: FileKind, cwd_relative: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            cwd_relative,
        }
    }

    /// The path exactly as written to the document.
    #[must_use]
    pub fn path(&self) -> &OsStr {
        &self.path
    }

    /// The entry kind captured at enumeration time.
    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }

    /// Whether the display path is relative to the current workspace
    /// directory, which decides whether a post-operation listing reload is
    /// warranted.
    #[must_use]
    pub const fn cwd_relative(&self) -> bool {
        self.cwd_relative
    }

    /// The document line for this entry: the path plus the cosmetic
    /// file-type suffix, when its kind has one.
    #[must_use]
    pub fn doc_line(&self) -> OsString {
        match kind_suffix(self.kind) {
            None => self.path.clone(),
            Some(suffix) => {
                let mut bytes = self.path.as_bytes().to_vec();
                bytes.push(suffix);
                OsString::from_vec(bytes)
            }
        }
    }
}

/// The cosmetic suffix character appended to remove-document lines.
///
/// Regular files and device nodes carry no suffix.
#[must_use]
pub const fn kind_suffix(kind: FileKind) -> Option<u8> {
    match kind {
        FileKind::Directory => Some(b'/'),
        FileKind::Symlink => Some(b'@'),
        FileKind::Socket => Some(b'='),
        FileKind::Fifo => Some(b'|'),
        FileKind::Unknown => Some(b'?'),
        FileKind::Regular | FileKind::CharDevice | FileKind::BlockDevice => None,
    }
}
