//! File-kind classification shared by the directory listing and the bulk
//! flows.

use std::fs;
use std::os::unix::fs::FileTypeExt;

/// What a directory entry is, as reported by `lstat` or the directory
/// entry type.
///
/// `Unknown` covers filesystems that do not report an entry type; callers
/// that need certainty fall back to `lstat`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FileKind {
    /// A directory.
    Directory,
    /// A regular file.
    Regular,
    /// A symbolic link (never followed).
    Symlink,
    /// A Unix domain socket.
    Socket,
    /// A named pipe.
    Fifo,
    /// A character device node.
    CharDevice,
    /// A block device node.
    BlockDevice,
    /// The filesystem did not report a type.
    Unknown,
}

impl FileKind {
    /// Returns `true` for [`FileKind::Directory`].
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl From<fs::FileType> for FileKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::Regular
        } else if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_socket() {
            Self::Socket
        } else if file_type.is_fifo() {
            Self::Fifo
        } else if file_type.is_char_device() {
            Self::CharDevice
        } else if file_type.is_block_device() {
            Self::BlockDevice
        } else {
            Self::Unknown
        }
    }
}
