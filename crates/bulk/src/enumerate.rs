//! Builds the ordered entry sequence that seeds a bulk operation.
//!
//! # Overview
//!
//! Two modes feed the flows. Argument mode (rename) walks a caller-provided
//! argument vector, pre-validating each name: backslash escapes are
//! removed, leading `./` and `../` are resolved through `realpath`, and the
//! result must `lstat`. Failures are reported, acknowledged, and skipped,
//! so the surviving sequence pairs positionally with the document lines.
//! Directory mode (remove) either reuses the cached workspace listing
//! as-is or scans a target directory in byte-wise name order with `.` and
//! `..` excluded.
//!
//! # Invariants
//!
//! - Input order is preserved in argument mode; scan results are sorted.
//! - Every returned entry passed `lstat` (argument mode) or carries the
//!   directory-entry type, with an `lstat` fallback (directory mode).

use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use clifm_core::{BulkContext, FileKind, Host, Message, path};

use crate::entry::Entry;
use crate::error::{BulkError, BulkResult};

/// Builds the rename sequence from `argv[1..]`, skipping arguments that
/// fail pre-validation.
///
/// Each skipped argument produces an error diagnostic and a press-any-key
/// acknowledgement so the user sees the reason before the editor takes
/// over the terminal.
pub fn from_arguments(host: &mut dyn Host, args: &[OsString]) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(args.len());

    for arg in args {
        let mut name = arg.clone();

        if name.as_bytes().contains(&b'\\') {
            match path::unescape(&name) {
                Some(unescaped) => name = unescaped,
                None => {
                    host.emit(Message::error(format!(
                        "br: '{}': Error unescaping file name",
                        Path::new(arg).display()
                    )));
                    host.press_any_key();
                    continue;
                }
            }
        }

        if has_dot_prefix(&name) {
            match fs::canonicalize(&name) {
                Ok(resolved) => name = resolved.into_os_string(),
                Err(error) => {
                    host.emit(Message::error(format!(
                        "br: '{}': {error}",
                        Path::new(&name).display()
                    )));
                    host.press_any_key();
                    continue;
                }
            }
        }

        match fs::symlink_metadata(&name) {
            Ok(metadata) => {
                let cwd_relative = !name.as_bytes().contains(&b'/');
                entries.push(Entry::new(
                    name,
                    FileKind::from(metadata.file_type()),
                    cwd_relative,
                ));
            }
            Err(error) => {
                host.emit(Message::error(format!(
                    "br: '{}': {error}",
                    Path::new(&name).display()
                )));
                host.press_any_key();
            }
        }
    }

    tracing::debug!(
        requested = args.len(),
        accepted = entries.len(),
        "enumerated rename arguments"
    );
    entries
}

fn has_dot_prefix(name: &OsStr) -> bool {
    let bytes = name.as_bytes();
    bytes.starts_with(b"./") || bytes.starts_with(b"../")
}

/// Builds the remove sequence from the cached workspace listing, in
/// listing order.
#[must_use]
pub fn from_workspace(ctx: &BulkContext) -> Vec<Entry> {
    ctx.listing()
        .iter()
        .map(|file| Entry::new(file.name(), file.kind(), true))
        .collect()
}

/// Scans a target directory for the remove sequence.
///
/// Entries come back sorted by name bytes with `.` and `..` excluded; an
/// entry whose kind cannot be determined even by `lstat` is dropped. An
/// empty directory is an error: there is nothing to remove.
pub fn from_directory(target: &Path) -> BulkResult<Vec<Entry>> {
    let read_dir = fs::read_dir(target).map_err(|source| BulkError::ReadDir {
        path: target.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| BulkError::ReadDir {
            path: target.to_path_buf(),
            source,
        })?;

        let kind = match dir_entry.file_type() {
            Ok(file_type) => FileKind::from(file_type),
            Err(_) => match fs::symlink_metadata(dir_entry.path()) {
                Ok(metadata) => FileKind::from(metadata.file_type()),
                Err(_) => continue,
            },
        };

        entries.push(Entry::new(dir_entry.file_name(), kind, false));
    }

    if entries.is_empty() {
        return Err(BulkError::EmptyDirectory {
            path: target.to_path_buf(),
        });
    }

    entries.sort_by(|a, b| a.path().as_bytes().cmp(b.path().as_bytes()));
    tracing::debug!(
        target = %target.display(),
        count = entries.len(),
        "enumerated remove target"
    );
    Ok(entries)
}

/// Parsed `(s1, s2)` parameters of the remove flow.
#[derive(Debug)]
pub struct RemoveParams {
    /// Directory whose contents seed the document.
    pub target: PathBuf,
    /// Whether the target is the current workspace (cached listing mode).
    pub target_is_workspace: bool,
    /// Editor override; `None` means the associated application.
    pub editor: Option<OsString>,
}

/// Resolves the remove flow's two optional parameters.
///
/// `s1` may be the target directory or the editor; `s2`, when present,
/// must be an executable on `$PATH` and overrides the editor. An `s1`
/// that is neither fails with the matching POSIX errno.
pub fn parse_remove_params(
    ctx: &BulkContext,
    s1: Option<&OsStr>,
    s2: Option<&OsStr>,
) -> BulkResult<RemoveParams> {
    let Some(s1) = s1.filter(|s| !s.is_empty()) else {
        return Ok(RemoveParams {
            target: ctx.workspace().to_path_buf(),
            target_is_workspace: true,
            editor: None,
        });
    };

    let stat = fs::metadata(s1);
    let is_dir = stat.as_ref().map(fs::Metadata::is_dir).unwrap_or(false);

    if !is_dir {
        // Not a directory: accept an executable name and keep the
        // workspace as the target.
        if path::find_in_path(s1).is_some() {
            return Ok(RemoveParams {
                target: ctx.workspace().to_path_buf(),
                target_is_workspace: true,
                editor: Some(s1.to_os_string()),
            });
        }
        return Err(if stat.is_ok() {
            BulkError::TargetNotDirectory {
                path: PathBuf::from(s1),
            }
        } else {
            BulkError::TargetNotFound {
                path: PathBuf::from(s1),
            }
        });
    }

    let target = PathBuf::from(trim_trailing_slash(s1));
    let target_is_workspace = target == ctx.workspace();

    let editor = match s2.filter(|s| !s.is_empty()) {
        None => None,
        Some(s2) => {
            if path::find_in_path(s2).is_none() {
                return Err(BulkError::TargetNotFound {
                    path: PathBuf::from(s2),
                });
            }
            Some(s2.to_os_string())
        }
    };

    Ok(RemoveParams {
        target,
        target_is_workspace,
        editor,
    })
}

fn trim_trailing_slash(s: &OsStr) -> OsString {
    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes.ends_with(b"/") {
        OsStr::from_bytes(&bytes[..bytes.len() - 1]).to_os_string()
    } else {
        s.to_os_string()
    }
}
