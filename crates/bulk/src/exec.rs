//! Applies a computed change list to the file system.
//!
//! # Overview
//!
//! The executor is the only component that mutates anything. Renames go
//! through `renameat` relative to the current working directory, with the
//! `EXDEV` cross-device case recovered by a foreground `mv -- old new`
//! through the host launcher (the platform's own copy-then-unlink logic,
//! sparse files and xattrs included). Removals are delegated wholesale to
//! the host's remove collaborator as an argv-style vector.
//!
//! # Invariants
//!
//! - Per-item failures never abort the batch; the first nonzero status
//!   becomes the aggregate result and every remaining item is attempted.
//! - When more than one change is pending and auto-listing is on, each
//!   failure pauses for acknowledgement so the diagnostic survives the
//!   upcoming screen refresh.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

use clifm_core::exit_code::EXIT_SUCCESS;
use clifm_core::{BulkContext, Host, Message};
use rustix::fs::{CWD, renameat};
use rustix::io::Errno;

use crate::diff::RenameChange;
use crate::entry::Entry;

/// Aggregate outcome of a rename batch.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// How many renames committed.
    pub renamed: usize,
    /// First nonzero per-item status, or zero.
    pub status: i32,
    /// Whether any source or target lay in the current working directory.
    pub touched_cwd: bool,
}

/// Executes the change list in index order.
pub fn rename_changes(
    ctx: &BulkContext,
    host: &mut dyn Host,
    changes: &[RenameChange],
) -> RenameReport {
    let mut report = RenameReport::default();

    for change in changes {
        let new = trim_trailing_slash(&change.new);

        let ret = rename_file(host, &change.old, &new);
        if ret != EXIT_SUCCESS {
            if report.status == EXIT_SUCCESS {
                report.status = ret;
            }
            if ctx.auto_list() && changes.len() > 1 {
                host.press_any_key();
            }
            continue;
        }

        if !report.touched_cwd
            && (change.cwd_relative
                || host.is_file_in_cwd(Path::new(&change.old))
                || host.is_file_in_cwd(Path::new(&new)))
        {
            report.touched_cwd = true;
        }
        report.renamed += 1;
    }

    tracing::debug!(
        renamed = report.renamed,
        status = report.status,
        "rename batch finished"
    );
    report
}

/// Renames one file, recovering `EXDEV` through `mv`.
fn rename_file(host: &mut dyn Host, old: &OsStr, new: &OsStr) -> i32 {
    rename_with(host, old, new, |old, new| renameat(CWD, old, CWD, new))
}

fn rename_with<F>(host: &mut dyn Host, old: &OsStr, new: &OsStr, primitive: F) -> i32
where
    F: FnOnce(&OsStr, &OsStr) -> Result<(), Errno>,
{
    match primitive(old, new) {
        Ok(()) => EXIT_SUCCESS,
        Err(Errno::XDEV) => {
            let argv = [
                OsString::from("mv"),
                OsString::from("--"),
                old.to_os_string(),
                new.to_os_string(),
            ];
            host.launch(&argv)
        }
        Err(errno) => {
            host.emit(Message::error(format!(
                "br: Cannot rename '{}' to '{}': {}",
                Path::new(old).display(),
                Path::new(new).display(),
                std::io::Error::from(errno)
            )));
            errno.raw_os_error()
        }
    }
}

/// Some platforms' rename refuses a trailing slash on the target.
fn trim_trailing_slash(new: &OsStr) -> OsString {
    let bytes = new.as_bytes();
    if bytes.len() > 1 && bytes.ends_with(b"/") {
        OsString::from_vec(bytes[..bytes.len() - 1].to_vec())
    } else {
        new.to_os_string()
    }
}

/// Builds the `["rr", path…]` vector handed to the remove collaborator.
///
/// Workspace targets keep their listed names; anything else is resolved to
/// an absolute path under the target (or under `workspace/target` when the
/// target itself is relative).
#[must_use]
pub fn removal_argv(
    ctx: &BulkContext,
    target: &Path,
    target_is_workspace: bool,
    entries: &[Entry],
    doomed: &[usize],
) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(doomed.len() + 1);
    argv.push(OsString::from("rr"));

    for &index in doomed {
        let name = entries[index].path();
        if target_is_workspace {
            argv.push(name.to_os_string());
        } else if target.is_absolute() {
            argv.push(target.join(name).into_os_string());
        } else {
            argv.push(ctx.workspace().join(target).join(name).into_os_string());
        }
    }

    argv
}
