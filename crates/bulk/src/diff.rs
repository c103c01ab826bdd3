//! Detects what the user changed in the edited document.
//!
//! # Overview
//!
//! The differ never re-reads the file system; it compares the edited
//! document against the in-memory entry sequence. Change detection starts
//! with the cheap signal (whole-second mtime equality means "no edits"),
//! then enforces the structural invariant, then pairs lines with entries
//! by position.
//!
//! # Invariants
//!
//! - Lines starting with `#` and empty or whitespace-only lines are
//!   invisible: adding or removing them never counts as a change.
//! - For rename the non-comment line count must equal the entry count;
//!   anything else is fatal before any mutation.
//! - For remove, a document with *at least* as many non-comment lines as
//!   entries means nothing to do; only a shrunken document schedules
//!   removals, by name absence.
//! - The i-th non-comment line corresponds to the i-th entry. There is no
//!   reordering semantics: a swapped pair reads as two positional renames.
//! - A trailing `/`, `@`, `=`, `|` or `?` on a remove line is cosmetic and
//!   stripped before comparison.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::BufRead;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

use clifm_core::{Host, Message, path};

use crate::entry::Entry;
use crate::error::BulkResult;
use crate::tempdoc::TempDoc;

/// One pending rename, paired by position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenameChange {
    /// Position of the entry in the sequence.
    pub index: usize,
    /// Path as originally written to the document.
    pub old: OsString,
    /// Path as found in the edited document.
    pub new: OsString,
    /// Whether the source path was workspace-relative.
    pub cwd_relative: bool,
}

/// What the rename differ concluded.
#[derive(Debug)]
pub enum DiffOutcome {
    /// The document was not saved; cancel silently.
    Unchanged,
    /// The structural invariant is broken; abort before any rename.
    LineMismatch {
        /// Non-comment lines the document was written with.
        expected: usize,
        /// Non-comment lines found after editing.
        found: usize,
    },
    /// Positional changes, possibly empty when the user saved without
    /// altering any name.
    Changes(Vec<RenameChange>),
}

/// What the remove differ concluded.
#[derive(Debug)]
pub enum RemoveOutcome {
    /// Nothing was deleted from the document; cancel silently.
    Unchanged,
    /// Indices of entries whose names no longer appear in the document.
    Remove(Vec<usize>),
}

/// Compares the edited rename document against the entry sequence.
pub fn diff_rename(
    doc: &TempDoc,
    entries: &[Entry],
    saved_mtime: u64,
) -> BulkResult<DiffOutcome> {
    if doc.mtime_secs()? == saved_mtime {
        return Ok(DiffOutcome::Unchanged);
    }

    let lines = read_noncomment_lines(doc)?;
    if lines.len() != entries.len() {
        tracing::debug!(
            expected = entries.len(),
            found = lines.len(),
            "rename document line count diverged"
        );
        return Ok(DiffOutcome::LineMismatch {
            expected: entries.len(),
            found: lines.len(),
        });
    }

    let changes = entries
        .iter()
        .zip(&lines)
        .enumerate()
        .filter(|(_, (entry, line))| entry.path().as_bytes() != line.as_slice())
        .map(|(index, (entry, line))| RenameChange {
            index,
            old: entry.path().to_os_string(),
            new: OsString::from_vec(line.clone()),
            cwd_relative: entry.cwd_relative(),
        })
        .collect();

    Ok(DiffOutcome::Changes(changes))
}

/// Compares the edited remove document against the entry sequence.
pub fn diff_remove(
    doc: &TempDoc,
    entries: &[Entry],
    saved_mtime: u64,
) -> BulkResult<RemoveOutcome> {
    if doc.mtime_secs()? == saved_mtime {
        return Ok(RemoveOutcome::Unchanged);
    }

    let lines = read_noncomment_lines(doc)?;
    if lines.len() >= entries.len() {
        // Added lines are ignored; only a shrunken document removes.
        return Ok(RemoveOutcome::Unchanged);
    }

    let survivors: HashSet<Vec<u8>> = lines.into_iter().map(strip_kind_suffix).collect();

    let doomed = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !survivors.contains(entry.path().as_bytes()))
        .map(|(index, _)| index)
        .collect();

    Ok(RemoveOutcome::Remove(doomed))
}

/// Prints the rename summary and asks for confirmation.
pub fn confirm_rename(host: &mut dyn Host, changes: &[RenameChange]) -> bool {
    for change in changes {
        let old = path::abbreviate_home(&change.old);
        let new = path::abbreviate_home(&change.new);
        host.emit(Message::notice(format!(
            "{} -> {}",
            Path::new(&old).display(),
            Path::new(&new).display()
        )));
    }
    host.confirm("Continue? [y/n] ")
}

/// Prints the removal targets and asks for confirmation.
pub fn confirm_removal(host: &mut dyn Host, targets: &[OsString]) -> bool {
    for target in targets {
        host.emit(Message::notice(
            Path::new(target).display().to_string(),
        ));
    }
    host.confirm("Continue? [y/n] ")
}

/// Reads the document's non-comment lines with trailing newlines removed.
fn read_noncomment_lines(doc: &TempDoc) -> BulkResult<Vec<Vec<u8>>> {
    let mut reader = doc.reopen_for_read()?;
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| crate::error::BulkError::TempAccess {
                path: doc.path().to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if !is_comment_line(&buf) {
            lines.push(buf.clone());
        }
    }

    Ok(lines)
}

/// A line is a comment when it starts with `#` or holds nothing but
/// whitespace.
fn is_comment_line(line: &[u8]) -> bool {
    match line.first() {
        None => true,
        Some(b'#') => true,
        _ => line.iter().all(u8::is_ascii_whitespace),
    }
}

/// Strips one trailing file-type suffix character, if present.
fn strip_kind_suffix(mut line: Vec<u8>) -> Vec<u8> {
    if matches!(line.last(), Some(b'/' | b'@' | b'=' | b'|' | b'?')) {
        line.pop();
    }
    line
}
