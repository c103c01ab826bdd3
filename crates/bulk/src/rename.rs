//! The bulk rename flow.
//!
//! Materializes the argument list into a temporary document, hands it to
//! the editor, diffs the result, confirms, and applies the renames. The
//! state machine is Init → Enumerate → Write → Edit → Diff → Confirm →
//! Apply → Report, with cleanup reached from every state: the document is
//! unlinked explicitly, a failed unlink is warned about and its errno
//! becomes the flow status, and the [`TempDoc`] guard covers panic paths.

use std::ffi::OsString;

use clifm_core::exit_code::{self, EXIT_FAILURE, EXIT_SUCCESS};
use clifm_core::{BulkContext, Host, Message};

use crate::diff::{self, DiffOutcome};
use crate::editor;
use crate::entry::Entry;
use crate::enumerate;
use crate::error::{BulkError, BulkResult};
use crate::exec;
use crate::tempdoc::TempDoc;

const RENAME_DOC_HEADER: &str = "\
# CliFM - Rename files in bulk
# Edit file names, save, and quit the editor (you will be
# asked for confirmation)
# Just quit the editor without any edit to cancel the operation

";

const RENAME_USAGE: &str = "\
Usage: br FILE(s)
Rename files in bulk: the names are loaded into a text document, opened
via your editor, and the edited names are applied after confirmation.";

/// Renames a batch of files through the editor.
///
/// `argv[0]` is the command name; `argv[1..]` are the files to rename.
/// Returns zero on success or cancellation, the first nonzero errno or
/// child status on per-item failure, and `EXIT_FAILURE` on structural
/// errors.
pub fn bulk_rename(ctx: &BulkContext, host: &mut dyn Host, argv: &[OsString]) -> i32 {
    let Some(first) = argv.get(1) else {
        host.emit(Message::notice(RENAME_USAGE));
        return EXIT_SUCCESS;
    };
    if is_help(first) {
        host.emit(Message::notice(RENAME_USAGE));
        return EXIT_SUCCESS;
    }

    match run(ctx, host, &argv[1..]) {
        Ok(status) => status,
        Err(error) => {
            host.emit(Message::error(format!("br: {error}")));
            error.status()
        }
    }
}

fn run(ctx: &BulkContext, host: &mut dyn Host, args: &[OsString]) -> BulkResult<i32> {
    let entries = enumerate::from_arguments(host, args);
    if entries.is_empty() {
        host.emit(Message::notice("br: Nothing to do"));
        return Ok(EXIT_FAILURE);
    }

    let mut doc = TempDoc::create(ctx)?;
    let doc_path = doc.path().to_path_buf();
    let result = drive(ctx, host, &mut doc, &entries);
    let unlink_failure = doc.unlink().err();

    let mut status = match result {
        Ok(status) => status,
        Err(error) => {
            host.emit(Message::error(format!("br: {error}")));
            error.status()
        }
    };
    // A failed unlink replaces the flow status.
    if let Some(error) = unlink_failure {
        host.emit(Message::warning(format!(
            "br: unlink: '{}': {error}",
            doc_path.display()
        )));
        status = exit_code::errno_status(&error);
    }

    Ok(status)
}

fn drive(
    ctx: &BulkContext,
    host: &mut dyn Host,
    doc: &mut TempDoc,
    entries: &[Entry],
) -> BulkResult<i32> {
    doc.write_header_and_lines(RENAME_DOC_HEADER, entries.iter().map(Entry::path))?;
    let saved_mtime = doc.mtime_secs()?;

    editor::open_document(host, doc.path(), None)?;

    let changes = match diff::diff_rename(doc, entries, saved_mtime)? {
        DiffOutcome::Unchanged => {
            host.emit(Message::notice("br: Nothing to do"));
            return Ok(EXIT_SUCCESS);
        }
        DiffOutcome::LineMismatch { .. } => {
            return Err(BulkError::LineMismatch);
        }
        DiffOutcome::Changes(changes) if changes.is_empty() => {
            host.emit(Message::notice("br: Nothing to do"));
            return Ok(EXIT_SUCCESS);
        }
        DiffOutcome::Changes(changes) => changes,
    };

    if !diff::confirm_rename(host, &changes) {
        return Ok(EXIT_SUCCESS);
    }

    let report = exec::rename_changes(ctx, host, &changes);

    if ctx.selection_count() > 0 {
        // A selected file in the current directory may have been renamed.
        host.sync_selection();
    }
    if report.renamed > 0 && report.touched_cwd && ctx.auto_list() {
        host.reload_dirlist();
    }
    host.emit(Message::notice(format!(
        "{} file(s) renamed",
        report.renamed
    )));

    Ok(report.status)
}

fn is_help(arg: &OsString) -> bool {
    arg == "--help" || arg == "-h"
}
