//! The bulk remove flow.
//!
//! Writes the target's entries (with their cosmetic type suffixes) into a
//! temporary document; every line the user deletes marks that entry for
//! removal. The actual unlinking is delegated to the host's remove
//! collaborator, which may route through trash. The document is unlinked
//! explicitly on every exit path, with a warning and a status override on
//! failure, and the [`TempDoc`] guard covers panic paths.

use std::ffi::OsStr;

use clifm_core::exit_code::{self, EXIT_SUCCESS};
use clifm_core::{BulkContext, Host, Message};

use crate::diff::{self, RemoveOutcome};
use crate::editor;
use crate::entry::Entry;
use crate::enumerate::{self, RemoveParams};
use crate::error::BulkResult;
use crate::exec;
use crate::tempdoc::TempDoc;

const REMOVE_DOC_HEADER: &str = "\
# CliFM - Remove files in bulk
# Remove the files you want to be deleted, save and exit
# Just quit the editor without any edit to cancel the operation

";

const REMOVE_USAGE: &str = "\
Usage: rr [DIR] [EDITOR]
Remove files in bulk: the target directory's entries are loaded into a
text document, opened via your editor, and every entry whose line you
delete is removed after confirmation.";

/// Removes a batch of files through the editor.
///
/// `s1` may name the target directory or the editor; `s2`, when present,
/// must be an executable on `$PATH` and overrides the editor. Returns
/// zero on success or cancellation, otherwise the first nonzero errno or
/// the remove collaborator's aggregate status.
pub fn bulk_remove(
    ctx: &BulkContext,
    host: &mut dyn Host,
    s1: Option<&OsStr>,
    s2: Option<&OsStr>,
) -> i32 {
    if s1.is_some_and(is_help) {
        host.emit(Message::notice(REMOVE_USAGE));
        return EXIT_SUCCESS;
    }

    match run(ctx, host, s1, s2) {
        Ok(status) => status,
        Err(error) => {
            host.emit(Message::error(format!("rr: {error}")));
            error.status()
        }
    }
}

fn run(
    ctx: &BulkContext,
    host: &mut dyn Host,
    s1: Option<&OsStr>,
    s2: Option<&OsStr>,
) -> BulkResult<i32> {
    let params = enumerate::parse_remove_params(ctx, s1, s2)?;

    let entries = if params.target_is_workspace {
        enumerate::from_workspace(ctx)
    } else {
        enumerate::from_directory(&params.target)?
    };

    let mut doc = TempDoc::create(ctx)?;
    let doc_path = doc.path().to_path_buf();
    let result = drive(ctx, host, &mut doc, &entries, &params);
    let unlink_failure = doc.unlink().err();

    let mut status = match result {
        Ok(status) => status,
        Err(error) => {
            host.emit(Message::error(format!("rr: {error}")));
            error.status()
        }
    };
    // A failed unlink replaces the flow status.
    if let Some(error) = unlink_failure {
        host.emit(Message::warning(format!(
            "rr: unlink: '{}': {error}",
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
    params: &RemoveParams,
) -> BulkResult<i32> {
    doc.write_header_and_lines(REMOVE_DOC_HEADER, entries.iter().map(Entry::doc_line))?;
    let saved_mtime = doc.mtime_secs()?;

    editor::open_document(host, doc.path(), params.editor.as_deref())?;

    let doomed = match diff::diff_remove(doc, entries, saved_mtime)? {
        RemoveOutcome::Unchanged => {
            host.emit(Message::notice("rr: Nothing to do"));
            return Ok(EXIT_SUCCESS);
        }
        RemoveOutcome::Remove(doomed) if doomed.is_empty() => {
            host.emit(Message::notice("rr: Nothing to do"));
            return Ok(EXIT_SUCCESS);
        }
        RemoveOutcome::Remove(doomed) => doomed,
    };

    let argv = exec::removal_argv(
        ctx,
        &params.target,
        params.target_is_workspace,
        entries,
        &doomed,
    );

    if !diff::confirm_removal(host, &argv[1..]) {
        return Ok(EXIT_SUCCESS);
    }

    Ok(host.remove_files(&argv))
}

fn is_help(arg: &OsStr) -> bool {
    arg == "--help" || arg == "-h"
}
