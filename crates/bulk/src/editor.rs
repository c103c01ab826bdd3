//! Hands the document to an external editor and restores the terminal.
//!
//! The editor runs synchronously in the foreground, either through the
//! host's associated-application opener or as a direct `[editor, path]`
//! spawn. Editors leave the terminal in raw mode often enough that the
//! gateway snapshots the cooked/echo state of stdin before the child and
//! puts it back afterwards, whatever the child did.

use std::ffi::OsStr;
use std::io::stdin;
use std::path::Path;

use clifm_core::Host;
use clifm_core::exit_code::EXIT_SUCCESS;
use rustix::termios::{self, OptionalActions, Termios};

use crate::error::{BulkError, BulkResult};

/// Opens `path` in the foreground and waits for the editor to exit.
///
/// With no `editor`, the host's file opener decides the program by
/// association. A nonzero exit status aborts the flow.
pub fn open_document(host: &mut dyn Host, path: &Path, editor: Option<&OsStr>) -> BulkResult<()> {
    let saved = TermState::capture();

    let status = match editor {
        None => host.open_file(path),
        Some(editor) => {
            let argv = [editor.to_os_string(), path.as_os_str().to_os_string()];
            host.launch(&argv)
        }
    };

    saved.restore();

    if status == EXIT_SUCCESS {
        Ok(())
    } else {
        Err(BulkError::Editor { status })
    }
}

/// Snapshot of stdin's terminal attributes, when stdin is a terminal.
struct TermState(Option<Termios>);

impl TermState {
    fn capture() -> Self {
        let input = stdin();
        if !termios::isatty(&input) {
            return Self(None);
        }
        Self(termios::tcgetattr(&input).ok())
    }

    fn restore(self) {
        if let Some(saved) = self.0 {
            let _ = termios::tcsetattr(&stdin(), OptionalActions::Flush, &saved);
        }
    }
}
