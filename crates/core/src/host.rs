//! The collaborator seam between the bulk core and the rest of the file
//! manager.
//!
//! # Overview
//!
//! Everything the bulk flows need from the outside world crosses the
//! [`Host`] trait: opening a document with the associated application,
//! running a child in the foreground, removing files, answering cwd
//! membership queries, refreshing the listing and selection, prompting,
//! and rendering diagnostics. The prompt loop implements this trait with
//! its own machinery; [`SystemHost`] is a stand-alone implementation
//! backed by real processes and stdio, and tests substitute scripted
//! doubles.
//!
//! # Invariants
//!
//! - [`Host::open_file`] and [`Host::launch`] run their children in the
//!   foreground and return only after the child has exited.
//! - Hosts never unlink the temporary document; its lifetime belongs to
//!   the flow that created it.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::exit_code::{self, EXIT_FAILURE, EXIT_SUCCESS};
use crate::message::{Message, Severity};

/// Inbound interface the bulk flows depend on.
pub trait Host {
    /// Opens `path` with its associated application, in the foreground.
    /// Returns the child exit status.
    fn open_file(&mut self, path: &Path) -> i32;

    /// Runs `argv` as a foreground child and returns its exit status.
    /// `argv[0]` is the program name.
    fn launch(&mut self, argv: &[OsString]) -> i32;

    /// Removes the files named by `argv[1..]` (`argv[0]` is the command
    /// name) and returns the aggregate status: zero if every removal
    /// succeeded, otherwise the first nonzero errno.
    fn remove_files(&mut self, argv: &[OsString]) -> i32;

    /// Whether `path` resides in the current working directory.
    fn is_file_in_cwd(&self, path: &Path) -> bool;

    /// Requests a refresh of the cached directory listing.
    fn reload_dirlist(&mut self);

    /// Re-reads the selection set after paths may have changed.
    fn sync_selection(&mut self);

    /// Asks the user a yes/no question; `true` means yes.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Blocks until the user acknowledges a diagnostic.
    fn press_any_key(&mut self);

    /// Renders a diagnostic to the user.
    fn emit(&mut self, message: Message);
}

/// [`Host`] implementation backed by the operating system.
///
/// Suitable for driving the bulk flows outside a prompt loop: children run
/// with inherited stdio, prompts read from stdin, and diagnostics go to
/// stderr (errors, warnings) or stdout (notices). The listing and
/// selection hooks are no-ops since there is no listing to refresh.
#[derive(Debug)]
pub struct SystemHost {
    cwd: PathBuf,
}

impl SystemHost {
    /// Creates a host rooted at the given working directory.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn default_editor() -> OsString {
        std::env::var_os("VISUAL")
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var_os("EDITOR").filter(|v| !v.is_empty()))
            .unwrap_or_else(|| OsString::from("vi"))
    }
}

impl Host for SystemHost {
    fn open_file(&mut self, path: &Path) -> i32 {
        // No MIME database outside the prompt loop; fall back to the
        // user's editor of choice.
        let argv = [Self::default_editor(), path.as_os_str().to_os_string()];
        self.launch(&argv)
    }

    fn launch(&mut self, argv: &[OsString]) -> i32 {
        let Some((program, args)) = argv.split_first() else {
            return EXIT_FAILURE;
        };

        match Command::new(program).args(args).status() {
            Ok(status) => exit_code::child_status(status),
            Err(error) => {
                self.emit(Message::error(format!(
                    "cannot run '{}': {error}",
                    Path::new(program).display()
                )));
                exit_code::errno_status(&error)
            }
        }
    }

    fn remove_files(&mut self, argv: &[OsString]) -> i32 {
        let mut status = EXIT_SUCCESS;
        for path in argv.iter().skip(1) {
            let path = Path::new(path);
            let result = match std::fs::symlink_metadata(path) {
                Ok(md) if md.is_dir() => std::fs::remove_dir_all(path),
                Ok(_) => std::fs::remove_file(path),
                Err(error) => Err(error),
            };
            if let Err(error) = result {
                self.emit(Message::error(format!(
                    "cannot remove '{}': {error}",
                    path.display()
                )));
                if status == EXIT_SUCCESS {
                    status = exit_code::errno_status(&error);
                }
            }
        }
        status
    }

    fn is_file_in_cwd(&self, path: &Path) -> bool {
        match path.parent() {
            None => false,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => parent == self.cwd,
        }
    }

    fn reload_dirlist(&mut self) {}

    fn sync_selection(&mut self) {}

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut reply = String::new();
        if io::stdin().lock().read_line(&mut reply).is_err() {
            return false;
        }
        matches!(reply.trim_start().bytes().next(), Some(b'y' | b'Y'))
    }

    fn press_any_key(&mut self) {
        print!("Press any key to continue... ");
        let _ = io::stdout().flush();
        let mut sink = String::new();
        let _ = io::stdin().lock().read_line(&mut sink);
    }

    fn emit(&mut self, message: Message) {
        match message.severity() {
            Severity::Error | Severity::Warning => eprintln!("{message}"),
            Severity::Notice => println!("{message}"),
        }
    }
}
