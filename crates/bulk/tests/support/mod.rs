//! Shared scaffolding for the bulk-flow integration tests.
//!
//! [`ScriptedHost`] stands in for the prompt loop: the "editor" is a
//! closure that may rewrite the temporary document, prompts answer from a
//! script, and every collaborator interaction is recorded for assertions.

#![allow(dead_code)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clifm_core::exit_code::EXIT_SUCCESS;
use clifm_core::{Host, Message};

type EditFn = Box<dyn FnMut(&Path)>;

pub struct ScriptedHost {
    pub cwd: PathBuf,
    /// Applied to the document path when the editor "runs".
    pub edit: Option<EditFn>,
    pub editor_status: i32,
    pub launch_status: i32,
    pub remove_status: i32,
    pub confirm_reply: bool,
    /// When set, `remove_files` really unlinks instead of only recording.
    pub perform_removals: bool,
    pub opened: Vec<PathBuf>,
    pub launched: Vec<Vec<OsString>>,
    pub removed: Vec<Vec<OsString>>,
    pub prompts: Vec<String>,
    pub messages: Vec<Message>,
    pub key_presses: usize,
    pub reloads: usize,
    pub selection_syncs: usize,
}

impl ScriptedHost {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            edit: None,
            editor_status: EXIT_SUCCESS,
            launch_status: EXIT_SUCCESS,
            remove_status: EXIT_SUCCESS,
            confirm_reply: true,
            perform_removals: false,
            opened: Vec::new(),
            launched: Vec::new(),
            removed: Vec::new(),
            prompts: Vec::new(),
            messages: Vec::new(),
            key_presses: 0,
            reloads: 0,
            selection_syncs: 0,
        }
    }

    pub fn message_texts(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.text().to_string()).collect()
    }

    pub fn saw_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text().contains(needle))
    }

    fn run_editor(&mut self, path: &Path) -> i32 {
        if let Some(edit) = self.edit.as_mut() {
            edit(path);
        }
        self.editor_status
    }
}

impl Host for ScriptedHost {
    fn open_file(&mut self, path: &Path) -> i32 {
        self.opened.push(path.to_path_buf());
        let path = path.to_path_buf();
        self.run_editor(&path)
    }

    fn launch(&mut self, argv: &[OsString]) -> i32 {
        self.launched.push(argv.to_vec());
        if argv.first().is_some_and(|p| p == "mv") {
            return self.launch_status;
        }
        // Anything else is an explicit editor invocation: [editor, doc].
        let Some(doc) = argv.get(1).map(PathBuf::from) else {
            return self.editor_status;
        };
        self.run_editor(&doc)
    }

    fn remove_files(&mut self, argv: &[OsString]) -> i32 {
        self.removed.push(argv.to_vec());
        if !self.perform_removals {
            return self.remove_status;
        }

        let mut status = EXIT_SUCCESS;
        for name in argv.iter().skip(1) {
            let path = Path::new(name);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.cwd.join(path)
            };
            let result = match std::fs::symlink_metadata(&path) {
                Ok(md) if md.is_dir() => std::fs::remove_dir_all(&path),
                Ok(_) => std::fs::remove_file(&path),
                Err(error) => Err(error),
            };
            if let Err(error) = result {
                if status == EXIT_SUCCESS {
                    status = error.raw_os_error().unwrap_or(1);
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

    fn reload_dirlist(&mut self) {
        self.reloads += 1;
    }

    fn sync_selection(&mut self) {
        self.selection_syncs += 1;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_reply
    }

    fn press_any_key(&mut self) {
        self.key_presses += 1;
    }

    fn emit(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Rewrites the document through `transform` and steps the mtime past the
/// whole-second change-detection granularity.
pub fn rewrite_doc<F>(path: &Path, transform: F)
where
    F: FnOnce(&str) -> String,
{
    let text = std::fs::read_to_string(path).expect("read document");
    std::fs::write(path, transform(&text)).expect("rewrite document");
    step_mtime(path);
}

/// Marks the document as saved without altering its content.
pub fn touch_doc(path: &Path) {
    step_mtime(path);
}

fn step_mtime(path: &Path) {
    let metadata = std::fs::metadata(path).expect("stat document");
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(
        path,
        filetime::FileTime::from_unix_time(mtime.unix_seconds() + 5, 0),
    )
    .expect("step document mtime");
}

/// Non-comment lines of a document snapshot.
pub fn payload_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
