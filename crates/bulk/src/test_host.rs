//! Scripted [`Host`] double for in-crate unit tests.

#![allow(dead_code)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clifm_core::{Host, Message};

/// Records every collaborator interaction and answers with scripted
/// statuses. `open_file` and `launch` run no processes.
pub struct RecordingHost {
    pub cwd: PathBuf,
    pub open_status: i32,
    pub launch_status: i32,
    pub remove_status: i32,
    pub confirm_reply: bool,
    pub opened: Vec<PathBuf>,
    pub launched: Vec<Vec<OsString>>,
    pub removed: Vec<Vec<OsString>>,
    pub prompts: Vec<String>,
    pub messages: Vec<Message>,
    pub key_presses: usize,
    pub reloads: usize,
    pub selection_syncs: usize,
}

impl RecordingHost {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            open_status: 0,
            launch_status: 0,
            remove_status: 0,
            confirm_reply: true,
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
}

impl Host for RecordingHost {
    fn open_file(&mut self, path: &Path) -> i32 {
        self.opened.push(path.to_path_buf());
        self.open_status
    }

    fn launch(&mut self, argv: &[OsString]) -> i32 {
        self.launched.push(argv.to_vec());
        self.launch_status
    }

    fn remove_files(&mut self, argv: &[OsString]) -> i32 {
        self.removed.push(argv.to_vec());
        self.remove_status
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
