//! End-to-end coverage of the bulk remove flow with a scripted host.

mod support;

use std::cell::RefCell;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::rc::Rc;

use clifm_bulk::bulk_remove;
use clifm_core::context::ListedFile;
use clifm_core::{BulkContext, FileKind};
use support::ScriptedHost;

/// Workspace with a directory `x`, a regular file `y`, and a symlink `z`.
struct Scene {
    workspace: tempfile::TempDir,
    tmp: tempfile::TempDir,
}

impl Scene {
    fn new() -> Self {
        let workspace = tempfile::tempdir().expect("create workspace");
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(workspace.path().join("x")).expect("mkdir x");
        std::fs::write(workspace.path().join("y"), b"y").expect("write y");
        std::os::unix::fs::symlink("y", workspace.path().join("z")).expect("symlink z");
        Self { workspace, tmp }
    }

    fn ctx(&self) -> BulkContext {
        BulkContext::new(self.workspace.path())
            .with_temp_dir(self.tmp.path())
            .with_listing(vec![
                ListedFile::new("x", FileKind::Directory),
                ListedFile::new("y", FileKind::Regular),
                ListedFile::new("z", FileKind::Symlink),
            ])
    }

    fn host(&self) -> ScriptedHost {
        let mut host = ScriptedHost::new(self.workspace.path());
        host.perform_removals = true;
        host
    }

    fn exists(&self, name: &str) -> bool {
        self.workspace.path().join(name).symlink_metadata().is_ok()
    }
}

fn drop_line(name: &'static str) -> impl Fn(&str) -> String {
    move |text: &str| {
        text.lines()
            .filter(|line| *line != name)
            .map(|line| line.to_string() + "\n")
            .collect()
    }
}

#[test]
fn deleting_a_line_removes_that_entry() {
    let scene = Scene::new();
    let mut host = scene.host();

    let snapshot = Rc::new(RefCell::new(String::new()));
    let seen = Rc::clone(&snapshot);
    host.edit = Some(Box::new(move |path| {
        *seen.borrow_mut() = std::fs::read_to_string(path).expect("read document");
        support::rewrite_doc(path, drop_line("y"));
    }));

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);

    assert_eq!(status, 0);
    // The document carries the cosmetic type suffixes.
    assert_eq!(
        support::payload_lines(&snapshot.borrow()),
        vec!["x/", "y", "z@"]
    );
    assert!(!scene.exists("y"));
    assert!(scene.exists("x"));
    assert!(scene.exists("z"));
    assert_eq!(host.prompts.len(), 1);
    assert_eq!(host.removed.len(), 1);
    assert_eq!(host.removed[0][0], OsString::from("rr"));
}

#[test]
fn quitting_the_editor_without_saving_cancels() {
    let scene = Scene::new();
    let mut host = scene.host();

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);

    assert_eq!(status, 0);
    assert!(host.saw_message("rr: Nothing to do"));
    assert!(scene.exists("x"));
    assert!(scene.exists("y"));
    assert!(scene.exists("z"));
    assert!(host.removed.is_empty());
}

#[test]
fn suffixes_may_be_dropped_by_the_user() {
    let scene = Scene::new();
    let mut host = scene.host();

    // Keep x and z but strip their suffixes; only y's line disappears.
    host.edit = Some(Box::new(|path| {
        support::rewrite_doc(path, |_| "x\nz\n".to_string());
    }));

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);

    assert_eq!(status, 0);
    assert!(!scene.exists("y"));
    assert!(scene.exists("x"));
    assert!(scene.exists("z"));
}

#[test]
fn added_lines_are_ignored() {
    let scene = Scene::new();
    let mut host = scene.host();

    // One line deleted, one invented: the count gate keeps everything.
    host.edit = Some(Box::new(|path| {
        support::rewrite_doc(path, |_| "x/\nz@\nintruder\n".to_string());
    }));

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);

    assert_eq!(status, 0);
    assert!(host.saw_message("rr: Nothing to do"));
    assert!(scene.exists("y"));
    assert!(host.removed.is_empty());
}

#[test]
fn declining_the_confirmation_removes_nothing() {
    let scene = Scene::new();
    let mut host = scene.host();
    host.confirm_reply = false;
    host.edit = Some(Box::new(|path| {
        support::rewrite_doc(path, drop_line("y"));
    }));

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);

    assert_eq!(status, 0);
    assert!(scene.exists("y"));
    assert!(host.removed.is_empty());
    assert_eq!(host.prompts.len(), 1);
}

#[test]
fn foreign_targets_resolve_to_absolute_paths() {
    let scene = Scene::new();
    let other = tempfile::tempdir().expect("create other dir");
    std::fs::write(other.path().join("keep"), b"k").expect("write keep");
    std::fs::write(other.path().join("toss"), b"t").expect("write toss");

    let mut host = scene.host();
    host.perform_removals = false;
    host.edit = Some(Box::new(|path| {
        support::rewrite_doc(path, drop_line("toss"));
    }));

    let status = bulk_remove(
        &scene.ctx(),
        &mut host,
        Some(other.path().as_os_str()),
        None,
    );

    assert_eq!(status, 0);
    assert_eq!(host.removed.len(), 1);
    assert_eq!(
        host.removed[0],
        vec![
            OsString::from("rr"),
            other.path().join("toss").into_os_string(),
        ]
    );
}

#[test]
fn an_executable_first_parameter_is_the_editor() {
    let scene = Scene::new();
    let mut host = scene.host();

    let status = bulk_remove(&scene.ctx(), &mut host, Some(OsStr::new("sh")), None);

    // No edits: the flow cancels, but through the requested editor.
    assert_eq!(status, 0);
    assert_eq!(host.launched.len(), 1);
    assert_eq!(host.launched[0][0], OsString::from("sh"));
    assert!(host.opened.is_empty());
    assert!(host.saw_message("rr: Nothing to do"));
}

#[test]
fn a_second_parameter_overrides_the_editor() {
    let scene = Scene::new();
    let other = tempfile::tempdir().expect("create other dir");
    std::fs::write(other.path().join("only"), b"o").expect("write only");

    let mut host = scene.host();
    let status = bulk_remove(
        &scene.ctx(),
        &mut host,
        Some(other.path().as_os_str()),
        Some(OsStr::new("sh")),
    );

    assert_eq!(status, 0);
    assert_eq!(host.launched[0][0], OsString::from("sh"));
}

#[test]
fn unresolvable_parameters_fail_with_posix_errnos() {
    let scene = Scene::new();

    let mut host = scene.host();
    let status = bulk_remove(
        &scene.ctx(),
        &mut host,
        Some(OsStr::new("/no/such/dir-or-program")),
        None,
    );
    assert_eq!(
        std::io::Error::from_raw_os_error(status).kind(),
        ErrorKind::NotFound
    );
    assert!(host.saw_message("rr: "));

    let plain = scene.workspace.path().join("y");
    let mut host = scene.host();
    let status = bulk_remove(&scene.ctx(), &mut host, Some(plain.as_os_str()), None);
    assert_eq!(
        std::io::Error::from_raw_os_error(status).kind(),
        ErrorKind::NotADirectory
    );
}

#[test]
fn an_empty_foreign_directory_is_an_error() {
    let scene = Scene::new();
    let empty = tempfile::tempdir().expect("create empty dir");

    let mut host = scene.host();
    let status = bulk_remove(&scene.ctx(), &mut host, Some(empty.path().as_os_str()), None);

    assert_eq!(status, 1);
    assert!(host.saw_message("Directory empty"));
    assert!(host.opened.is_empty(), "editor must not run");
}

#[test]
fn help_prints_usage_and_succeeds() {
    let scene = Scene::new();
    let mut host = scene.host();

    let status = bulk_remove(&scene.ctx(), &mut host, Some(OsStr::new("--help")), None);
    assert_eq!(status, 0);
    assert!(host.saw_message("Usage: rr"));
}

#[test]
fn remove_collaborator_status_is_surfaced() {
    let scene = Scene::new();
    let mut host = scene.host();
    host.perform_removals = false;
    host.remove_status = 13;
    host.edit = Some(Box::new(|path| {
        support::rewrite_doc(path, drop_line("y"));
    }));

    let status = bulk_remove(&scene.ctx(), &mut host, None, None);
    assert_eq!(status, 13);
}
