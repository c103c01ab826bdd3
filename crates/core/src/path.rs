//! Small path helpers shared by the bulk flows.

use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// Removes backslash escapes from a command-line file name.
///
/// The prompt loop escapes spaces and shell metacharacters with backslashes
/// when completing file names; a backslash quotes the byte that follows it.
/// A trailing lone backslash is dropped. Returns `None` when nothing
/// remains after unescaping.
#[must_use]
pub fn unescape(arg: &OsStr) -> Option<OsString> {
    let bytes = arg.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter();
    while let Some(&b) = iter.next() {
        if b == b'\\' {
            if let Some(&escaped) = iter.next() {
                out.push(escaped);
            }
        } else {
            out.push(b);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(OsString::from_vec(out))
    }
}

/// Abbreviates a path under `$HOME` to the `~/` form for display.
///
/// Paths outside the home directory, and paths when `$HOME` is unset, come
/// back unchanged.
#[must_use]
pub fn abbreviate_home(path: &OsStr) -> OsString {
    let Some(home) = env::var_os("HOME").filter(|h| !h.is_empty()) else {
        return path.to_os_string();
    };

    let bytes = path.as_bytes();
    let home_bytes = home.as_bytes();
    let home_bytes = home_bytes.strip_suffix(b"/").unwrap_or(home_bytes);

    match bytes.strip_prefix(home_bytes) {
        Some(rest) if rest.is_empty() => OsString::from("~"),
        Some(rest) if rest.starts_with(b"/") => {
            let mut out = Vec::with_capacity(1 + rest.len());
            out.push(b'~');
            out.extend_from_slice(rest);
            OsString::from_vec(out)
        }
        _ => path.to_os_string(),
    }
}

/// Resolves a program name the way the shell would.
///
/// Names containing a slash are checked directly; bare names are searched
/// in `$PATH`. A hit must be a regular file with at least one execute bit.
#[must_use]
pub fn find_in_path(name: &OsStr) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.as_bytes().contains(&b'/') {
        let candidate = PathBuf::from(name);
        return is_executable(&candidate).then_some(candidate);
    }

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(candidate: &std::path::Path) -> bool {
    std::fs::metadata(candidate)
        .map(|md| md.is_file() && md.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
