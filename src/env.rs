//! Ambient environment consulted while rendering help.

use crate::style::{Style, DEFAULT_WIDTH};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Style override, also propagated to delegates.
pub const VAR_STYLE: &str = "CMDLINE_STYLE";
/// Target width in runes; negative means unlimited.
pub const VAR_WIDTH: &str = "CMDLINE_WIDTH";
/// Command path of the parent process, prepended to rendered paths.
pub const VAR_PREFIX: &str = "CMDLINE_PREFIX";
/// Present when this process renders a section of a parent's recursive dump.
pub const VAR_FIRST_CALL: &str = "CMDLINE_FIRST_CALL";

/// Environment variables visible to the help engine and handed to delegates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Env {
    pub vars: BTreeMap<String, String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the process environment.
    pub fn from_os() -> Self {
        Env {
            vars: std::env::vars().collect(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Style from `CMDLINE_STYLE`, compact when unset or invalid.
    pub fn style(&self) -> Style {
        match self.get(VAR_STYLE) {
            None | Some("") => Style::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = raw, "ignoring invalid {VAR_STYLE}");
                Style::default()
            }),
        }
    }

    /// Width from `CMDLINE_WIDTH`, then the terminal, then [`DEFAULT_WIDTH`].
    pub fn width(&self) -> i32 {
        if let Some(raw) = self.get(VAR_WIDTH).filter(|raw| !raw.is_empty()) {
            match raw.trim().parse::<i32>() {
                Ok(width) => return width,
                Err(_) => tracing::warn!(value = raw, "ignoring invalid {VAR_WIDTH}"),
            }
        }
        terminal_width().unwrap_or(DEFAULT_WIDTH)
    }

    pub fn prefix(&self) -> &str {
        self.get(VAR_PREFIX).unwrap_or_default()
    }

    pub fn first_call(&self) -> bool {
        !self.vars.contains_key(VAR_FIRST_CALL)
    }

    /// Directories listed in `PATH`, in search order.
    pub fn path_dirs(&self) -> Vec<PathBuf> {
        match self.get("PATH") {
            Some(path) => std::env::split_paths(path)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(unix)]
fn terminal_width() -> Option<i32> {
    // SAFETY: TIOCGWINSZ only writes into the zeroed winsize we own.
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
    (rc == 0 && size.ws_col > 0).then(|| i32::from(size.ws_col))
}

#[cfg(not(unix))]
fn terminal_width() -> Option<i32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_defaults_to_compact() {
        assert_eq!(Env::new().style(), Style::Compact);
        assert_eq!(Env::new().with_var(VAR_STYLE, "bogus").style(), Style::Compact);
        assert_eq!(Env::new().with_var(VAR_STYLE, "Full").style(), Style::Full);
    }

    #[test]
    fn explicit_width_wins() {
        assert_eq!(Env::new().with_var(VAR_WIDTH, "42").width(), 42);
        assert_eq!(Env::new().with_var(VAR_WIDTH, "-1").width(), -1);
    }

    #[test]
    fn first_call_is_cleared_by_marker() {
        assert!(Env::new().first_call());
        assert!(!Env::new().with_var(VAR_FIRST_CALL, "1").first_call());
    }

    #[test]
    fn path_dirs_skip_empty_entries() {
        let env = Env::new().with_var("PATH", "/usr/bin::/bin");
        assert_eq!(
            env.path_dirs(),
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]
        );
        assert!(Env::new().path_dirs().is_empty());
    }
}
