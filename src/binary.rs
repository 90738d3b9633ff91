//! External `<parent>-<sub>` executables that extend the command tree.
//!
//! Discovery is recomputed on every call; nothing is cached because the
//! search path may change between invocations.

use crate::env::{Env, VAR_PREFIX};
use crate::error::HelpError;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// Whether an executable called `name` exists in `dirs`.
pub fn look_path(name: &str, dirs: &[PathBuf]) -> bool {
    find_executable(name, dirs).is_some()
}

/// Executables in `dirs` named `<parent>-<sub>` whose `<sub>` is not in
/// `exclude`, sorted and deduplicated by name.
pub fn look_path_all(parent: &str, dirs: &[PathBuf], exclude: &BTreeSet<String>) -> Vec<String> {
    let Ok(paths) = std::env::join_paths(dirs) else {
        tracing::debug!(parent, "search path contains an invalid directory");
        return Vec::new();
    };
    let pattern = format!("^{}-.+$", regex::escape(parent));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Ok(found) = which::which_re_in(re, Some(paths)) else {
        return Vec::new();
    };
    let prefix = format!("{parent}-");
    found
        .filter_map(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .filter(|name| {
            name.strip_prefix(&prefix)
                .map(|sub| !exclude.contains(sub))
                .unwrap_or(false)
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Strips the `<parent>-` prefix from a discovered executable name.
pub fn sub_name<'a>(parent: &str, binary: &'a str) -> &'a str {
    binary
        .strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(binary)
}

fn find_executable(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let paths = std::env::join_paths(dirs).ok()?;
    which::which_in(name, Some(paths), Path::new(".")).ok()
}

/// Output and status of one delegate invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captured {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, as seen on a shared stream.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Runs a discovered executable on behalf of the command at `prefix`.
#[derive(Clone, Debug)]
pub struct BinaryRunner {
    pub name: String,
    pub prefix: String,
}

impl BinaryRunner {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        BinaryRunner {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    /// Runs the executable with `env` as its entire environment plus
    /// `CMDLINE_PREFIX`, capturing its output.
    pub fn run(&self, env: &Env, args: &[&str]) -> Result<Captured, HelpError> {
        let program = find_executable(&self.name, &env.path_dirs()).ok_or_else(|| {
            HelpError::Launch {
                program: self.name.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found on PATH"),
            }
        })?;
        let start = Instant::now();
        let output = Command::new(&program)
            .args(args)
            .env_clear()
            .envs(&env.vars)
            .env(VAR_PREFIX, &self.prefix)
            .output()
            .map_err(|source| HelpError::Launch {
                program: self.name.clone(),
                source,
            })?;
        let captured = Captured {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        tracing::debug!(
            program = %program.display(),
            ?args,
            code = ?captured.code,
            elapsed_ms = start.elapsed().as_millis(),
            stdout_bytes = captured.stdout.len(),
            "delegate finished"
        );
        Ok(captured)
    }

    /// Runs one documentation probe. Any failure, including a non-zero exit,
    /// yields `None` so callers can fall through to the next probe.
    pub fn probe(&self, env: &Env, args: &[&str]) -> Option<Captured> {
        match self.run(env, args) {
            Ok(captured) if captured.success() => Some(captured),
            Ok(captured) => {
                tracing::debug!(program = %self.name, ?args, code = ?captured.code, "probe rejected");
                None
            }
            Err(err) => {
                tracing::debug!(program = %self.name, ?args, error = %err, "probe failed");
                None
            }
        }
    }
}
