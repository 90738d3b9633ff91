//! Shared test infrastructure for integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Sibling executable answering the help protocol for `widget extra`.
pub const WIDGET_EXTRA: &str = r#"#!/bin/sh
case "$1" in
    -help)
        if [ "$CMDLINE_STYLE" = "short" ]; then
            echo "Extra widget tooling"
        else
            echo "usage of $CMDLINE_PREFIX extra"
        fi
        ;;
    help)
        if [ "$2" = "..." ]; then
            echo "Widget extra - Extra widget tooling"
            echo
            echo "Extra does extra things for $CMDLINE_PREFIX."
            exit 0
        fi
        echo "extra cannot help with $2" >&2
        exit 3
        ;;
    *)
        exit 1
        ;;
esac
"#;

/// Directory of executables placed on `PATH` for a test.
pub struct ToolDir {
    pub dir: TempDir,
}

impl ToolDir {
    pub fn create() -> Self {
        ToolDir {
            dir: tempfile::tempdir().expect("create tool dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes an executable shell script named `name`.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, body).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("make script executable");
        path
    }
}

#[allow(dead_code)]
pub fn gendoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gendoc"))
}

pub fn widget_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_widget"))
}

/// Runs `widget` with only `PATH` and `vars` set.
#[allow(dead_code)]
pub fn run_widget(path: &Path, vars: &[(&str, &str)], args: &[&str]) -> Output {
    let mut cmd = Command::new(widget_bin());
    cmd.args(args).env_clear().env("PATH", path);
    for (key, value) in vars {
        cmd.env(key, value);
    }
    cmd.output().expect("run widget")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
