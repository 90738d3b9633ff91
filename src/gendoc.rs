//! Generates a Rust source file whose crate docs hold a tool's usage.
//!
//! The tool runs with `CMDLINE_STYLE=godoc` (by default as `help ...`) and
//! its directory first on `PATH`, so sibling `<tool>-<sub>` executables are
//! documented too. The captured text is wrapped in an inner block doc
//! comment below an auto-generated notice.

use crate::env::{Env, VAR_STYLE};
use crate::style::Style;
use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use std::time::Instant;

pub const DEFAULT_ARGS: [&str; 2] = ["help", "..."];
pub const DEFAULT_OUT: &str = "./doc.rs";

const NOTICE: &str = "// This file was auto-generated by gendoc.\n// DO NOT UPDATE MANUALLY\n";

/// Test binaries default this flag to the machine's thread count.
const PARALLEL_FLAG: &str = "test.parallel";
const PARALLEL_PLACEHOLDER: &str = "<number of threads>";

/// Where the documented tool's environment comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvSpec {
    /// Inherit the current process environment.
    Os,
    /// Exactly these variables.
    Vars(Vec<(String, String)>),
}

impl FromStr for EnvSpec {
    type Err = anyhow::Error;

    /// `os`, empty, or `KEY1=VALUE1,KEY2=VALUE2,...`.
    fn from_str(raw: &str) -> Result<Self> {
        if raw == "os" {
            return Ok(EnvSpec::Os);
        }
        let mut vars = Vec::new();
        for pair in raw.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid env entry: {pair}"))?;
            if key.is_empty() {
                bail!("invalid env entry: {pair}");
            }
            vars.push((key.to_string(), value.to_string()));
        }
        Ok(EnvSpec::Vars(vars))
    }
}

/// Rewrites ` -<flag>=<digits>` lines to ` -<flag>=<placeholder>` so
/// machine-dependent defaults do not leak into generated docs.
#[derive(Clone, Debug)]
pub struct SuppressDefault {
    pub flag: String,
    pub placeholder: String,
    pattern: Regex,
}

impl SuppressDefault {
    pub fn new(flag: &str, placeholder: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?m)^( -{}=)\d+$", regex::escape(flag)))
            .with_context(|| format!("compile pattern for flag {flag}"))?;
        Ok(SuppressDefault {
            flag: flag.to_string(),
            placeholder: placeholder.to_string(),
            pattern,
        })
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures| format!("{}{}", &caps[1], self.placeholder))
            .into_owned()
    }
}

impl FromStr for SuppressDefault {
    type Err = anyhow::Error;

    /// `<flag>=<placeholder>`.
    fn from_str(raw: &str) -> Result<Self> {
        let (flag, placeholder) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("expected <flag>=<placeholder>, got {raw:?}"))?;
        let flag = flag.trim_start_matches('-');
        if flag.is_empty() {
            bail!("expected <flag>=<placeholder>, got {raw:?}");
        }
        SuppressDefault::new(flag, placeholder)
    }
}

/// One documentation run.
#[derive(Clone, Debug)]
pub struct GenDoc {
    pub binary: PathBuf,
    pub args: Vec<String>,
    pub env: EnvSpec,
    pub use_stderr: bool,
    pub postprocess: bool,
    pub copyright: Option<String>,
    pub suppress: Vec<SuppressDefault>,
}

/// Summary written with `--report`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub binary: String,
    pub args: Vec<String>,
    pub out: String,
    pub bytes: usize,
    pub elapsed_ms: u128,
}

impl GenDoc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        GenDoc {
            binary: binary.into(),
            args: Vec::new(),
            env: EnvSpec::Os,
            use_stderr: false,
            postprocess: false,
            copyright: None,
            suppress: Vec::new(),
        }
    }

    /// Arguments passed to the tool, `help ...` when none were given.
    pub fn run_args(&self) -> Vec<String> {
        if self.args.is_empty() {
            DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect()
        } else {
            self.args.clone()
        }
    }

    /// The built-in `test.parallel` rule followed by the configured ones.
    pub fn suppress_rules(&self) -> Result<Vec<SuppressDefault>> {
        let mut rules = vec![SuppressDefault::new(PARALLEL_FLAG, PARALLEL_PLACEHOLDER)?];
        rules.extend(self.suppress.iter().cloned());
        Ok(rules)
    }

    /// Runs the tool and returns the complete generated source file.
    pub fn generate(&self) -> Result<String> {
        let program = resolve_binary(&self.binary)?;
        let bin_dir = program
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("binary {} has no parent directory", program.display()))?;
        let env = run_environment(&self.env, &bin_dir)?;
        let usage = self.capture(&program, &bin_dir, &env)?;
        let body = post_process(&usage, &bin_dir, self.postprocess, &self.suppress_rules()?);
        Ok(render_document(self.copyright.as_deref(), &body))
    }

    /// Generates the source file and writes it to `out`.
    pub fn write(&self, out: &Path) -> Result<Report> {
        let start = Instant::now();
        let doc = self.generate()?;
        std::fs::write(out, &doc).with_context(|| format!("write {}", out.display()))?;
        let report = Report {
            binary: self.binary.display().to_string(),
            args: self.run_args(),
            out: out.display().to_string(),
            bytes: doc.len(),
            elapsed_ms: start.elapsed().as_millis(),
        };
        tracing::info!(
            out = %out.display(),
            bytes = report.bytes,
            elapsed_ms = report.elapsed_ms,
            "documentation written"
        );
        Ok(report)
    }

    fn capture(&self, program: &Path, bin_dir: &Path, env: &Env) -> Result<String> {
        let args = self.run_args();
        let output = Command::new(program)
            .args(&args)
            .current_dir(bin_dir)
            .env_clear()
            .envs(&env.vars)
            .output()
            .with_context(|| format!("run {}", program.display()))?;
        let captured = if self.use_stderr {
            &output.stderr
        } else {
            &output.stdout
        };
        let captured = String::from_utf8_lossy(captured).to_string();
        tracing::debug!(
            program = %program.display(),
            ?args,
            code = ?output.status.code(),
            bytes = captured.len(),
            "usage captured"
        );
        if !output.status.success() {
            if !self.use_stderr {
                bail!(
                    "\"{} {}\" failed: {}\n{}",
                    program.display(),
                    args.join(" "),
                    output.status,
                    captured
                );
            }
            tracing::warn!(status = %output.status, "ignoring exit status");
        }
        Ok(captured)
    }
}

/// Locates `binary`: paths are used as given, bare names are searched on
/// `PATH`.
fn resolve_binary(binary: &Path) -> Result<PathBuf> {
    let resolved = if binary.components().count() > 1 {
        binary.to_path_buf()
    } else {
        which::which(binary).with_context(|| format!("find {} on PATH", binary.display()))?
    };
    std::fs::canonicalize(&resolved).with_context(|| format!("resolve {}", resolved.display()))
}

/// Environment for the documented tool: `spec`, with `bin_dir` first on
/// `PATH` and the godoc style selected.
pub fn run_environment(spec: &EnvSpec, bin_dir: &Path) -> Result<Env> {
    let mut env = match spec {
        EnvSpec::Os => Env::from_os(),
        EnvSpec::Vars(vars) => vars
            .iter()
            .fold(Env::new(), |env, (key, value)| env.with_var(key, value)),
    };
    let mut dirs = vec![bin_dir.to_path_buf()];
    if let Some(path) = env.get("PATH") {
        dirs.extend(std::env::split_paths(path));
    }
    let path = std::env::join_paths(dirs).context("build PATH for documented binary")?;
    env.set("PATH", path.to_string_lossy());
    env.set(VAR_STYLE, Style::GoDoc.as_str());
    Ok(env)
}

/// Applies flag default suppression and, when `strip_dir` is set, removes
/// `bin_dir` prefixes from absolute paths in the output.
pub fn post_process(body: &str, bin_dir: &Path, strip_dir: bool, suppress: &[SuppressDefault]) -> String {
    let mut out = suppress
        .iter()
        .fold(body.to_string(), |text, rule| rule.apply(&text));
    if strip_dir {
        let prefix = format!("{}{}", bin_dir.display(), std::path::MAIN_SEPARATOR);
        out = out.replace(&prefix, "");
    }
    out
}

/// Wraps `body` in an inner block doc comment below the optional copyright
/// notice and the auto-generated marker.
pub fn render_document(copyright: Option<&str>, body: &str) -> String {
    let mut doc = String::new();
    if let Some(copyright) = copyright {
        doc.push_str(copyright);
        if !copyright.is_empty() && !copyright.ends_with('\n') {
            doc.push('\n');
        }
    }
    doc.push_str(NOTICE);
    doc.push('\n');
    doc.push_str("/*!\n");
    // Block comments nest in Rust; keep usage text from opening or closing one.
    let body = body.replace("/*", "&#47;*").replace("*/", "*&#47;");
    doc.push_str(&body);
    if !body.is_empty() && !body.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str("*/\n");
    doc
}
