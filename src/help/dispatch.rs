use super::usage::usage;
use super::walk::usage_all;
use super::{help_command, trim_blank_lines, HELP_NAME};
use crate::binary::{look_path, BinaryRunner};
use crate::command::CommandPath;
use crate::config::HelpConfig;
use crate::env::VAR_STYLE;
use crate::error::HelpError;
use crate::writer::LineWriter;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Arc;

/// Resolves `args` below the last command of `path` and writes the result.
pub(crate) fn run_help<W: Write>(
    w: &mut LineWriter<W>,
    stderr: &mut dyn Write,
    args: &[String],
    path: &CommandPath,
    config: &HelpConfig,
) -> Result<(), HelpError> {
    let Some((segment, rest)) = args.split_first() else {
        return usage(w, path, config, config.env.first_call());
    };
    if segment == "..." {
        return usage_all(w, path, config, config.env.first_call());
    }
    let cmd = path.last();
    if let Some(child) = cmd.find_child(segment) {
        return run_help(w, stderr, rest, &path.join(Arc::clone(child)), config);
    }
    if segment == HELP_NAME {
        let help = Arc::new(help_command(path, config));
        return run_help(w, stderr, rest, &path.join(help), config);
    }
    // Names with a path separator would resolve outside the search path.
    if cmd.look_path && !segment.contains(['/', std::path::MAIN_SEPARATOR]) {
        let binary = format!("{}-{}", cmd.name, segment);
        if look_path(&binary, &config.env.path_dirs()) {
            return delegate(w, stderr, &binary, rest, path, config);
        }
    }
    if let Some(topic) = cmd.find_topic(segment) {
        writeln!(w, "{}", trim_blank_lines(&topic.long))?;
        return Ok(());
    }
    let err = HelpError::UnknownCommand {
        path: path.name(config.env.prefix()),
        segment: segment.clone(),
    };
    report_usage_error(stderr, path, config, &err)?;
    Err(err)
}

/// Re-invokes a discovered executable for help and passes its output and
/// exit status through untouched.
fn delegate<W: Write>(
    w: &mut LineWriter<W>,
    stderr: &mut dyn Write,
    binary: &str,
    rest: &[String],
    path: &CommandPath,
    config: &HelpConfig,
) -> Result<(), HelpError> {
    let runner = BinaryRunner::new(binary, path.name(config.env.prefix()));
    let env = config.env.clone().with_var(VAR_STYLE, config.style.as_str());
    let args: Vec<&str> = if rest.is_empty() {
        vec!["-help"]
    } else {
        std::iter::once(HELP_NAME)
            .chain(rest.iter().map(String::as_str))
            .collect()
    };
    tracing::info!(program = binary, ?args, "delegating help");
    let captured = runner.run(&env, &args)?;
    w.write_raw(&captured.stdout)?;
    stderr.write_all(captured.stderr.as_bytes())?;
    match captured.code {
        Some(0) => Ok(()),
        Some(code) => Err(HelpError::ExitCode(code)),
        // Killed by a signal.
        None => Err(HelpError::ExitCode(1)),
    }
}

/// Reports `err` on `stderr` followed by the usage of `path`.
pub(crate) fn report_usage_error(
    stderr: &mut dyn Write,
    path: &CommandPath,
    config: &HelpConfig,
    err: &HelpError,
) -> Result<(), HelpError> {
    let mut w = LineWriter::new(stderr, config.width);
    writeln!(w, "ERROR: {err}")?;
    writeln!(w)?;
    usage(&mut w, path, config, config.env.first_call())?;
    w.flush()?;
    Ok(())
}
