use super::usage::{line_break, section_header, usage};
use super::{
    discovered, help_command, needs_help_child, trim_blank_lines, HELP_NAME, MISSING_DESCRIPTION,
};
use crate::binary::{sub_name, BinaryRunner};
use crate::command::{Command, CommandPath};
use crate::config::HelpConfig;
use crate::env::{VAR_FIRST_CALL, VAR_STYLE, VAR_WIDTH};
use crate::error::HelpError;
use crate::godoc::godoc_header;
use crate::style::Style;
use crate::writer::LineWriter;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Arc;

/// Probes tried in order when documenting a discovered executable.
const DUMP_PROBES: [&[&str]; 2] = [&[HELP_NAME, "..."], &["-help"]];

/// Writes usage for the last command in `path` and everything below it,
/// depth first: children in declaration order, discovered executables, the
/// synthesized help command (first call only), then topics.
pub(crate) fn usage_all<W: Write>(
    w: &mut LineWriter<W>,
    path: &CommandPath,
    config: &HelpConfig,
    first_call: bool,
) -> Result<(), HelpError> {
    let cmd = path.last();
    let cmd_path = path.name(config.env.prefix());
    usage(w, path, config, first_call)?;
    for child in &cmd.children {
        usage_all(w, &path.join(Arc::clone(child)), config, false)?;
    }
    for binary in discovered(cmd, config) {
        document_binary(w, cmd, &binary, &cmd_path, config)?;
    }
    if first_call && needs_help_child(cmd) {
        let help = Arc::new(help_command(path, config));
        usage_all(w, &path.join(help), config, false)?;
    }
    for topic in &cmd.topics {
        line_break(w, config.style)?;
        section_header(
            w,
            &godoc_header(&format!("{cmd_path} {}", topic.name), topic.short.trim()),
        )?;
        writeln!(w)?;
        writeln!(w, "{}", trim_blank_lines(&topic.long))?;
    }
    Ok(())
}

/// Splices the recursive help of a discovered executable into the dump, or
/// lists it with a placeholder when it answers neither probe.
fn document_binary<W: Write>(
    w: &mut LineWriter<W>,
    parent: &Command,
    binary: &str,
    cmd_path: &str,
    config: &HelpConfig,
) -> Result<(), HelpError> {
    let runner = BinaryRunner::new(binary, cmd_path);
    let env = config
        .env
        .clone()
        .with_var(VAR_FIRST_CALL, "1")
        .with_var(VAR_STYLE, config.style.as_str())
        .with_var(VAR_WIDTH, config.width.to_string());
    if let Some(captured) = DUMP_PROBES.iter().find_map(|args| runner.probe(&env, args)) {
        // The child's own writer drops its leading blank line.
        if config.style == Style::GoDoc {
            writeln!(w)?;
        }
        w.force_verbatim(true);
        write!(w, "{}", captured.combined())?;
        w.force_verbatim(false);
        return Ok(());
    }
    tracing::debug!(program = binary, "no usable help, listing placeholder");
    line_break(w, config.style)?;
    let name = format!("{cmd_path} {}", sub_name(&parent.name, binary));
    section_header(w, &godoc_header(&name, MISSING_DESCRIPTION))
}
