use super::{
    discovered, needs_help_child, trim_blank_lines, HELP_NAME, HELP_SHORT, MISSING_DESCRIPTION,
};
use crate::binary::{sub_name, BinaryRunner};
use crate::command::CommandPath;
use crate::config::HelpConfig;
use crate::env::VAR_STYLE;
use crate::error::HelpError;
use crate::flags::Flag;
use crate::godoc::godoc_header;
use crate::style::{Style, DEFAULT_WIDTH};
use crate::writer::LineWriter;
use std::fmt::Write as _;
use std::io::Write;

const MIN_NAME_WIDTH: usize = 11;
const FLAG_INDENT: &str = "   ";
const TABLE_INDENT: &str = "   ";

/// Width of the name column: the longest name, but at least 11 runes.
pub fn name_width<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .map(|name| name.chars().count())
        .fold(MIN_NAME_WIDTH, usize::max)
}

/// Writes the usage of the last command in `path`.
///
/// `first_call` is false for every section after the first one of a
/// recursive dump; such sections get a separator and header, and skip the
/// help row, the hints and the global flags.
pub(crate) fn usage<W: Write>(
    w: &mut LineWriter<W>,
    path: &CommandPath,
    config: &HelpConfig,
    first_call: bool,
) -> Result<(), HelpError> {
    let cmd = path.last();
    let cmd_path = path.name(config.env.prefix());
    if config.style == Style::Short {
        // Parents read this back as a single table cell.
        w.force_verbatim(true);
        writeln!(w, "{}", cmd.short.trim())?;
        w.force_verbatim(false);
        return Ok(());
    }
    if !first_call {
        line_break(w, config.style)?;
        section_header(w, &godoc_header(&cmd_path, cmd.short.trim()))?;
        writeln!(w)?;
    }
    writeln!(w, "{}", trim_blank_lines(&cmd.long))?;
    writeln!(w)?;

    writeln!(w, "Usage:")?;
    let mut invocation = format!("   {cmd_path}");
    if path.iter().any(|node| !node.flags.is_empty()) {
        invocation.push_str(" [flags]");
    }
    let binaries = discovered(cmd, config);
    let has_subcommands = !cmd.children.is_empty() || !binaries.is_empty();
    if cmd.is_runnable() && !cmd.args_name.is_empty() {
        writeln!(w, "{invocation} {}", cmd.args_name)?;
    } else if cmd.is_runnable() || !has_subcommands {
        writeln!(w, "{invocation}")?;
    }
    if has_subcommands {
        writeln!(w, "{invocation} <command>")?;
    }

    if has_subcommands {
        let mut rows: Vec<(String, String)> = cmd
            .children
            .iter()
            .map(|child| (child.name.clone(), child.short.trim().to_string()))
            .collect();
        for binary in &binaries {
            rows.push((
                sub_name(&cmd.name, binary).to_string(),
                binary_short(binary, &cmd_path, config),
            ));
        }
        if first_call && needs_help_child(cmd) {
            rows.push((HELP_NAME.to_string(), HELP_SHORT.to_string()));
        }
        writeln!(w)?;
        writeln!(w, "The {cmd_path} commands are:")?;
        write_table(w, &rows)?;
        if first_call && config.style != Style::GoDoc {
            writeln!(w, "Run \"{cmd_path} help [command]\" for command usage.")?;
        }
    }

    let args_long = trim_blank_lines(&cmd.args_long);
    if cmd.is_runnable() && !args_long.is_empty() {
        writeln!(w)?;
        writeln!(w, "{args_long}")?;
    }

    if !cmd.topics.is_empty() {
        let rows: Vec<(String, String)> = cmd
            .topics
            .iter()
            .map(|topic| (topic.name.clone(), topic.short.trim().to_string()))
            .collect();
        writeln!(w)?;
        writeln!(w, "The {cmd_path} additional help topics are:")?;
        write_table(w, &rows)?;
        if first_call && config.style != Style::GoDoc {
            writeln!(w, "Run \"{cmd_path} help [topic]\" for topic details.")?;
        }
    }

    flags_usage(w, path, config, first_call)
}

fn flags_usage<W: Write>(
    w: &mut LineWriter<W>,
    path: &CommandPath,
    config: &HelpConfig,
    first_call: bool,
) -> Result<(), HelpError> {
    let cmd = path.last();
    let prefix = config.env.prefix();
    let cmd_path = path.name(prefix);
    if !cmd.flags.is_empty() {
        writeln!(w)?;
        writeln!(w, "The {cmd_path} flags are:")?;
        write_flags(w, cmd.flags.iter(), config.style)?;
    }
    // Global flags only belong to the first section.
    if !first_call {
        return Ok(());
    }
    let globals = &config.globals;
    let has_compact = globals.count(true) > 0;
    let has_full = globals.count(false) > 0;
    if config.style != Style::Compact {
        if has_compact || has_full {
            writeln!(w)?;
            writeln!(w, "The global flags are:")?;
            write_flags(w, globals.select(true), config.style)?;
            if has_compact && has_full {
                writeln!(w)?;
            }
            write_flags(w, globals.select(false), config.style)?;
        }
        return Ok(());
    }
    if has_compact {
        writeln!(w)?;
        writeln!(w, "The global flags are:")?;
        write_flags(w, globals.select(true), config.style)?;
    }
    if has_full {
        writeln!(w)?;
        let hint = if !cmd.children.is_empty() {
            format!("Run \"{cmd_path} help -style=full\" to show all global flags.")
        } else if let Some(parent) = path.parent() {
            format!(
                "Run \"{} help -style=full {}\" to show all global flags.",
                parent.name(prefix),
                cmd.name
            )
        } else {
            format!("Run \"{VAR_STYLE}=full {cmd_path} -help\" to show all global flags.")
        };
        writeln!(w, "{hint}")?;
    }
    Ok(())
}

fn write_flags<'a, W: Write>(
    w: &mut LineWriter<W>,
    flags: impl Iterator<Item = &'a Flag>,
    style: Style,
) -> Result<(), HelpError> {
    for flag in flags {
        // Defaults keep generated documentation stable across machines.
        let value = if style == Style::GoDoc {
            &flag.default
        } else {
            &flag.value
        };
        write!(w, " -{}={}", flag.name, value)?;
        w.set_indents(&[FLAG_INDENT]);
        writeln!(w, "{}", trim_blank_lines(&flag.usage))?;
        w.set_indents(&[]);
    }
    Ok(())
}

fn write_table<W: Write>(w: &mut LineWriter<W>, rows: &[(String, String)]) -> Result<(), HelpError> {
    let width = name_width(rows.iter().map(|(name, _)| name.as_str()));
    let hanging = " ".repeat(TABLE_INDENT.len() + width + 1);
    w.set_indents(&[TABLE_INDENT, hanging.as_str()]);
    for (name, short) in rows {
        write!(w, "{name:<width$} {short}")?;
        w.flush()?;
    }
    w.set_indents(&[]);
    Ok(())
}

/// Asks a discovered executable for its one-line description.
fn binary_short(binary: &str, cmd_path: &str, config: &HelpConfig) -> String {
    let env = config.env.clone().with_var(VAR_STYLE, Style::Short.as_str());
    BinaryRunner::new(binary, cmd_path)
        .probe(&env, &["-help"])
        .and_then(|captured| {
            captured
                .combined()
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| MISSING_DESCRIPTION.to_string())
}

/// Visual separator between sections of a recursive dump.
pub(crate) fn line_break<W: Write>(w: &mut LineWriter<W>, style: Style) -> Result<(), HelpError> {
    w.flush()?;
    match style {
        Style::Compact | Style::Full => {
            let width = if w.width() < 0 { DEFAULT_WIDTH } else { w.width() };
            writeln!(w, "{}", "=".repeat(width.max(1) as usize))?;
        }
        Style::GoDoc => writeln!(w)?,
        Style::Short => {}
    }
    w.flush()?;
    Ok(())
}

/// Writes `header` on a line of its own, never reflowed.
pub(crate) fn section_header<W: Write>(w: &mut LineWriter<W>, header: &str) -> Result<(), HelpError> {
    w.force_verbatim(true);
    writeln!(w, "{header}")?;
    w.force_verbatim(false);
    Ok(())
}
