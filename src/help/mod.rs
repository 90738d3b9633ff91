//! The built-in `help` command.
//!
//! A [`HelpRunner`] answers help requests for the last command of its path:
//! plain usage, recursive `help ...` dumps, `help <path...>` lookups, and the
//! `-help` response. Commands that have children (or search `PATH` for
//! `<name>-<sub>` executables) get a `help` child synthesized on demand; it
//! is never stored in the tree.

mod dispatch;
mod usage;
mod walk;

use crate::binary::look_path_all;
use crate::command::{Command, CommandPath, Runner};
use crate::config::HelpConfig;
use crate::env::Env;
use crate::error::HelpError;
use crate::flags::Flag;
use crate::writer::LineWriter;
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

pub use usage::name_width;

pub const HELP_NAME: &str = "help";
pub const MISSING_DESCRIPTION: &str = "No description available";

const HELP_SHORT: &str = "Display help for commands or topics";

const HELP_LONG: &str = "
Help with no args displays the usage of the parent command.

Help with args displays the usage of the specified sub-command or help topic.

\"help ...\" recursively displays help for all commands and topics.
";

const HELP_ARGS_NAME: &str = "[command/topic ...]";

const HELP_ARGS_LONG: &str = "
[command/topic ...] optionally identifies a specific sub-command or help topic.
";

const STYLE_USAGE: &str = "
The formatting style for help output:
   compact - Good for compact cmdline output.
   full    - Good for cmdline output, shows all global flags.
   godoc   - Good for godoc processing.
   short   - One line of description only.
Override the default by setting the CMDLINE_STYLE environment variable.
";

const WIDTH_USAGE: &str = "
Format output to this target width in runes, or unlimited if width < 0.
Defaults to the terminal width if available.  Override the default by setting
the CMDLINE_WIDTH environment variable.
";

/// Runs help for the last command in its path.
#[derive(Clone, Debug)]
pub struct HelpRunner {
    path: CommandPath,
    config: HelpConfig,
}

impl HelpRunner {
    pub fn new(path: CommandPath, config: HelpConfig) -> Self {
        HelpRunner { path, config }
    }

    /// The `help` command synthesized as a child of the runner's command.
    /// Its flags show the style and width this runner resolved.
    pub fn command(&self) -> Command {
        Command::new(HELP_NAME, HELP_SHORT)
            .long(HELP_LONG)
            .args(HELP_ARGS_NAME, HELP_ARGS_LONG)
            .flag(Flag::new("style", "compact", STYLE_USAGE).with_value(self.config.style.as_str()))
            .flag(
                Flag::new("width", "<terminal width>", WIDTH_USAGE)
                    .with_value(self.config.width.to_string()),
            )
            .runner(Arc::new(self.clone()))
    }

    /// Handles `help [-style=..] [-width=..] [command/topic ...]`.
    ///
    /// Usage goes to `stdout`. Unknown paths and bad flags are reported on
    /// `stderr` together with usage and returned as errors.
    pub fn run_with<W: Write, E: Write>(
        &self,
        args: &[String],
        stdout: W,
        mut stderr: E,
    ) -> Result<(), HelpError> {
        let mut config = self.config.clone();
        let args = match config.parse_flags(args) {
            Ok(args) => args,
            Err(err) => {
                let help_path = self.path.join(Arc::new(self.command()));
                dispatch::report_usage_error(&mut stderr, &help_path, &self.config, &err)?;
                return Err(err);
            }
        };
        let mut w = LineWriter::new(stdout, config.width);
        let result = dispatch::run_help(&mut w, &mut stderr, &args, &self.path, &config);
        w.flush()?;
        result
    }

    /// Writes the `-help` response: usage of the runner's command.
    pub fn write_usage<W: Write>(&self, sink: W) -> Result<(), HelpError> {
        let mut w = LineWriter::new(sink, self.config.width);
        usage::usage(&mut w, &self.path, &self.config, self.config.env.first_call())?;
        w.flush()?;
        Ok(())
    }

    /// Writes `help ...` output for the runner's command.
    pub fn write_all<W: Write>(&self, sink: W) -> Result<(), HelpError> {
        let mut w = LineWriter::new(sink, self.config.width);
        walk::usage_all(&mut w, &self.path, &self.config, self.config.env.first_call())?;
        w.flush()?;
        Ok(())
    }
}

impl Runner for HelpRunner {
    fn run(&self, _env: &Env, args: &[String]) -> anyhow::Result<()> {
        let stdout = std::io::stdout().lock();
        let stderr = std::io::stderr().lock();
        self.run_with(args, stdout, stderr)?;
        Ok(())
    }
}

/// The synthesized `help` child for the last command of `path`.
pub(crate) fn help_command(path: &CommandPath, config: &HelpConfig) -> Command {
    HelpRunner::new(path.clone(), config.clone()).command()
}

/// Whether `cmd` gets a synthesized `help` child.
pub(crate) fn needs_help_child(cmd: &Command) -> bool {
    cmd.find_child(HELP_NAME).is_none() && (!cmd.children.is_empty() || cmd.look_path)
}

/// Drops blank lines around `text` and trailing whitespace, keeping the
/// indentation of the first line so leading verbatim blocks stay verbatim.
pub(crate) fn trim_blank_lines(text: &str) -> &str {
    let text = text.trim_end();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &text[start..]
}

/// Executables extending `cmd`, excluding names it already declares.
pub(crate) fn discovered(cmd: &Command, config: &HelpConfig) -> Vec<String> {
    if !cmd.look_path {
        return Vec::new();
    }
    let mut declared: BTreeSet<String> = cmd.children.iter().map(|child| child.name.clone()).collect();
    declared.insert(HELP_NAME.to_string());
    look_path_all(&cmd.name, &config.env.path_dirs(), &declared)
}
