//! A small tool built on cmdline-help, used to try help rendering and
//! delegation by hand and in integration tests.
//!
//! `widget help ...` documents the whole tree, including any `widget-<sub>`
//! executables found on `PATH`.

use anyhow::{bail, Result};
use cmdline_help::{
    Command, CommandPath, Env, Flag, FlagSet, GlobalFlags, HelpConfig, HelpError, HelpRunner,
    Runner, Topic, HELP_NAME,
};
use regex::Regex;
use std::process::ExitCode;
use std::sync::Arc;

struct Echo(&'static str);

impl Runner for Echo {
    fn run(&self, _env: &Env, args: &[String]) -> Result<()> {
        println!("{} {}", self.0, args.join(" "));
        Ok(())
    }
}

fn tree() -> Command {
    Command::new("widget", "Manages widgets")
        .long("Widget manages widgets and the stores that hold them.")
        .child(
            Command::new("build", "Builds widgets")
                .long("Build assembles widgets from their parts.")
                .args("<name>...", "<name>... lists the widgets to build.")
                .flag(Flag::new("parallel", "1", "Number of widgets built at once."))
                .runner(Arc::new(Echo("building"))),
        )
        .child(
            Command::new("store", "Manages widget stores")
                .long("Store manages the places widgets are kept.")
                .child(
                    Command::new("list", "Lists stores")
                        .long("List prints every known store.")
                        .runner(Arc::new(Echo("stores:"))),
                ),
        )
        .topic(Topic::new(
            "stores",
            "Description of widget stores",
            "A store is a directory holding widgets.\n\nStores are listed with:\n   widget store list",
        ))
        .look_path(true)
}

fn globals() -> Result<GlobalFlags> {
    let flags: FlagSet = [
        Flag::new("v", "0", "Log level for verbose output."),
        Flag::new("log_dir", "", "Write log files to this directory."),
    ]
    .into_iter()
    .collect();
    Ok(GlobalFlags::new(flags).hide_except([Regex::new("^v$")?]))
}

fn dispatch(path: &CommandPath, config: &HelpConfig, args: &[String]) -> Result<()> {
    let cmd = path.last();
    let help = HelpRunner::new(path.clone(), config.clone());
    let Some((first, rest)) = args.split_first() else {
        return match &cmd.runner {
            Some(runner) => runner.run(&config.env, args),
            None => Ok(help.write_usage(std::io::stdout().lock())?),
        };
    };
    if first == "-help" || first == "--help" {
        return Ok(help.write_usage(std::io::stdout().lock())?);
    }
    if let Some(child) = cmd.find_child(first) {
        return dispatch(&path.join(Arc::clone(child)), config, rest);
    }
    if first == HELP_NAME && (!cmd.children.is_empty() || cmd.look_path) {
        return help.run(&config.env, rest);
    }
    match &cmd.runner {
        Some(runner) => runner.run(&config.env, args),
        None => bail!("{}: unknown command {first:?}", path.name(config.env.prefix())),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = globals().and_then(|globals| {
        let config = HelpConfig::from_env(Env::from_os(), Arc::new(globals));
        let path = CommandPath::root(Arc::new(tree()));
        let args: Vec<String> = std::env::args().skip(1).collect();
        dispatch(&path, &config, &args)
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let help_err = err.downcast_ref::<HelpError>();
            // Usage errors and delegate failures have already been reported.
            let reported =
                help_err.is_some_and(|e| e.is_usage() || matches!(e, HelpError::ExitCode(_)));
            if !reported {
                eprintln!("ERROR: {err:#}");
            }
            let code = help_err.map_or(2, HelpError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
