use anyhow::{Context, Result};
use clap::Parser;
use cmdline_help::gendoc::{EnvSpec, GenDoc, Report};
use std::path::Path;

mod cli;

use cli::GenDocArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = GenDocArgs::parse();
    run(args)
}

fn run(args: GenDocArgs) -> Result<()> {
    let env: EnvSpec = args.env.parse().context("parse --env")?;
    let copyright = match &args.copyright_notice {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("read copyright notice {}", path.display()))?,
        ),
        None => None,
    };
    let gendoc = GenDoc {
        binary: args.binary,
        args: args.args,
        env,
        use_stderr: args.use_stderr || args.go_flag_pkg,
        postprocess: args.postprocess_output || args.go_flag_pkg,
        copyright,
        suppress: args.suppress_default,
    };
    let report = gendoc.write(&args.out)?;
    if let Some(path) = &args.report {
        write_json(path, &report)?;
    }
    Ok(())
}

fn write_json(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
