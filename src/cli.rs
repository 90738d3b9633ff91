//! CLI argument parsing for gendoc.
use clap::Parser;
use cmdline_help::gendoc::{SuppressDefault, DEFAULT_OUT};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "gendoc",
    version,
    about = "Generate Rust doc comments describing the usage of a command-line tool",
    after_help = "Runs <BINARY> with CMDLINE_STYLE=godoc (as `<BINARY> help ...` unless ARGS are given)\nand writes the output as crate docs.\n\nExamples:\n  gendoc --out src/doc.rs ./target/release/tool\n  gendoc --env= --postprocess-output ./build/tool\n  gendoc --go-flag-pkg --suppress-default parallel='<number of CPUs>' ./tool -help"
)]
pub struct GenDocArgs {
    /// Environment for the tool: "os" inherits the current one, empty sets nothing,
    /// otherwise comma-separated KEY1=VALUE1,KEY2=VALUE2 entries
    #[arg(long, value_name = "SPEC", default_value = "os")]
    pub env: String,

    /// Path to the output file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUT)]
    pub out: PathBuf,

    /// Read usage from stderr rather than stdout and ignore the exit status
    #[arg(long)]
    pub use_stderr: bool,

    /// Remove absolute path prefixes of the tool's directory from the output
    #[arg(long)]
    pub postprocess_output: bool,

    /// Shorthand for --use-stderr --postprocess-output, for tools that print
    /// flag-package style usage to stderr
    #[arg(long)]
    pub go_flag_pkg: bool,

    /// File whose contents are prepended to the generated file
    #[arg(long, value_name = "FILE")]
    pub copyright_notice: Option<PathBuf>,

    /// Also write a JSON run report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Replace numeric defaults of a flag, e.g. test.parallel='<number of threads>'
    #[arg(long, value_name = "FLAG=PLACEHOLDER")]
    pub suppress_default: Vec<SuppressDefault>,

    /// Tool to document; bare names are looked up on PATH
    #[arg(value_name = "BINARY")]
    pub binary: PathBuf,

    /// Arguments that make the tool print its usage
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
