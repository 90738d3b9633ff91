//! Help and usage rendering for hierarchical command-line tools.
//!
//! Given a tree of [`Command`]s, the engine renders usage text in several
//! [`Style`]s, documents whole trees recursively (`help ...`), and extends
//! the tree with `<parent>-<sub>` executables found on `PATH`, asking them
//! for their own usage and splicing it into the parent's output.
//!
//! ```no_run
//! use cmdline_help::{Command, CommandPath, Env, HelpConfig, HelpRunner};
//! use std::sync::Arc;
//!
//! let root = Arc::new(
//!     Command::new("tool", "Does things")
//!         .child(Command::new("build", "Builds things"))
//!         .look_path(true),
//! );
//! let config = HelpConfig::from_env(Env::from_os(), Arc::default());
//! let help = HelpRunner::new(CommandPath::root(root), config);
//! help.run_with(&["...".to_string()], std::io::stdout(), std::io::stderr())?;
//! # Ok::<(), cmdline_help::HelpError>(())
//! ```

pub mod binary;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod flags;
pub mod gendoc;
pub mod godoc;
pub mod help;
pub mod style;
pub mod writer;

pub use command::{Command, CommandPath, Runner, Topic};
pub use config::HelpConfig;
pub use env::Env;
pub use error::HelpError;
pub use flags::{Flag, FlagSet, GlobalFlags};
pub use help::{HelpRunner, HELP_NAME, MISSING_DESCRIPTION};
pub use style::{Style, DEFAULT_WIDTH};
pub use writer::LineWriter;
