//! Resolved style and width for one help invocation.
//!
//! Precedence: help command flags, then `CMDLINE_STYLE`/`CMDLINE_WIDTH`,
//! then the built-in defaults.

use crate::env::Env;
use crate::error::HelpError;
use crate::flags::GlobalFlags;
use crate::style::Style;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HelpConfig {
    pub env: Env,
    pub style: Style,
    pub width: i32,
    pub globals: Arc<GlobalFlags>,
}

impl HelpConfig {
    pub fn from_env(env: Env, globals: Arc<GlobalFlags>) -> Self {
        let style = env.style();
        let width = env.width();
        HelpConfig {
            env,
            style,
            width,
            globals,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    /// Applies leading `-style`/`-width` flags and returns the remaining
    /// arguments. Accepts `-name=value`, `--name=value` and `-name value`;
    /// stops at `--` or the first non-flag argument.
    pub fn parse_flags(&mut self, args: &[String]) -> Result<Vec<String>, HelpError> {
        let mut idx = 0;
        while idx < args.len() {
            let arg = args[idx].as_str();
            if arg == "--" {
                idx += 1;
                break;
            }
            if arg == "-" || !arg.starts_with('-') {
                break;
            }
            let flag = arg.trim_start_matches('-');
            let (name, inline_value) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (flag, None),
            };
            if name != "style" && name != "width" {
                return Err(HelpError::InvalidFlag(format!("flag provided but not defined: -{name}")));
            }
            let value = match inline_value {
                Some(value) => value,
                None => {
                    idx += 1;
                    args.get(idx)
                        .cloned()
                        .ok_or_else(|| HelpError::InvalidFlag(format!("flag needs an argument: -{name}")))?
                }
            };
            if name == "style" {
                self.style = value.parse()?;
            } else {
                self.width = value.trim().parse().map_err(|_| {
                    HelpError::InvalidFlag(format!("invalid value {value:?} for flag -width"))
                })?;
            }
            idx += 1;
        }
        Ok(args[idx..].to_vec())
    }
}
