//! Presentation styles for usage output.

use crate::error::HelpError;
use std::fmt;
use std::str::FromStr;

/// Width used for visual separators when wrapping is unlimited, and the
/// fallback when neither the environment nor the terminal provide one.
pub const DEFAULT_WIDTH: i32 = 80;

/// Rendering mode for help output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// Terse output that hides most global flags.
    #[default]
    Compact,
    /// Shows every global flag.
    Full,
    /// Headers and spacing tuned for documentation generators; flag defaults
    /// replace live values so the output is reproducible.
    GoDoc,
    /// Only the one-line short description.
    Short,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Compact => "compact",
            Style::Full => "full",
            Style::GoDoc => "godoc",
            Style::Short => "short",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = HelpError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Style::Compact),
            "full" => Ok(Style::Full),
            "godoc" => Ok(Style::GoDoc),
            "short" => Ok(Style::Short),
            _ => Err(HelpError::InvalidStyle(value.to_string())),
        }
    }
}
