//! Read-only view of flag registries used for layout.
//!
//! Parsing and storage of flag values belong to the embedding application;
//! the help engine only needs each flag's name, usage, live value and
//! default value.

use regex::Regex;
use std::collections::BTreeMap;

/// A single flag as shown in usage output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub usage: String,
    pub value: String,
    pub default: String,
}

impl Flag {
    /// A flag whose live value equals its default.
    pub fn new(name: impl Into<String>, default: impl Into<String>, usage: impl Into<String>) -> Self {
        let default = default.into();
        Flag {
            name: name.into(),
            usage: usage.into(),
            value: default.clone(),
            default,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Flags keyed by name, visited in lexicographic order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: BTreeMap<String, Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a flag.
    pub fn insert(&mut self, flag: Flag) {
        self.flags.insert(flag.name.clone(), flag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

/// Process-wide global flags plus the patterns selecting which of them stay
/// visible in compact style.
///
/// Built once by the application and handed to the renderer through
/// [`crate::HelpConfig`].
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    flags: FlagSet,
    // None: every name is visible. Some(empty): no name is visible.
    non_hidden: Option<Vec<Regex>>,
}

impl GlobalFlags {
    pub fn new(flags: FlagSet) -> Self {
        GlobalFlags {
            flags,
            non_hidden: None,
        }
    }

    /// Hides global flags from compact usage, except names matching any of
    /// `patterns`. Repeated calls accumulate patterns.
    pub fn hide_except(mut self, patterns: impl IntoIterator<Item = Regex>) -> Self {
        self.non_hidden
            .get_or_insert_with(Vec::new)
            .extend(patterns);
        self
    }

    /// Whether `name` is shown in compact style.
    pub fn is_visible(&self, name: &str) -> bool {
        match &self.non_hidden {
            None => true,
            Some(patterns) => patterns.iter().any(|re| re.is_match(name)),
        }
    }

    /// Global flags whose visibility equals `visible`, in name order.
    pub fn select(&self, visible: bool) -> impl Iterator<Item = &Flag> {
        self.flags
            .iter()
            .filter(move |flag| self.is_visible(&flag.name) == visible)
    }

    pub fn count(&self, visible: bool) -> usize {
        self.select(visible).count()
    }
}
