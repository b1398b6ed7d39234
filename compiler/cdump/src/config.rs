//! Traversal configuration.

use std::fmt;
use std::str::FromStr;

/// How the registry numbers nodes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IdScheme {
    /// 0, 1, 2, ... in first-visit order.
    #[default]
    Sequential,
    /// The node's arena index. Stable for the same ingested input no matter
    /// which roots are visited first.
    NodeIndex,
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "node-index" => Ok(Self::NodeIndex),
            other => Err(format!(
                "unknown id scheme `{other}` (expected `sequential` or `node-index`)"
            )),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::NodeIndex => write!(f, "node-index"),
        }
    }
}

/// Settings for one dump run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DumpConfig {
    pub id_scheme: IdScheme,
    /// Suffix on every id token, so several runs can share one stream.
    pub run_id: u32,
    /// Grow the stack on demand during recursion.
    pub grow_stack: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::Sequential,
            run_id: 0,
            grow_stack: true,
        }
    }
}

impl DumpConfig {
    pub const RUN_ID_VAR: &'static str = "CDUMP_RUN_ID";
    pub const ID_SCHEME_VAR: &'static str = "CDUMP_ID_SCHEME";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id_scheme(mut self, id_scheme: IdScheme) -> Self {
        self.id_scheme = id_scheme;
        self
    }

    #[must_use]
    pub fn with_run_id(mut self, run_id: u32) -> Self {
        self.run_id = run_id;
        self
    }

    #[must_use]
    pub fn with_grow_stack(mut self, grow_stack: bool) -> Self {
        self.grow_stack = grow_stack;
        self
    }

    /// Defaults overridden by `CDUMP_RUN_ID` and `CDUMP_ID_SCHEME`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`DumpConfig::from_env`], reading variables through `lookup`.
    /// Values that do not parse are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::RUN_ID_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(run_id) => config.run_id = run_id,
                Err(e) => tracing::warn!(var = Self::RUN_ID_VAR, value = %raw, "ignoring: {e}"),
            }
        }

        if let Some(raw) = lookup(Self::ID_SCHEME_VAR) {
            match raw.trim().parse::<IdScheme>() {
                Ok(scheme) => config.id_scheme = scheme,
                Err(e) => tracing::warn!(var = Self::ID_SCHEME_VAR, value = %raw, "ignoring: {e}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests;
