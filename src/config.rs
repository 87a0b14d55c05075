//! Centralized configuration for the registry tool.
//!
//! - Single place for tunables instead of scattered env lookups.
//! - RegistryConfig::from_env() reads the SREG_* variables on top of defaults.
//! - CLI flags override whatever the environment set (see the binary).
//!
//! Defaults:
//! - data_file = "data.json" (current directory)
//! - autoload = true (load the data file when the menu starts)
//! - pretty = false (compact JSON, one line)

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// State file used by save/load.
    /// Env: SREG_DATA_FILE (default "data.json")
    pub data_file: PathBuf,

    /// Load the state file before showing the menu.
    /// Env: SREG_AUTOLOAD = 0|1|true|false (default true)
    pub autoload: bool,

    /// Indent the JSON written by save.
    /// Env: SREG_PRETTY = 0|1|true|false (default false)
    pub pretty: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            autoload: true,
            pretty: false,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl RegistryConfig {
    /// Defaults overridden by SREG_* environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as from_env, with an explicit variable source (tests use a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("SREG_DATA_FILE") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.data_file = PathBuf::from(s);
            }
        }
        if let Some(on) = lookup("SREG_AUTOLOAD").as_deref().and_then(parse_flag) {
            cfg.autoload = on;
        }
        if let Some(on) = lookup("SREG_PRETTY").as_deref().and_then(parse_flag) {
            cfg.pretty = on;
        }

        cfg
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_autoload(mut self, on: bool) -> Self {
        self.autoload = on;
        self
    }

    pub fn with_pretty(mut self, on: bool) -> Self {
        self.pretty = on;
        self
    }
}

impl fmt::Display for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegistryConfig {{ data_file: {}, autoload: {}, pretty: {} }}",
            self.data_file.display(),
            self.autoload,
            self.pretty,
        )
    }
}
