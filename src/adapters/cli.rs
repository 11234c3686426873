// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument settings source adapter.
//!
//! This module provides the argument domain: a read-only layer of values
//! passed on the command line that overrides everything else for the lifetime
//! of the process.

use crate::domain::{Result, StoreKey, StoreValue};
use crate::ports::SettingsSource;
use std::collections::HashMap;

/// Settings source for command-line arguments.
///
/// Three argument forms are recognised:
/// - `--key=value`: long form with equals sign
/// - `--key value`: long form with space-separated value
/// - `-key value`: single-dash form with space-separated value
///
/// A flag followed by another flag has no value and is ignored. Negative
/// numbers are values, not flags, so `-retryCount -1` works. Positional
/// arguments are ignored. When a key repeats, the last value wins.
///
/// # Priority
///
/// Command-line arguments have the highest built-in priority (3).
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::CommandLineSource;
/// use hexstore::domain::StoreValue;
/// use hexstore::ports::SettingsSource;
///
/// let source = CommandLineSource::from_args(vec!["-retryCount", "7", "--theme=dark"]);
/// assert_eq!(source.get_str("retryCount").unwrap(), Some(StoreValue::from("7")));
/// assert_eq!(source.get_str("theme").unwrap(), Some(StoreValue::from("dark")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineSource {
    /// Parsed argument values
    values: HashMap<String, String>,
}

impl CommandLineSource {
    /// Creates a source with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source by parsing `args`.
    ///
    /// The program name must not be included.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut source = Self::new();
        source.parse_args(&args);
        tracing::debug!("Parsed {} command-line settings", source.values.len());
        source
    }

    /// Creates a source from the process's arguments, skipping the program
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hexstore::adapters::CommandLineSource;
    ///
    /// let source = CommandLineSource::from_env_args();
    /// ```
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();

            if let Some(rest) = arg.strip_prefix("--") {
                if let Some((key, value)) = rest.split_once('=') {
                    if !key.is_empty() {
                        self.values.insert(key.to_string(), value.to_string());
                    }
                    i += 1;
                    continue;
                }
                i += self.take_value(rest, args.get(i + 1).map(|s| s.as_ref()));
            } else if let Some(rest) = arg.strip_prefix('-') {
                if is_flag(arg) {
                    i += self.take_value(rest, args.get(i + 1).map(|s| s.as_ref()));
                } else {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
    }

    /// Records `key` with the following argument if that argument is a value.
    /// Returns how many arguments were consumed.
    fn take_value(&mut self, key: &str, next: Option<&str>) -> usize {
        match next {
            Some(value) if !key.is_empty() && !is_flag(value) => {
                self.values.insert(key.to_string(), value.to_string());
                2
            }
            _ => 1,
        }
    }
}

/// A dash-prefixed argument that is not a negative number.
fn is_flag(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && rest.parse::<f64>().is_err(),
        None => false,
    }
}

impl SettingsSource for CommandLineSource {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn get(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| StoreValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        Ok(self.values.keys().map(|k| StoreKey::from(k.as_str())).collect())
    }

    fn reload(&mut self) -> Result<()> {
        // Arguments don't change during runtime
        Ok(())
    }
}
