// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line tool for inspecting and editing a YAML settings file.
//!
//! This example demonstrates:
//! - Opening a `YamlFileStore` at an explicit path or the default location
//! - Reading keys through the native typed accessors
//! - Writing typed values that other programs read back through `Setting<T>`
//!
//! To run this example:
//! ```bash
//! cargo run --example settings_tool -- --file /tmp/settings.yaml set retryCount 0 --kind integer
//! cargo run --example settings_tool -- --file /tmp/settings.yaml get retryCount
//! cargo run --example settings_tool -- --file /tmp/settings.yaml list
//! cargo run --example settings_tool -- --file /tmp/settings.yaml remove retryCount
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use hexstore::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "settings-tool")]
#[command(about = "Inspect and edit a YAML settings file")]
struct Cli {
    /// Settings file; defaults to settings.yaml in the OS configuration directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value stored under a key
    Get {
        /// Setting key
        key: String,
    },
    /// Store a value under a key
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
        /// How to store the value
        #[arg(short, long, value_enum, default_value_t = Kind::String)]
        kind: Kind,
    },
    /// Remove the value stored under a key
    Remove {
        /// Setting key
        key: String,
    },
    /// List every stored key with its value
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    String,
    Integer,
    Bool,
    Double,
    Url,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = match cli.file {
        Some(path) => YamlFileStore::open(path)?,
        None => YamlFileStore::from_default_location("settings-tool", "com.example")?,
    };

    match cli.command {
        Command::Get { key } => {
            let key = StoreKey::new(key)?;
            match store.object(&key)? {
                Some(value) => println!("{} = {} ({})", key, value, value.type_name()),
                None => println!("{} is not set", key),
            }
        }
        Command::Set { key, value, kind } => {
            let key = StoreKey::new(key)?;
            let stored = parse_value(&value, kind)?;
            store.set_object(&key, stored)?;
            println!("Saved {} to {}", key, store.file_path().display());
        }
        Command::Remove { key } => {
            let key = StoreKey::new(key)?;
            store.remove_object(&key)?;
            println!("Removed {}", key);
        }
        Command::List => {
            for key in store.all_keys()? {
                if let Some(value) = store.object(&key)? {
                    println!("{} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

fn parse_value(raw: &str, kind: Kind) -> std::result::Result<StoreValue, String> {
    let value = StoreValue::from(raw);
    let converted = match kind {
        Kind::String => Some(value),
        Kind::Integer => value.as_integer().map(StoreValue::Integer),
        Kind::Bool => value.as_bool().map(StoreValue::Bool),
        Kind::Double => value.as_double().map(StoreValue::Float),
        Kind::Url => value.as_url().map(StoreValue::Url),
    };
    converted.ok_or_else(|| format!("'{}' is not a valid {}", raw, kind_name(kind)))
}

fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::String => "string",
        Kind::Integer => "integer",
        Kind::Bool => "boolean",
        Kind::Double => "double",
        Kind::Url => "URL",
    }
}
