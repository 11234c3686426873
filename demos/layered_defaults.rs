// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered store example for the hexstore crate.
//!
//! This example demonstrates:
//! - Installing a layered store as the shared store
//! - Registering defaults below the persistent store
//! - Overriding values from the environment and the command line
//!
//! Precedence, highest first:
//! 1. Command-line arguments (`-retryCount 9` or `--retryCount=9`)
//! 2. Environment variables with the `LAYERED_DEFAULTS_` prefix
//! 3. The YAML file in the OS configuration directory
//! 4. Registered defaults
//!
//! To run this example:
//! ```bash
//! export LAYERED_DEFAULTS_theme="dark"
//! cargo run --example layered_defaults -- -retryCount 9
//! ```

use hexstore::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexstore: Layered Defaults ===\n");

    let store = Arc::new(LayeredStore::with_defaults(
        "layered-defaults",
        "com.example",
    )?);

    let mut defaults = BTreeMap::new();
    defaults.insert("retryCount".to_string(), StoreValue::Integer(5));
    defaults.insert("theme".to_string(), StoreValue::from("system"));
    store.register_defaults(defaults)?;

    install_shared_store(store.clone())?;

    println!("Override sources: {:?}", store.source_names()?);
    println!("Persistent store: {}\n", store.persistent().name());

    let retries: Setting<i64> = Setting::new("retryCount", || 3)?;
    let theme: Setting<String> = Setting::new("theme", || "light".to_string())?;
    let launches: Setting<i64> = Setting::new("launchCount", || 0)?;

    println!("retryCount: {}", retries.get());
    println!("theme: {}", theme.get());

    // Persisted across runs
    let count = launches.get() + 1;
    launches.set(count)?;
    println!("launchCount: {} (run again to see it grow)", launches.get());

    Ok(())
}
