// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the hexstore crate.
//!
//! This example demonstrates:
//! - Declaring typed settings with defaults
//! - Telling a stored zero apart from a never-written key
//! - Observing writes
//! - Optional and enum-backed settings
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use hexstore::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quality {
    Low,
    Medium,
    High,
}

impl RawRepresentable for Quality {
    type Raw = i64;

    fn raw_value(&self) -> i64 {
        match self {
            Quality::Low => 0,
            Quality::Medium => 1,
            Quality::High => 2,
        }
    }

    fn from_raw_value(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Quality::Low),
            1 => Some(Quality::Medium),
            2 => Some(Quality::High),
            _ => None,
        }
    }
}

hexstore::storable_raw_value!(Quality);

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexstore: Basic Usage ===\n");

    // Settings without an explicit store use the process-wide shared store,
    // an in-memory store unless another one is installed first.
    let retries = Setting::builder("retryCount", || 3i64)
        .on_change(|value: &i64| println!("  (observer) retryCount changed to {}", value))
        .build()?;

    println!("--- Example 1: Defaults ---");
    println!("retryCount before any write: {}", retries.get());
    println!("is set: {}", retries.is_set()?);

    println!("\n--- Example 2: Zero Is a Value ---");
    retries.set(0)?;
    println!("retryCount after writing 0: {}", retries.get());

    retries.remove()?;
    println!("retryCount after removing: {}", retries.get());

    println!("\n--- Example 3: Optional Settings ---");
    let nickname: Setting<Option<String>> = Setting::new("nickname", || None)?;
    println!("nickname: {:?}", nickname.get());
    nickname.set(Some("ace".to_string()))?;
    println!("nickname: {:?}", nickname.get());
    nickname.set(None)?;
    println!("nickname after writing None: {:?}", nickname.get());

    println!("\n--- Example 4: Enum Settings ---");
    let quality = Setting::new("quality", || Quality::Medium)?;
    println!("quality: {:?}", quality.get());
    quality.set(Quality::High)?;
    println!("quality: {:?}", quality.get());

    // A raw value with no matching case reads as the default
    shared_store().set_integer(quality.key(), 7)?;
    println!("quality with unknown raw value 7: {:?}", quality.get());

    println!("\n--- Example 5: Collections ---");
    let recent = Setting::new("recentFiles", Vec::<String>::new)?;
    recent.set(vec!["notes.md".to_string(), "todo.txt".to_string()])?;
    println!("recentFiles: {:?}", recent.get());

    println!("\nStored keys: {:?}", shared_store().all_keys()?);

    Ok(())
}
