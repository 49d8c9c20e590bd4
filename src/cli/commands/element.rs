//! Element table lookup commands.

use nsrtag::elements;
use nsrtag::models::PRESETS;

use crate::cli::icons::{dim_arrow, success};

/// Look up an element by symbol or atomic number.
pub fn cmd_element(query: &str) -> anyhow::Result<()> {
    let query = query.trim();
    let element = match query.parse::<elements::AtomicNumber>() {
        Ok(z) => elements::by_atomic_number(z),
        Err(_) => elements::by_symbol(query),
    };

    match element {
        Some(e) => {
            println!(
                "{} {:<3} {:<14} Z={}",
                success(),
                e.symbol,
                e.name,
                e.atomic_number
            );
            Ok(())
        }
        None => anyhow::bail!("Unknown element: {}", query),
    }
}

/// List the named element ranges accepted by `batch --range`.
pub fn cmd_ranges() -> anyhow::Result<()> {
    for (key, _, range) in PRESETS.iter() {
        println!("  {} {:<11} {}", dim_arrow(), key, range.label());
    }
    Ok(())
}
