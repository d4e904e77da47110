//! Command handlers. Output goes to stdout; logs go to stderr so `fetch
//! --json` can be piped.

use std::collections::BTreeMap;

use kidspots_core::{AppConfig, LocationType, NewLocation, LOCATION_TYPES};
use kidspots_overpass::{build_query, collect_locations, OverpassClient};

pub(crate) fn print_query(config: &AppConfig) {
    print!("{}", build_query(&config.region.bounds));
}

pub(crate) fn print_types() {
    for line in type_table() {
        println!("{line}");
    }
}

pub(crate) async fn fetch(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let client = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.user_agent,
    )?;

    tracing::info!(region = %config.region.label, "fetching locations");
    let collected = collect_locations(&client, &config.region).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collected.locations)?);
    } else {
        for line in summary_lines(&collected.locations, collected.skipped) {
            println!("{line}");
        }
    }
    Ok(())
}

fn type_table() -> Vec<String> {
    LOCATION_TYPES
        .iter()
        .map(|c| {
            format!(
                "{:<15} {:<24} {:<8} {:<18} {}",
                c.location_type.as_str(),
                c.predicate(),
                c.color,
                c.icon,
                c.label
            )
        })
        .collect()
}

fn summary_lines(locations: &[NewLocation], skipped: usize) -> Vec<String> {
    let mut counts: BTreeMap<LocationType, usize> = BTreeMap::new();
    for location in locations {
        *counts.entry(location.location_type).or_default() += 1;
    }

    let mut lines: Vec<String> = LOCATION_TYPES
        .iter()
        .map(|c| {
            format!(
                "{:<16} {}",
                c.label,
                counts.get(&c.location_type).copied().unwrap_or(0)
            )
        })
        .collect();
    lines.push(format!("{:<16} {}", "Total", locations.len()));
    lines.push(format!("{:<16} {skipped}", "Skipped"));
    lines
}
