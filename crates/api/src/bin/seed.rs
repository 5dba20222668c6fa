//! Standalone seed tool. Not part of the served API.
//!
//! Usage: `carestock-seed [--force] [--set facility|rehab]`
//!
//! By default refuses to touch a non-empty collection; `--force` clears it
//! first.

use anyhow::{Context, bail};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    carestock_observability::init();

    let mut force = false;
    let mut set = "facility".to_string();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--force" => force = true,
            "--set" => set = args.next().context("--set requires a value")?,
            other => bail!("unknown argument: {other}"),
        }
    }

    let items = match set.as_str() {
        "facility" => carestock_infra::seed::facility_items(),
        "rehab" => carestock_infra::seed::rehab_items(),
        other => bail!("unknown data set: {other} (expected facility or rehab)"),
    };

    let store = carestock_api::app::build_store().await;

    if force {
        let removed = store.delete_all().await?;
        tracing::info!(removed, "cleared existing inventory");
    } else {
        let existing = store.list().await?.len();
        if existing > 0 {
            tracing::info!(
                existing,
                "inventory already has items; skipping seed (use --force to reset)"
            );
            return Ok(());
        }
    }

    let mut inserted = 0usize;
    for draft in items {
        let item = store.create(draft).await?;
        tracing::info!(name = %item.name, item_type = %item.item_type, value = item.value, "seeded");
        inserted += 1;
    }

    tracing::info!(inserted, set = %set, "seed complete");
    Ok(())
}
