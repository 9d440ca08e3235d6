//! Catalog statistics command.

use anyhow::Result;
use campus_data::DataStore;
use campus_market::prelude::*;

use super::StatsArgs;
use crate::context::Context;

/// Run the stats command.
pub async fn run(args: StatsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store(args.catalog.as_deref()).await?;
    let stats = store.product_stats().await?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Catalog");
    ctx.output.kv("backend", store.backend_tag());
    ctx.output.kv("available products", &stats.total_products.to_string());
    ctx.output.kv(
        "average price",
        &stats
            .average_price
            .map(|p| p.display())
            .unwrap_or_else(|| "-".to_string()),
    );

    if !stats.category_breakdown.is_empty() {
        ctx.output.header("By category");
        for (id, count) in &stats.category_breakdown {
            let label = Category::parse(id);
            ctx.output
                .list_item(&format!("{} ({})", label.display_name(), count));
        }
    }

    if !stats.condition_breakdown.is_empty() {
        ctx.output.header("By condition");
        for (id, count) in &stats.condition_breakdown {
            let label = Condition::parse(id);
            ctx.output
                .list_item(&format!("{} ({})", label.display_name(), count));
        }
    }

    Ok(())
}
