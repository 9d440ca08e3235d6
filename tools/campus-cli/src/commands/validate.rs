//! Listing draft validation command.

use anyhow::{bail, Context as _, Result};
use campus_market::prelude::*;
use serde_json::json;

use super::ValidateArgs;
use crate::context::Context;

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(&args.draft)
        .with_context(|| format!("Failed to read draft: {}", args.draft))?;
    let draft: ListingDraft = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse draft: {}", args.draft))?;

    match draft.into_new_listing() {
        Ok(listing) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "valid": true, "listing": listing }));
                return Ok(());
            }
            ctx.output.success("Listing is ready to publish");
            ctx.output.kv("title", &listing.title);
            ctx.output.kv("category", listing.category.display_name());
            ctx.output.kv("condition", listing.condition.display_name());
            ctx.output.kv("price", &listing.price.display());
            Ok(())
        }
        Err(errors) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "valid": false, "errors": errors }));
            } else {
                for (field, message) in errors.iter() {
                    ctx.output.kv(field.as_str(), message);
                }
            }
            bail!("Listing has {} problem(s)", errors.len())
        }
    }
}
