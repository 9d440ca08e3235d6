//! Search results command.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use campus_browse::{
    search_url, Action, BrowseController, MemoryHistory, Navigator, SearchPage, ViewState,
};
use campus_market::prelude::*;
use serde_json::json;

use super::SearchArgs;
use crate::context::Context;
use crate::output::{condition_badge, format_price, truncate};

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store(args.catalog.as_deref()).await?;

    let mut browse = ctx.config.browse.clone();
    // Edits arrive all at once; there is no typing to wait out.
    browse.debounce_ms = 0;
    if let Some(size) = args.page_size {
        browse.page_size = size;
    }
    if args.infinite {
        browse.pagination = PaginationMode::Infinite;
    }
    let controller = BrowseController::new(browse)?;

    let location = args
        .url
        .clone()
        .unwrap_or_else(|| search_url(&UrlParams::default()));
    ctx.output.debug(&format!("starting at {}", location));
    let mut page = SearchPage::new(controller, store, MemoryHistory::new(location));

    page.mount();
    for change in edits(&args, Currency::default())? {
        page.send(Action::Edit(change));
    }
    page.settle().await;

    if args.page > 1 {
        if args.infinite {
            for _ in 1..args.page {
                page.send(Action::LoadMore);
            }
        } else {
            page.send(Action::GoToPage(args.page));
        }
    }

    render(&page, &args, ctx)
}

/// Query edits requested on the command line, in the order a user would
/// make them on the page.
fn edits(args: &SearchArgs, currency: Currency) -> Result<Vec<QueryChange>> {
    let mut changes = Vec::new();

    if let Some(text) = &args.query {
        changes.push(QueryChange::SearchText(text.clone()));
    }
    if let Some(category) = &args.category {
        changes.push(QueryChange::Category(CategoryFilter::parse(category)));
    }
    if args.min.is_some() || args.max.is_some() {
        let open = PriceRange::any(currency);
        let min = args
            .min
            .map(|m| Money::from_major(m, currency))
            .unwrap_or(open.min);
        let max = args
            .max
            .map(|m| Money::from_major(m, currency))
            .unwrap_or(open.max);
        changes.push(QueryChange::PriceRange(PriceRange::new(min, max)?));
    }
    if !args.conditions.is_empty() {
        let mut conditions = BTreeSet::new();
        for raw in &args.conditions {
            let condition = Condition::parse(raw);
            if !condition.is_known() {
                bail!("Unknown condition: {}", raw);
            }
            conditions.insert(condition);
        }
        changes.push(QueryChange::Conditions(conditions));
    }
    if let Some(timeframe) = &args.timeframe {
        changes.push(QueryChange::Timeframe(timeframe.parse()?));
    }
    if let Some(sort) = &args.sort {
        changes.push(QueryChange::Sort(sort.parse()?));
    }

    Ok(changes)
}

fn render(page: &SearchPage<MemoryHistory>, args: &SearchArgs, ctx: &Context) -> Result<()> {
    let controller = page.controller();
    let url = page.navigator().location();

    if ctx.output.is_json() {
        let value = match page.state() {
            ViewState::Results(view) => json!({ "url": url, "status": "results", "view": view }),
            ViewState::NoResults {
                search_text,
                active_filters,
            } => json!({
                "url": url,
                "status": "no-results",
                "search_text": search_text,
                "active_filters": active_filters,
            }),
            ViewState::Failed(error) => bail!("Search failed: {}", error),
            ViewState::Idle | ViewState::Loading => bail!("Search did not complete"),
        };
        ctx.output.json(&value);
        return Ok(());
    }

    ctx.output.header("Search Results");
    ctx.output.kv("url", url);
    ctx.output.kv("sort", controller.query().sort.display_name());

    match page.state() {
        ViewState::Results(view) => {
            let info = view.page_info;
            ctx.output.info(&format!(
                "Showing {} to {} of {} results",
                info.start_item, info.end_item, info.total
            ));
            println!();

            let widths = [6, 40, 12, 16, 18];
            ctx.output
                .table_row(&["ID", "TITLE", "PRICE", "CONDITION", "CATEGORY"], &widths);
            for product in &view.items {
                let title = truncate(&product.title, widths[1]);
                let price = format_price(product);
                let condition = condition_badge(product.condition.as_ref());
                let category = product
                    .category
                    .as_ref()
                    .map(|c| c.display_name().to_string())
                    .unwrap_or_else(|| "-".to_string());
                ctx.output.table_row(
                    &[product.id.as_str(), &title, &price, &condition, &category],
                    &widths,
                );
            }

            let window = controller.page_window();
            if !window.is_empty() && info.mode == PaginationMode::Paged {
                println!();
                ctx.output.kv("pages", &format_window(&window, info.page));
            }

            if args.facets {
                for facet in &view.facets {
                    ctx.output.header(&facet.name);
                    for value in &facet.values {
                        ctx.output
                            .list_item(&format!("{} ({})", value.label, value.count));
                    }
                }
            }
            Ok(())
        }
        ViewState::NoResults {
            search_text,
            active_filters,
        } => {
            match search_text {
                Some(text) => ctx
                    .output
                    .warn(&format!("No products found for \"{}\"", text)),
                None => ctx.output.warn("No products found"),
            }
            if *active_filters > 0 {
                ctx.output.info(&format!(
                    "Try removing some of the {} active filters",
                    active_filters
                ));
            }
            Ok(())
        }
        ViewState::Failed(error) => bail!("Search failed: {}", error),
        ViewState::Idle | ViewState::Loading => bail!("Search did not complete"),
    }
}

/// Page selector as text, current page in brackets.
fn format_window(window: &[PageLink], current: u32) -> String {
    window
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_in_page_order() {
        let args = SearchArgs {
            query: Some("bike".into()),
            category: Some("bikes".into()),
            max: Some(20_000),
            sort: Some("price-low".into()),
            ..SearchArgs::default()
        };
        let changes = edits(&args, Currency::INR).unwrap();

        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0], QueryChange::SearchText("bike".into()));
        assert_eq!(
            changes[2],
            QueryChange::PriceRange(
                PriceRange::new(Money::zero(Currency::INR), Money::from_major(20_000, Currency::INR))
                    .unwrap()
            )
        );
        assert_eq!(changes[3], QueryChange::Sort(SortMode::PriceLow));
    }

    #[test]
    fn test_min_only_leaves_top_open() {
        let args = SearchArgs {
            min: Some(10_000),
            ..SearchArgs::default()
        };
        let changes = edits(&args, Currency::INR).unwrap();
        let QueryChange::PriceRange(range) = &changes[0] else {
            panic!("expected a price edit, got {:?}", changes[0]);
        };
        assert!(range.is_open_ended());
        assert!(range.contains(Money::from_major(65_000, Currency::INR)));
    }

    #[test]
    fn test_edits_reject_bad_values() {
        let inverted = SearchArgs {
            min: Some(500),
            max: Some(100),
            ..SearchArgs::default()
        };
        assert!(edits(&inverted, Currency::INR).is_err());

        let condition = SearchArgs {
            conditions: vec!["mint".into()],
            ..SearchArgs::default()
        };
        assert!(edits(&condition, Currency::INR).is_err());

        let sort = SearchArgs {
            sort: Some("cheapest".into()),
            ..SearchArgs::default()
        };
        assert!(edits(&sort, Currency::INR).is_err());
    }

    #[test]
    fn test_format_window() {
        let window = vec![
            PageLink::Page(1),
            PageLink::Gap,
            PageLink::Page(4),
            PageLink::Page(5),
        ];
        assert_eq!(format_window(&window, 4), "1 … [4] 5");
    }
}
