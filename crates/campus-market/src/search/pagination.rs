//! Pagination state and page summaries.

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MarketError;

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const MAX_PAGE_SIZE: u32 = 100;
/// Choices offered by the results-per-page selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [12, 24, 48, 96];

/// How successive pages are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// One page at a time.
    #[default]
    Paged,
    /// "Load more" appends the next page to what is already shown.
    Infinite,
}

impl PaginationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationMode::Paged => "paged",
            PaginationMode::Infinite => "infinite",
        }
    }
}

impl FromStr for PaginationMode {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paged" => Ok(PaginationMode::Paged),
            "infinite" => Ok(PaginationMode::Infinite),
            other => Err(MarketError::UnknownPaginationMode(other.to_string())),
        }
    }
}

/// Pagination cursor.
///
/// `page` is 1-based. Any change to the query criteria must call
/// [`Pager::reset`]; [`Query::apply`](crate::search::Query::apply) does
/// this automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pager {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub mode: PaginationMode,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            mode: PaginationMode::Paged,
        }
    }

    /// Build a pager, rejecting a page size outside `1..=MAX_PAGE_SIZE`.
    pub fn try_new(page_size: u32, mode: PaginationMode) -> Result<Self, MarketError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(MarketError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page: 1,
            page_size,
            mode,
        })
    }

    pub fn infinite(mut self) -> Self {
        self.mode = PaginationMode::Infinite;
        self
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// `ceil(matched / page_size)`; zero when nothing matched.
    pub fn total_pages(&self, matched: usize) -> u32 {
        let size = self.page_size.max(1) as usize;
        matched.div_ceil(size) as u32
    }

    /// Highest page that can be selected. Always at least 1.
    pub fn last_page(&self, matched: usize) -> u32 {
        self.total_pages(matched).max(1)
    }

    /// Jump to page `n`, clamped to `1..=last_page`. Returns the page
    /// actually selected.
    pub fn go_to_page(&mut self, n: u32, matched: usize) -> u32 {
        self.page = n.clamp(1, self.last_page(matched));
        self.page
    }

    /// Reveal the next page. Returns `false` when already on the last one.
    pub fn load_more(&mut self, matched: usize) -> bool {
        if self.page < self.last_page(matched) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.reset();
    }

    /// Index range of the visible items within the sorted matched set.
    pub fn visible_range(&self, matched: usize) -> Range<usize> {
        let size = self.page_size.max(1) as usize;
        let page = self.page.max(1) as usize;
        let end = page.saturating_mul(size).min(matched);
        let start = match self.mode {
            PaginationMode::Paged => ((page - 1) * size).min(matched),
            PaginationMode::Infinite => 0,
        };
        start..end
    }

    /// Summary for "Showing X to Y of N" and prev/next controls.
    pub fn info(&self, matched: usize) -> PageInfo {
        let total_pages = self.total_pages(matched);
        let range = self.visible_range(matched);
        PageInfo {
            page: self.page,
            page_size: self.page_size,
            mode: self.mode,
            total: matched,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
            start_item: if range.is_empty() { 0 } else { range.start + 1 },
            end_item: range.end,
        }
    }

    /// Page links with gaps, `delta` pages either side of the current one.
    ///
    /// The first and last pages are always present. Nothing is returned
    /// when everything fits on one page.
    pub fn page_window(&self, delta: u32, matched: usize) -> Vec<PageLink> {
        let total = self.total_pages(matched);
        if total <= 1 {
            return Vec::new();
        }

        let current = self.page.clamp(1, total);
        let mut links = vec![PageLink::Page(1)];

        if current.saturating_sub(delta) > 2 {
            links.push(PageLink::Gap);
        }

        let lo = current.saturating_sub(delta).max(2);
        let hi = current.saturating_add(delta).min(total - 1);
        links.extend((lo..=hi).map(PageLink::Page));

        if current.saturating_add(delta) < total - 1 {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(total));
        links
    }
}

/// One entry of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    Page(u32),
    /// Elided run of pages.
    Gap,
}

/// Pagination info for a computed view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    pub mode: PaginationMode,
    /// Total number of matched items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
    /// First visible item number (1-indexed), 0 when nothing is shown.
    pub start_item: usize,
    /// Last visible item number.
    pub end_item: usize,
}
