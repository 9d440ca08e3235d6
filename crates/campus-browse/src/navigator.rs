//! Address bar and history.

use campus_market::search::{encode_component, UrlParams};

/// Path of the search results page.
pub const SEARCH_PATH: &str = "/search-results";
/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/user-login";

/// Navigable history the page pushes its URL state into.
pub trait Navigator: Send {
    /// The current location, path plus query string.
    fn location(&self) -> &str;

    /// Push a new entry without reloading the page.
    fn push(&mut self, url: String);

    /// Step back. Returns the new location, or `None` at the oldest entry.
    fn back(&mut self) -> Option<&str>;

    /// Step forward. Returns the new location, or `None` at the newest entry.
    fn forward(&mut self) -> Option<&str>;
}

/// The search page URL for `params`.
pub fn search_url(params: &UrlParams) -> String {
    let query = params.encode();
    if query.is_empty() {
        SEARCH_PATH.to_string()
    } else {
        format!("{}?{}", SEARCH_PATH, query)
    }
}

/// Parameters carried by a location's query string.
pub fn params_of(location: &str) -> UrlParams {
    match location.split_once('?') {
        Some((_, query)) => UrlParams::parse(query),
        None => UrlParams::default(),
    }
}

/// The sign-in URL that returns to `return_path` afterwards.
pub fn login_url(return_path: &str) -> String {
    format!("{}?returnTo={}", LOGIN_PATH, encode_component(return_path))
}

/// History kept in memory, with browser-style back and forward.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(SEARCH_PATH)
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, url: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.location())
    }

    fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        assert_eq!(search_url(&UrlParams::default()), "/search-results");
        let params = UrlParams {
            q: Some("study table".to_string()),
            category: Some("all".to_string()),
        };
        assert_eq!(search_url(&params), "/search-results?q=study%20table");
    }

    #[test]
    fn test_params_of() {
        let params = params_of("/search-results?category=bikes");
        assert_eq!(params.category.as_deref(), Some("bikes"));
        assert_eq!(params_of("/search-results"), UrlParams::default());
    }

    #[test]
    fn test_login_url_encodes_return_path() {
        assert_eq!(
            login_url("/search-results"),
            "/user-login?returnTo=%2Fsearch-results"
        );
    }

    #[test]
    fn test_history_back_forward() {
        let mut history = MemoryHistory::default();
        history.push("/search-results?q=a".to_string());
        history.push("/search-results?q=b".to_string());

        assert_eq!(history.back(), Some("/search-results?q=a"));
        assert_eq!(history.back(), Some("/search-results"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("/search-results?q=a"));

        history.push("/search-results?q=c".to_string());
        assert_eq!(history.forward(), None);
        assert_eq!(history.entries().len(), 3);
    }
}
