//! URL parameter codec.
//!
//! Only `q` (search text) and `category` are mirrored into the address
//! bar. Absent parameters mean the defaults `""` and `"all"`.

use serde::{Deserialize, Serialize};

use crate::search::{CategoryFilter, Query};

/// The URL-visible subset of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UrlParams {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown keys are ignored. When a key repeats, the first value wins.
    pub fn parse(query_string: &str) -> Self {
        let mut params = UrlParams::default();
        let trimmed = query_string.trim_start_matches('?');

        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            match decode_component(key).as_str() {
                "q" if params.q.is_none() => params.q = Some(value),
                "category" if params.category.is_none() => params.category = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Encode as a query string without the leading `?`. Empty values are
    /// omitted, as is `category=all`.
    pub fn encode(&self) -> String {
        let mut parts = Vec::new();
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            parts.push(format!("q={}", encode_component(q)));
        }
        if let Some(c) = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
        {
            parts.push(format!("category={}", encode_component(c)));
        }
        parts.join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.encode().is_empty()
    }
}

impl Query {
    /// Hydrate from URL parameters. Fields the URL does not carry come from
    /// `base`, and the pager starts on page 1.
    pub fn from_url(params: &UrlParams, base: &Query) -> Query {
        let mut query = base.clone();
        query.search_text = params.q.clone().unwrap_or_default();
        query.category = params
            .category
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default();
        query.pager.reset();
        query
    }

    /// The URL-visible subset of this query.
    pub fn to_url_params(&self) -> UrlParams {
        UrlParams {
            q: self.text().map(str::to_string),
            category: (!self.category.is_all()).then(|| self.category.as_str().to_string()),
        }
    }
}

/// Percent-encode a query string component.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decode a query string component. `+` is a space; malformed escapes are
/// kept literally and invalid UTF-8 is replaced.
pub fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = s.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            other => out.push(other),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::search::SortMode;

    #[test]
    fn test_parse_defaults_when_absent() {
        let params = UrlParams::parse("");
        let query = Query::from_url(&params, &Query::new());
        assert_eq!(query.search_text, "");
        assert_eq!(query.category, CategoryFilter::All);
    }

    #[test]
    fn test_parse_decodes_values() {
        let params = UrlParams::parse("?q=mountain+bike%21&category=bikes&utm=x");
        assert_eq!(params.q.as_deref(), Some("mountain bike!"));
        assert_eq!(params.category.as_deref(), Some("bikes"));
    }

    #[test]
    fn test_from_url_keeps_base_sort_and_resets_page() {
        let mut base = Query::new().with_sort(SortMode::Newest);
        base.pager.page = 4;
        let query = Query::from_url(&UrlParams::parse("category=cycles"), &base);

        assert_eq!(query.category, CategoryFilter::Only(Category::Bikes));
        assert_eq!(query.sort, SortMode::Newest);
        assert_eq!(query.pager.page, 1);
    }

    #[test]
    fn test_encode_omits_defaults() {
        assert_eq!(Query::new().to_url_params().encode(), "");
        let query = Query::new()
            .with_search_text("desk lamp")
            .with_category(Category::Furniture);
        assert_eq!(query.to_url_params().encode(), "q=desk%20lamp&category=furniture");
    }

    #[test]
    fn test_url_round_trip_preserves_text() {
        let query = Query::new().with_search_text("café & chairs");
        let encoded = query.to_url_params().encode();
        let back = Query::from_url(&UrlParams::parse(&encoded), &Query::new());
        assert_eq!(back.search_text, "café & chairs");
    }

    #[test]
    fn test_malformed_escape_kept_literally() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
    }
}
