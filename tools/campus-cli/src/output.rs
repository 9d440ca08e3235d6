//! Output formatting for the CLI.

use campus_market::prelude::*;
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Condition label colored by grade.
pub fn condition_badge(condition: Option<&Condition>) -> String {
    let Some(condition) = condition else {
        return style("-").dim().to_string();
    };
    let label = condition.display_name();
    match condition {
        Condition::New | Condition::LikeNew => style(label).green().to_string(),
        Condition::Good => style(label).cyan().to_string(),
        Condition::Fair | Condition::Poor => style(label).yellow().to_string(),
        Condition::Unknown(_) => style(label).dim().to_string(),
    }
}

/// Price for display, or a dash when missing or invalid.
pub fn format_price(product: &Product) -> String {
    product
        .valid_price()
        .map(|p| p.display())
        .unwrap_or_else(|| "-".to_string())
}

/// Shorten `s` to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Desk Lamp", 20), "Desk Lamp");
        assert_eq!(truncate("Mountain Bike - Trek 3500", 10), "Mountain …");
    }

    #[test]
    fn test_format_price() {
        let lamp = Product::new("Desk Lamp", Money::from_major(600, Currency::INR));
        assert_eq!(format_price(&lamp), Money::from_major(600, Currency::INR).display());

        let mut unpriced = lamp.clone();
        unpriced.price = None;
        assert_eq!(format_price(&unpriced), "-");
    }
}
