//! Console report
//!
//! Human-readable preview of the watchlist. Not parsed by anything else.

use num_format::{Locale, ToFormattedString};
use std::fmt::Write;

use crate::domain::{FilterCriteria, PoolIndex, TokenRecord};

/// Rows shown in the console preview
pub const PREVIEW_LIMIT: usize = 50;

const RULE_WIDTH: usize = 60;
const TABLE_WIDTH: usize = 90;

/// Format a USD amount with thousands separators and no decimals
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rounded = value.abs().round() as u64;
    let grouped = rounded.to_formatted_string(&Locale::en);

    if value < 0.0 && rounded > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

/// Filter summary printed before fetching
pub fn render_criteria(criteria: &FilterCriteria) -> String {
    format!(
        "Filters: MC {} - {}, Volume {}/day",
        format_usd(criteria.min_market_cap),
        format_usd(criteria.max_market_cap),
        format_usd(criteria.min_daily_volume_usd)
    )
}

/// Outcome line printed before the preview table
pub fn render_match_summary(matched: usize, fetched: usize) -> String {
    format!("Found {} tokens matching criteria (of {} fetched)", matched, fetched)
}

/// Table of the top `limit` tokens, plus a count of the rest
pub fn render_watchlist_table(tokens: &[TokenRecord], limit: usize) -> String {
    let mut out = String::new();
    banner(&mut out, "TARGET TOKENS");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<12} {:<45} {:>12} {:>12}",
        "Symbol", "Address", "MC", "Vol24h"
    );
    let _ = writeln!(out, "{}", "-".repeat(TABLE_WIDTH));

    for token in tokens.iter().take(limit) {
        let symbol = if token.symbol.is_empty() {
            "UNKNOWN"
        } else {
            truncate_chars(&token.symbol, 10)
        };
        let _ = writeln!(
            out,
            "{:<12} {:<45} {:>12} {:>12}",
            symbol,
            truncate_chars(&token.address, 43),
            format_usd(token.market_cap.unwrap_or(0.0)),
            format_usd(token.volume_24h.unwrap_or(0.0)),
        );
    }

    if tokens.len() > limit {
        let _ = writeln!(out);
        let _ = writeln!(out, "... and {} more tokens", tokens.len() - limit);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    out
}

/// One-paragraph pool enumeration summary
pub fn render_pool_summary(index: &PoolIndex, total_tokens: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found pools for {} of {} tokens", index.tokens_with_pools(), total_tokens);
    let _ = writeln!(out, "Failed: {} tokens", index.failed_tokens().len());
    let _ = writeln!(out, "Total pools: {}", index.total_pools());
    out
}

pub fn print_banner(title: &str) {
    let mut out = String::new();
    banner(&mut out, title);
    println!("{}", out);
}

pub fn print_watchlist(tokens: &[TokenRecord]) {
    print!("{}", render_watchlist_table(tokens, PREVIEW_LIMIT));
}
