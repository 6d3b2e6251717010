//! Telegram message bodies (HTML parse mode).

use std::fmt::Display;

use crate::types::Competition;

/// Shown when the upstream record has no volume threshold
pub const VOLUME_PLACEHOLDER: &str = "N/A";

/// Announcement for a newly detected competition
pub fn competition_message(comp: &Competition) -> String {
    let limit = comp
        .volume_limit
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| VOLUME_PLACEHOLDER.to_string());

    format!(
        "🏆 <b>New Alpha Competition</b>\n\
         <b>{}</b>  on  <code>{}</code>\n\
         🎁 Rewards: {}\n\
         📊 Volume ≥ {} USDT\n\
         ⏳ Ends: {}",
        escape_html(&comp.name),
        escape_html(&comp.symbol),
        escape_html(&comp.reward.to_string()),
        escape_html(&limit),
        comp.end.format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Failure report sent before the process exits non-zero
pub fn error_message(error: &dyn Display) -> String {
    format!("⚠️ Bot error: {}", escape_html(&error.to_string()))
}

pub fn started_message() -> String {
    "🤖 <b>Alpha Competition Watcher Started</b>".to_string()
}

/// Escape the three characters Telegram's HTML mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
