use chrono::SecondsFormat;

use crate::domain::entities::LeaderboardEntry;

pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

// Escapes the five XML special characters in text and attribute values.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// Leaderboard document: one ranked <player> per entry, no recent games.
pub fn leaderboard_xml(entries: &[LeaderboardEntry]) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<leaderboard>\n");
    for (index, entry) in entries.iter().enumerate() {
        xml.push_str(&format!("  <player rank=\"{}\">\n", index + 1));
        xml.push_str(&format!(
            "    <username>{}</username>\n",
            escape_xml(&entry.username)
        ));
        xml.push_str(&format!("    <bestScore>{}</bestScore>\n", entry.best_score));
        xml.push_str("  </player>\n");
    }
    xml.push_str("</leaderboard>\n");
    xml
}

// Player detail document including the nested recent games.
pub fn player_xml(entry: &LeaderboardEntry) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<player>\n");
    xml.push_str(&format!(
        "  <username>{}</username>\n",
        escape_xml(&entry.username)
    ));
    xml.push_str(&format!("  <bestScore>{}</bestScore>\n", entry.best_score));
    xml.push_str("  <recent>\n");
    for game in &entry.recent {
        xml.push_str("    <game>\n");
        xml.push_str(&format!("      <score>{}</score>\n", game.score));
        xml.push_str(&format!(
            "      <createdAt>{}</createdAt>\n",
            game.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str("    </game>\n");
    }
    xml.push_str("  </recent>\n</player>\n");
    xml
}
