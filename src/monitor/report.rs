//! Human-readable change report rendering.

use chrono::NaiveDate;

use crate::core::{AirdropEvent, DATE_FORMAT};
use crate::pipeline::ChangeTag;

pub const SOURCE_URL: &str = "https://alpha123.uk";

fn change_tag(tag: ChangeTag) -> &'static str {
    match tag {
        ChangeTag::New => " [new]",
        ChangeTag::Updated => " [updated]",
        ChangeTag::Unchanged => "",
    }
}

/// "MM-DD HH:MM" when the date parses, otherwise the raw strings.
fn format_schedule(event: &AirdropEvent) -> String {
    let date = event.date.as_deref().unwrap_or("");
    if !date.is_empty() && !event.time.is_empty() {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, DATE_FORMAT) {
            return format!("{} {}", parsed.format("%m-%d"), event.time);
        }
    }
    format!("{} {}", date, event.time).trim().to_string()
}

fn schedule_suffix(event: &AirdropEvent) -> &'static str {
    if event.event_type == "tge" {
        "(TGE)"
    } else if event.phase == 2 {
        "(phase 2)"
    } else {
        ""
    }
}

/// Renders one bucket section, each event carrying its change tag.
pub fn render_bucket(title: &str, tagged: &[(&AirdropEvent, ChangeTag)]) -> String {
    if tagged.is_empty() {
        return format!("[{}] none", title);
    }

    let mut lines = vec![format!("[{}]", title)];
    for (event, tag) in tagged {
        lines.push(format!(
            "🪙{}{}\n ⏰ time: {}{}\n ⭐ points: {}\n 💰 amount: {}\n 📍 contract: {}\n",
            event.token,
            change_tag(*tag),
            format_schedule(event),
            schedule_suffix(event),
            event.points,
            event.amount,
            event.contract_address,
        ));
    }
    lines.join("\n")
}

/// Full notification message: header, both bucket sections, source.
pub fn render_report(
    today: &[(&AirdropEvent, ChangeTag)],
    forecast: &[(&AirdropEvent, ChangeTag)],
) -> String {
    format!(
        "[alphawatch] Airdrop schedule updated\n\n{}\n\n{}\n\nSource: {}",
        render_bucket("Today's airdrops", today),
        render_bucket("Upcoming airdrops", forecast),
        SOURCE_URL,
    )
}
