use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::domain::{chat::Chat, currency::format_inr, expert::Expert, message::Message};

const MIN_NAME_COLUMN: usize = 12;
const PREVIEW_MAX_CHARS: usize = 48;

pub fn expert_table(experts: &[&Expert]) -> Vec<String> {
    if experts.is_empty() {
        return vec!["No experts match.".to_owned()];
    }

    let name_width = experts
        .iter()
        .map(|expert| expert.name.width())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_COLUMN);

    experts
        .iter()
        .map(|expert| {
            format!(
                "[{initials:<2}] {name} {rate:>8}/min  {specialties}",
                initials = expert.initials(),
                name = pad_to_width(&expert.name, name_width),
                rate = format_inr(expert.rate_per_minute),
                specialties = expert.specialties_label(),
            )
        })
        .collect()
}

pub fn expert_detail(expert: &Expert) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", expert.name, expert.initials()),
        format!("{} | {}", expert.gender.as_label(), expert.specialties_label()),
        format!("{}/min", format_inr(expert.rate_per_minute)),
    ];

    if !expert.bio.is_empty() {
        lines.push(String::new());
        lines.push(expert.bio.clone());
    }

    lines
}

pub fn chat_rows(chats: &[Chat], now: DateTime<Utc>) -> Vec<String> {
    if chats.is_empty() {
        return vec![
            "No conversations".to_owned(),
            "Start a conversation from an expert profile to see it here.".to_owned(),
        ];
    }

    let name_width = chats
        .iter()
        .map(|chat| chat.expert.name.width())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_COLUMN);

    chats
        .iter()
        .map(|chat| {
            format!(
                "[{initials:<2}] {name} {age:>12}  {preview}",
                initials = chat.expert.initials(),
                name = pad_to_width(&chat.expert.name, name_width),
                age = relative_age(chat.last_updated(), now),
                preview = truncate_chars(chat.last_message_preview(), PREVIEW_MAX_CHARS),
            )
        })
        .collect()
}

pub fn transcript_line(message: &Message, expert_name: &str) -> String {
    let author = if message.is_user { "You" } else { expert_name };
    format!(
        "{} {}: {}",
        message.timestamp.format("%H:%M"),
        author,
        message.text
    )
}

/// Short relative label like "5 min ago". Future times read as "just now".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    match seconds {
        s if s < 60 => "just now".to_owned(),
        s if s < 3_600 => format!("{} min ago", s / 60),
        s if s < 86_400 => format!("{} hr ago", s / 3_600),
        s => {
            let days = s / 86_400;
            if days == 1 {
                "1 day ago".to_owned()
            } else {
                format!("{days} days ago")
            }
        }
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
