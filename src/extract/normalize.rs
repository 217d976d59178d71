// src/extract/normalize.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const COUNTRY_EN: &str = "Bangladesh";
pub const COUNTRY_BN: &str = "বাংলাদেশ";

/// How free-text cells are rewritten before they land in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Copy cell text unchanged.
    #[default]
    Verbatim,
    /// Lowercase, then capitalize each whitespace-separated word.
    TitleCase,
}

impl NormalizeMode {
    pub fn apply(self, text: &str) -> String {
        match self {
            NormalizeMode::Verbatim => text.to_string(),
            NormalizeMode::TitleCase => title_case(text),
        }
    }
}

impl FromStr for NormalizeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" | "raw" => Ok(NormalizeMode::Verbatim),
            "title" | "title_case" | "titlecase" => Ok(NormalizeMode::TitleCase),
            other => Err(anyhow::anyhow!("unknown normalize mode {:?}", other)),
        }
    }
}

/// `"DHAKA north  city"` → `"Dhaka North City"`.
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    // Multi-char expansions (ß → SS) would not survive a second pass.
    let head = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    std::iter::once(head).chain(chars).collect()
}

/// Ensure `place` ends with exactly one `country` segment.
///
/// A place that already ends with the country comes back as given (trimmed),
/// keeping its own spelling and separator; otherwise `", <country>"` is
/// appended. Extra trailing copies are dropped, keeping the last one. Empty
/// input yields the bare country. `fold_case` compares ASCII
/// case-insensitively.
pub fn with_country_suffix(place: &str, country: &str, fold_case: bool) -> String {
    let place = place.trim();
    if place.is_empty() {
        return country.to_string();
    }
    let Some(rest) = strip_trailing_segment(place, country, fold_case) else {
        return format!("{}, {}", place, country);
    };

    let first_head = trim_separators(rest);
    // separator plus the country as written on the page
    let tail = &place[first_head.len()..];
    let mut head = first_head;
    while let Some(more) = strip_trailing_segment(head, country, fold_case) {
        head = trim_separators(more);
    }

    if head.len() == first_head.len() {
        place.to_string()
    } else if head.is_empty() {
        tail.trim_start_matches(is_separator).to_string()
    } else {
        format!("{}{}", head, tail)
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn trim_separators(text: &str) -> &str {
    text.trim_end_matches(is_separator)
}

/// Strip `segment` off the end of `text` when it sits on a word boundary.
fn strip_trailing_segment<'a>(text: &'a str, segment: &str, fold_case: bool) -> Option<&'a str> {
    let split = text.len().checked_sub(segment.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (rest, tail) = text.split_at(split);
    let matches = if fold_case {
        tail.eq_ignore_ascii_case(segment)
    } else {
        tail == segment
    };
    let on_boundary = rest
        .chars()
        .next_back()
        .map_or(true, is_separator);
    (matches && on_boundary).then_some(rest)
}
