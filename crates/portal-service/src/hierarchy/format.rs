//! Display formatting for path segments.

use uuid::Uuid;

use portal_entity::hierarchy::path::is_month_segment;

use super::names::ClientNames;

/// Long English month names, indexed by month number minus one.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Map a zero-padded month segment (`01`–`12`) to its long name.
/// Anything else comes back unchanged.
pub fn month_display(segment: &str) -> String {
    if is_month_segment(segment) {
        let index = segment.parse::<usize>().unwrap_or(0);
        MONTH_NAMES[index - 1].to_string()
    } else {
        segment.to_string()
    }
}

/// Title-case a category segment: underscores become spaces, and every
/// letter that starts a word is uppercased. A letter starts a word when
/// it is at the beginning or preceded by a non-alphanumeric character,
/// so hyphenated names like `bank-reports` become `Bank-Reports`.
pub fn title_case(segment: &str) -> String {
    let spaced = segment.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev: Option<char> = None;
    for c in spaced.chars() {
        let starts_word = prev.map_or(true, |p| !p.is_alphanumeric());
        if starts_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Display string for a raw segment at the given depth.
///
/// Depth 0 is a client identifier (resolved through the name cache),
/// depth 2 a month number, depth 3 a category. Years and anything
/// deeper pass through unchanged.
pub fn display_segment(segment: &str, depth: usize, names: &ClientNames) -> String {
    match depth {
        0 => Uuid::parse_str(segment)
            .ok()
            .and_then(|id| names.get(&id))
            .unwrap_or_else(|| segment.to_string()),
        2 => month_display(segment),
        3 => title_case(segment),
        _ => segment.to_string(),
    }
}
