//! Court parsing: free-text court specification to an ordered court list.

use crate::models::Court;

/// Largest range a `"<low>-<high>"` specification may expand to.
pub const MAX_COURTS: u32 = 64;

/// Parse a court specification typed by the organizer.
///
/// - `""` or whitespace: no courts.
/// - `"1-4"`: inclusive range, "Court 1" .. "Court 4". A range of more than
///   `MAX_COURTS` courts yields no courts.
/// - `"1, 3, Stadium A"`: comma list; bare numbers become "Court <n>", anything
///   else (including names already containing "court") is kept verbatim.
///
/// Output order follows the input (ascending for ranges). Never fails: input
/// that yields nothing is an empty list and the scheduler rejects it later.
pub fn parse_courts(input: &str) -> Vec<Court> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    if let Some((low, high)) = parse_range(input) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if high - low >= MAX_COURTS {
            log::warn!("Court range {} spans more than {} courts", input, MAX_COURTS);
            return Vec::new();
        }
        return (low..=high).map(Court::numbered).collect();
    }

    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_court_name)
        .collect()
}

/// `"<int>-<int>"`, whitespace allowed around either bound.
fn parse_range(input: &str) -> Option<(u32, u32)> {
    let (low, high) = input.split_once('-')?;
    let low = low.trim();
    let high = high.trim();
    if !is_digits(low) || !is_digits(high) {
        return None;
    }
    Some((low.parse().ok()?, high.parse().ok()?))
}

fn parse_court_name(part: &str) -> Court {
    match part {
        p if is_digits(p) => Court::numbered(p),
        // "court 7", "Centre COURT": already labelled, casing kept
        p if p.to_ascii_lowercase().contains("court") => Court::new(p),
        custom => Court::new(custom),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
