//! Year and date-range parsing for experience and education entries.

use super::patterns::{MONTH_YEAR, NUMERIC_MONTH_YEAR, PRESENT, RANGE_WORD, YEAR};

/// Marker stored in `endYear` for ongoing entries.
pub const PRESENT_LABEL: &str = "Present";

const SEPARATORS: &[char] = &[' ', ',', '-', '|', '(', ')', ':', ';'];

/// Start and end of an entry. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: String,
    pub end: String,
}

impl YearRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

/// All four-digit years in the text, in order.
pub fn years_in(text: &str) -> Vec<&str> {
    YEAR.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether the line carries a year together with a range connector.
pub fn is_date_range_line(line: &str) -> bool {
    YEAR.is_match(line) && (line.contains('-') || RANGE_WORD.is_match(line) || PRESENT.is_match(line))
}

/// Interpret the years in a piece of text as a range.
///
/// Two or more years give start and end. A single year is the start of an
/// ongoing range when followed by `Present` or an open connector, otherwise
/// it is the end year (a graduation year, say).
pub fn parse_year_range(text: &str) -> YearRange {
    let years: Vec<_> = YEAR.find_iter(text).collect();
    let (Some(first), Some(last)) = (years.first(), years.last()) else {
        return YearRange::default();
    };

    let tail = &text[last.end()..];
    let ongoing = PRESENT.is_match(tail);

    if years.len() >= 2 {
        let end = if ongoing { PRESENT_LABEL } else { last.as_str() };
        return YearRange::new(first.as_str(), end);
    }

    if ongoing {
        YearRange::new(first.as_str(), PRESENT_LABEL)
    } else if tail.contains('-') || RANGE_WORD.is_match(tail) {
        YearRange::new(first.as_str(), "")
    } else {
        YearRange::new("", first.as_str())
    }
}

/// Split a line into its non-date text and its year range.
///
/// `Senior Engineer, Acme (Jan 2020 - Present)` gives
/// `("Senior Engineer, Acme", 2020..Present)`.
pub fn split_dates(line: &str) -> (String, YearRange) {
    let start = [&*MONTH_YEAR, &*NUMERIC_MONTH_YEAR, &*YEAR]
        .iter()
        .filter_map(|re| re.find(line).map(|m| m.start()))
        .min();
    let Some(start) = start else {
        return (line.trim().to_string(), YearRange::default());
    };

    let last_year = YEAR.find_iter(line).last().map_or(start, |m| m.end());
    let present = PRESENT
        .find_iter(&line[start..])
        .last()
        .map_or(start, |m| start + m.end());
    let end = last_year.max(present);

    let range = parse_year_range(&line[start..end]);

    let before = line[..start].trim_matches(SEPARATORS);
    let after = line[end..].trim_matches(SEPARATORS);
    let rest = match (before.is_empty(), after.is_empty()) {
        (false, false) => format!("{} {}", before, after),
        (false, true) => before.to_string(),
        (true, _) => after.to_string(),
    };

    (rest, range)
}
