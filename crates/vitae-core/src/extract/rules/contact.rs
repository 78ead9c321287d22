//! Contact field extraction: email, phone, name and location.

use super::patterns::{EMAIL, LOCATION, LOCATION_LABEL, NAME_LINE, PHONE, TRAILING_LOCATION};
use super::sections::SectionDetector;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Email address extractor.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
            .collect()
    }
}

/// Phone number extractor.
///
/// Matched numbers are returned exactly as written.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for m in PHONE.find_iter(text) {
            // Part of a longer digit run, e.g. an ID or a date
            let digit_before = text[..m.start()].chars().next_back().is_some_and(|c| c.is_ascii_digit());
            let digit_after = text[m.end()..].chars().next().is_some_and(|c| c.is_ascii_digit());
            if digit_before || digit_after {
                continue;
            }

            let phone = m.as_str().trim().to_string();
            results.push(ExtractionMatch::new(phone, m.as_str()).with_position(m.start(), m.end()));
        }

        results
    }
}

/// Extract the first email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    EmailExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the first phone number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

/// Find the candidate's name among the leading lines.
pub fn extract_name(lines: &[&str], detector: &SectionDetector, config: &ExtractionConfig) -> Option<String> {
    lines
        .iter()
        .take(config.name_scan_lines)
        .map(|line| line.trim())
        .find(|line| {
            line.chars().count() <= config.max_name_len
                && !line.contains('@')
                && !line.chars().any(|c| c.is_ascii_digit())
                && NAME_LINE.is_match(line)
                && detector.detect(line).is_none()
        })
        .map(str::to_string)
}

/// Find the candidate's location.
///
/// Free-form matches are only taken from the contact block, the lines
/// before the first section header. `Location:` style labels count anywhere.
pub fn extract_location(lines: &[&str], detector: &SectionDetector, config: &ExtractionConfig) -> Option<String> {
    let block_end = lines
        .iter()
        .position(|line| detector.detect(line).is_some())
        .unwrap_or(lines.len());
    let in_range = |s: &str| (config.min_location_len..=config.max_location_len).contains(&s.chars().count());

    for (idx, line) in lines.iter().enumerate() {
        if let Some(caps) = LOCATION_LABEL.captures(line) {
            let value = caps[1].trim().trim_end_matches(['.', ',', ';']);
            if in_range(value) {
                return Some(value.to_string());
            }
        }

        if idx >= block_end {
            continue;
        }

        if let Some(location) = find_location(line, config) {
            return Some(location.to_string());
        }
    }

    None
}

/// First `City, ST` or `City, Country` in a line with a plausible length.
pub fn find_location<'a>(line: &'a str, config: &ExtractionConfig) -> Option<&'a str> {
    LOCATION
        .find_iter(line)
        .find(|m| {
            // "Smith, PhD" would otherwise match as "Smith, Ph"
            let cut_word = line[m.end()..].chars().next().is_some_and(|c| c.is_alphabetic());
            let len = m.as_str().chars().count();
            !cut_word && (config.min_location_len..=config.max_location_len).contains(&len)
        })
        .map(|m| m.as_str())
}

/// Split `Acme Corp, Boston, MA` into `("Acme Corp", "Boston, MA")`.
pub fn split_trailing_location(line: &str) -> (&str, &str) {
    match TRAILING_LOCATION.captures(line) {
        Some(caps) => {
            let start = caps.get(0).map_or(line.len(), |m| m.start());
            let location = caps.get(1).map_or("", |m| m.as_str());
            (line[..start].trim_end_matches([' ', '-']), location)
        }
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_email_extraction() {
        let text = "Jane Smith\njane.smith@example.com | other@example.org";
        let all = EmailExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].value, "jane.smith@example.com");
        assert_eq!(all[0].position, Some((11, 33)));
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_phone_extraction_preserves_characters() {
        assert_eq!(extract_phone("Phone: (415) 555-0100").as_deref(), Some("(415) 555-0100"));
        assert_eq!(extract_phone("+1 415.555.0100").as_deref(), Some("+1 415.555.0100"));
        assert_eq!(extract_phone("Tel +44 20 7946 0958").as_deref(), Some("+44 20 7946 0958"));
    }

    #[test]
    fn test_phone_rejects_longer_digit_runs() {
        assert_eq!(extract_phone("Order 84155550100123"), None);
        assert_eq!(extract_phone("2016-2020"), None);
    }

    #[test]
    fn test_name_from_leading_lines() {
        let detector = SectionDetector::default();
        let config = ExtractionConfig::default();

        let lines = ["Jane Smith", "jane@example.com", "EXPERIENCE"];
        assert_eq!(extract_name(&lines, &detector, &config).as_deref(), Some("Jane Smith"));

        let lines = ["RESUME", "jane@example.com", "Jane Q. Smith"];
        assert_eq!(extract_name(&lines, &detector, &config).as_deref(), Some("Jane Q. Smith"));
    }

    #[test]
    fn test_name_skips_headers_and_late_lines() {
        let detector = SectionDetector::default();
        let config = ExtractionConfig::default();

        let lines = ["Work Experience", "a", "b", "c", "d", "Jane Smith"];
        assert_eq!(extract_name(&lines, &detector, &config), None);
    }

    #[test]
    fn test_split_trailing_location() {
        assert_eq!(split_trailing_location("Acme Corp, Boston, MA"), ("Acme Corp", "Boston, MA"));
        assert_eq!(split_trailing_location("Acme Corp"), ("Acme Corp", ""));
    }

    #[test]
    fn test_location_in_contact_block() {
        let detector = SectionDetector::default();
        let config = ExtractionConfig::default();

        let lines = [
            "Jane Smith, PhD",
            "jane@example.com (415) 555-0100 San Francisco, CA",
            "EXPERIENCE",
            "Acme Corp, Boston, MA",
        ];
        assert_eq!(
            extract_location(&lines, &detector, &config).as_deref(),
            Some("San Francisco, CA")
        );
    }

    #[test]
    fn test_location_ignores_body_without_label() {
        let detector = SectionDetector::default();
        let config = ExtractionConfig::default();

        let lines = ["Jane Smith", "EXPERIENCE", "Acme Corp, Boston, MA"];
        assert_eq!(extract_location(&lines, &detector, &config), None);

        let lines = ["Jane Smith", "EXPERIENCE", "Location: Berlin, Germany"];
        assert_eq!(
            extract_location(&lines, &detector, &config).as_deref(),
            Some("Berlin, Germany")
        );
    }
}
