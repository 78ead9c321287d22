//! Text normalization and line segmentation.
//!
//! Normalization is idempotent: running it on its own output is a no-op.
//! It never touches `@ . , - ( ) + / ' & # %`, which the contact and date
//! matchers depend on.

use crate::models::document::SourceKind;

/// Canonical bullet marker.
pub const BULLET: char = '•';

/// Decorative punctuation replaced by spaces when stripping is enabled.
const PUNCTUATION_BLACKLIST: &[char] = &['*', '|', '~', '^', '`', '{', '}', '[', ']', '<', '>', '=', '\\'];

/// UTF-8 text that was decoded as Windows-1252 somewhere upstream.
const MOJIBAKE: &[(&str, &str)] = &[
    ("â€¢", "•"),
    ("â€“", "-"),
    ("â€”", "-"),
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("Ã©", "é"),
    ("Ã¨", "è"),
    ("Ã¡", "á"),
    ("Ã±", "ñ"),
    ("Ã¶", "ö"),
    ("Ã¼", "ü"),
];

enum Mapped {
    Keep(char),
    Space,
    Newline,
    Drop,
}

/// Normalize raw text for extraction.
pub fn normalize(text: &str, kind: SourceKind, strip_punctuation: bool) -> String {
    let repaired = repair_mojibake(&text.replace("\r\n", "\n"));
    let mapped = repair_mojibake(&map_chars(&repaired, kind, strip_punctuation));

    let mut lines: Vec<String> = mapped.split('\n').map(clean_line).collect();

    if kind == SourceKind::Pdf {
        lines = join_hyphenated(lines);
    }

    collapse_blank_lines(lines).join("\n")
}

fn repair_mojibake(text: &str) -> String {
    if !text.contains('â') && !text.contains('Ã') {
        return text.to_string();
    }
    MOJIBAKE
        .iter()
        .fold(text.to_string(), |acc, (bad, good)| acc.replace(bad, good))
}

fn map_chars(text: &str, kind: SourceKind, strip_punctuation: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;

    for c in text.chars() {
        let mapped = match c {
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{85}' | '\u{2028}' | '\u{2029}' => Mapped::Newline,
            '\t' if kind == SourceKind::OfficeDocument => Mapped::Newline,
            '\u{2010}'..='\u{2015}' | '\u{2212}' => Mapped::Keep('-'),
            '\u{2022}' | '\u{25cf}' | '\u{25aa}' | '\u{25e6}' | '\u{2023}' | '\u{25a0}'
            | '\u{25c6}' | '\u{2043}' | '\u{2219}' | '\u{f0b7}' | '\u{f0a7}' => Mapped::Keep(BULLET),
            '\u{2018}' | '\u{2019}' => Mapped::Keep('\''),
            '\u{201c}' | '\u{201d}' => Mapped::Keep('"'),
            '\u{200b}'..='\u{200d}' | '\u{2060}' | '\u{feff}' | '\u{fffd}' => Mapped::Drop,
            '\u{e000}'..='\u{f8ff}' => Mapped::Drop,
            '*' if at_line_start => Mapped::Keep(BULLET),
            c if c.is_whitespace() => Mapped::Space,
            c if c.is_control() => Mapped::Drop,
            c if strip_punctuation && PUNCTUATION_BLACKLIST.contains(&c) => Mapped::Space,
            c => Mapped::Keep(c),
        };

        match mapped {
            Mapped::Keep(c) => {
                out.push(c);
                at_line_start = false;
            }
            Mapped::Space => out.push(' '),
            Mapped::Newline => {
                out.push('\n');
                at_line_start = true;
            }
            Mapped::Drop => {}
        }
    }

    out
}

fn clean_line(line: &str) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(rest) = collapsed.strip_prefix(BULLET) {
        let rest = rest.trim_start_matches([BULLET, ' ']);
        if rest.is_empty() {
            return String::new();
        }
        return format!("{} {}", BULLET, rest);
    }

    collapsed
}

/// Re-join words a PDF layout split across lines ("manage-" / "ment").
fn join_hyphenated(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        if let Some(prev) = out.last_mut() {
            let starts_lower = line.chars().next().is_some_and(|c| c.is_lowercase());
            if starts_lower && ends_with_hyphenated_word(prev) {
                prev.pop();
                prev.push_str(&line);
                continue;
            }
        }
        out.push(line);
    }

    out
}

fn ends_with_hyphenated_word(line: &str) -> bool {
    let mut rev = line.chars().rev();
    rev.next() == Some('-') && rev.next().is_some_and(|c| c.is_alphabetic())
}

fn collapse_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        if line.is_empty() && out.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out
}

/// Split normalized text into candidate lines, dropping noise.
///
/// Lines longer than `split_len` chars are also split into sentences, which
/// keeps run-on text from PDF extraction usable.
pub fn segment(normalized: &str, min_len: usize, split_len: usize) -> Vec<&str> {
    let mut segments = Vec::new();

    for line in normalized.lines() {
        if line.len() > split_len && line.chars().count() > split_len {
            segments.extend(split_sentences(line));
        } else {
            segments.push(line.trim());
        }
    }

    segments.retain(|s| s.chars().count() >= min_len.max(1));
    segments
}

fn split_sentences(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            let next_upper = line[i + 2..].chars().next().is_some_and(|c| c.is_uppercase());
            if next_upper && i + 1 > start {
                out.push(line[start..=i].trim());
                start = i + 2;
            }
        }
    }

    out.push(line[start..].trim());
    out
}

/// Whether a normalized line starts with a bullet marker.
pub fn is_bullet(line: &str) -> bool {
    if line.starts_with(BULLET) {
        return true;
    }
    match line.strip_prefix('-') {
        Some(rest) => !rest.trim_start().starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Remove a leading bullet marker, if any.
pub fn strip_bullet(line: &str) -> &str {
    if is_bullet(line) {
        line.trim_start_matches([BULLET, '-', ' '])
    } else {
        line
    }
}

/// Title-case each word: first letter upper, the rest lower.
///
/// `/` and `-` also start a word, so "ci/cd" becomes "Ci/Cd".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
            if c.is_whitespace() || c == '/' || c == '-' {
                word_start = true;
            } else if c.is_alphanumeric() {
                word_start = false;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(text: &str) -> String {
        normalize(text, SourceKind::PlainText, true)
    }

    #[test]
    fn test_collapses_whitespace_and_blank_lines() {
        let text = "  Jane   Smith \r\n\r\n\r\n\tSenior\u{00a0}Engineer  \n\n";
        assert_eq!(plain(text), "Jane Smith\n\nSenior Engineer");
    }

    #[test]
    fn test_preserves_contact_punctuation() {
        let text = "**jane.smith@example.com** | (415) 555-0100 | +1 415.555.0100";
        assert_eq!(
            plain(text),
            "• jane.smith@example.com (415) 555-0100 +1 415.555.0100"
        );
    }

    #[test]
    fn test_strips_control_and_invisible_characters() {
        let text = "Ja\u{0}ne\u{200b} Smith\u{1b}\u{feff}";
        assert_eq!(plain(text), "Jane Smith");
    }

    #[test]
    fn test_canonicalizes_bullets() {
        assert_eq!(plain("\u{25cf}Led team\n\u{f0b7} Shipped\n* Fixed"), "• Led team\n• Shipped\n• Fixed");
        assert_eq!(plain("•"), "");
    }

    #[test]
    fn test_repairs_mojibake() {
        assert_eq!(plain("â€¢ Led platform rewrite"), "• Led platform rewrite");
        assert_eq!(plain("2020 â€“ 2023"), "2020 - 2023");
        assert_eq!(plain("2020 \u{2013} 2023"), "2020 - 2023");
    }

    #[test]
    fn test_pdf_dehyphenation() {
        let text = "Led manage-\nment of the platform";
        assert_eq!(normalize(text, SourceKind::Pdf, true), "Led management of the platform");
        assert_eq!(plain(text), "Led manage-\nment of the platform");
    }

    #[test]
    fn test_office_tabs_become_lines() {
        let text = "Senior Engineer\tAcme Corp\t2020 - 2023";
        assert_eq!(
            normalize(text, SourceKind::OfficeDocument, true),
            "Senior Engineer\nAcme Corp\n2020 - 2023"
        );
    }

    #[test]
    fn test_keep_punctuation_when_not_stripping() {
        assert_eq!(normalize("a | b", SourceKind::PlainText, false), "a | b");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  Jane Smith \n\n\n • Led\t\tthings | more  ",
            "â\u{1}€¢ odd\r\nmanage-\nment",
            "***\n\u{2022}\u{2022} x\n- y",
            "Ã\u{0}©t\u{e000}é",
            "",
        ];
        for kind in [SourceKind::PlainText, SourceKind::Pdf, SourceKind::OfficeDocument] {
            for sample in samples {
                let once = normalize(sample, kind, true);
                let twice = normalize(&once, kind, true);
                assert_eq!(once, twice, "kind {:?}, sample {:?}", kind, sample);
            }
        }
    }

    #[test]
    fn test_segment_drops_noise() {
        let text = "Jane Smith\nab\n\nEXPERIENCE";
        assert_eq!(segment(text, 3, 200), vec!["Jane Smith", "EXPERIENCE"]);
    }

    #[test]
    fn test_segment_splits_long_lines() {
        let long = format!("{}. Second sentence here. third stays", "A".repeat(210));
        let segments = segment(&long, 3, 200);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], "Second sentence here. third stays");
    }

    #[test]
    fn test_bullets() {
        assert!(is_bullet("• Led"));
        assert!(is_bullet("- Led"));
        assert!(!is_bullet("-2020"));
        assert!(!is_bullet("Led"));
        assert_eq!(strip_bullet("• Led platform"), "Led platform");
        assert_eq!(strip_bullet("- Led"), "Led");
        assert_eq!(strip_bullet("Plain"), "Plain");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("python"), "Python");
        assert_eq!(title_case("PROJECT management"), "Project Management");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("ci/cd"), "Ci/Cd");
        assert_eq!(title_case("node.js"), "Node.js");
    }
}
