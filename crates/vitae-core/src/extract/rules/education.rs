//! Education section builder.

use super::contact::split_trailing_location;
use super::dates::split_dates;
use super::normalize::{is_bullet, strip_bullet};
use super::patterns::{GPA, LOCATION_LINE};
use crate::models::record::EducationEntry;

const SCHOOL_WORDS: &[&str] = &[
    "universit", "college", "institut", "school", "academy", "polytechnic", "conservatory",
];

const DEGREE_WORDS: &[&str] = &[
    "bachelor", "master", "associate", "doctor", "diploma", "degree", "certificate",
];

/// Compared with dots removed, so `B.S.` and `Ph.D.` match too.
const DEGREE_ABBREVIATIONS: &[&str] = &[
    "phd", "mba", "bsc", "msc", "ba", "bs", "ma", "ms", "bba", "beng", "meng", "llb", "llm",
    "jd", "md", "mph", "bfa", "mfa", "ged",
];

const PART_SEPARATORS: &[&str] = &[", ", " - ", " at ", " from "];

/// Accumulates education entries line by line.
#[derive(Debug, Clone, Default)]
pub struct EducationBuilder {
    current: EducationEntry,
    entries: Vec<EducationEntry>,
}

impl EducationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one normalized line of the education section.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let bullet = is_bullet(line);
        let mut text = strip_bullet(line).to_string();

        let gpa = GPA
            .captures(&text)
            .and_then(|caps| Some((caps.get(1)?.as_str().to_string(), caps.get(0)?.range())));
        if let Some((gpa, span)) = gpa {
            if !self.current.gpa.is_empty() {
                self.flush();
            }
            self.current.gpa = gpa;
            text.replace_range(span, " ");
        }

        let (rest, range) = split_dates(&text);
        if !range.is_empty() && self.current.is_dated() {
            self.flush();
        }

        let (rest, location) = split_trailing_location(&rest);
        if LOCATION_LINE.is_match(rest) {
            self.set_location(rest);
        } else {
            self.set_location(location);
            self.push_parts(rest, bullet || !range.is_empty());
        }

        if !range.is_empty() {
            self.current.start_year = range.start;
            self.current.end_year = range.end;
        }
    }

    fn push_parts(&mut self, text: &str, secondary: bool) {
        let parts = split_parts(text);
        let line_has_degree = parts.iter().any(|p| is_degree(p) && !is_school(p));
        let mut leftovers = Vec::new();

        for part in parts {
            if is_school(part) {
                if !self.current.school.is_empty() || self.is_complete_and_dated() {
                    self.flush();
                }
                self.current.school = part.to_string();
            } else if is_degree(part) {
                if !self.current.degree.is_empty() || self.is_complete_and_dated() {
                    self.flush();
                }
                self.current.degree = part.to_string();
            } else if line_has_degree {
                leftovers.push(part);
            } else if secondary {
                continue;
            } else if !self.current.degree.is_empty() && self.current.school.is_empty() {
                // Field of study on its own line under the degree
                append(&mut self.current.degree, part);
            } else if self.current.school.is_empty()
                && self.current.degree.is_empty()
                && part.starts_with(char::is_uppercase)
            {
                // Schools without a keyword ("Stanford")
                self.current.school = part.to_string();
            }
        }

        for part in leftovers {
            append(&mut self.current.degree, part);
        }
    }

    fn set_location(&mut self, location: &str) {
        if !location.is_empty() && self.current.location.is_empty() {
            self.current.location = location.to_string();
        }
    }

    fn is_complete_and_dated(&self) -> bool {
        self.current.is_dated() && !self.current.school.is_empty() && !self.current.degree.is_empty()
    }

    /// Close the entry in progress, dropping it if it holds nothing.
    pub fn flush(&mut self) {
        let entry = std::mem::take(&mut self.current);
        if !entry.is_empty() {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[EducationEntry] {
        &self.entries
    }

    /// Flush and return every entry in document order.
    pub fn finish(mut self) -> Vec<EducationEntry> {
        self.flush();
        self.entries
    }
}

fn append(field: &mut String, part: &str) {
    if !field.is_empty() {
        field.push_str(", ");
    }
    field.push_str(part);
}

fn split_parts(text: &str) -> Vec<&str> {
    let mut parts = vec![text];
    for sep in PART_SEPARATORS {
        parts = parts.into_iter().flat_map(|p| p.split(sep)).collect();
    }
    parts
        .into_iter()
        .map(|p| p.trim_matches([' ', ',', '-', ';']))
        .filter(|p| !p.is_empty())
        .collect()
}

fn words_lower(part: &str) -> impl Iterator<Item = String> + '_ {
    part.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '.').to_lowercase())
}

/// Whether a fragment names a school.
pub fn is_school(part: &str) -> bool {
    words_lower(part).any(|w| SCHOOL_WORDS.iter().any(|k| w.starts_with(k)))
}

/// Whether a fragment names a degree.
pub fn is_degree(part: &str) -> bool {
    part.split_whitespace().any(|word| {
        let lower = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.').to_lowercase();
        if DEGREE_WORDS.iter().any(|k| lower.starts_with(k)) {
            return true;
        }
        let bare = lower.replace('.', "");
        // "ms" and "ma" are words too; only abbreviations written as such count
        let written_as_abbreviation = word.contains('.') || word.chars().any(char::is_uppercase);
        written_as_abbreviation && DEGREE_ABBREVIATIONS.contains(&bare.as_str())
    })
}
