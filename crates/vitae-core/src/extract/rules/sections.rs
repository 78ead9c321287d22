//! Section header detection.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize::is_bullet;
use crate::models::config::Vocabulary;

/// Résumé section a line belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Everything before the first header.
    #[default]
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Interests,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Languages => "languages",
            Section::Interests => "interests",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A line recognized as a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    pub section: Section,
    /// Content after `Header:` on the same line.
    pub inline: Option<&'a str>,
    /// All caps, or terminated by a colon.
    pub emphatic: bool,
}

/// Recognizes section headers from keyword prefixes.
#[derive(Debug, Clone)]
pub struct SectionDetector {
    keywords: Vec<(Section, Vec<String>)>,
    modifiers: HashSet<String>,
    tail_words: HashSet<String>,
    max_words: usize,
}

impl SectionDetector {
    pub fn new(vocabulary: &Vocabulary, max_words: usize) -> Self {
        let s = &vocabulary.sections;
        let lower = |items: &[String]| items.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>();

        Self {
            keywords: vec![
                (Section::Summary, lower(&s.summary)),
                (Section::Experience, lower(&s.experience)),
                (Section::Education, lower(&s.education)),
                (Section::Skills, lower(&s.skills)),
                (Section::Projects, lower(&s.projects)),
                (Section::Certifications, lower(&s.certifications)),
                (Section::Languages, lower(&s.languages)),
                (Section::Interests, lower(&s.interests)),
            ],
            modifiers: lower(&vocabulary.header_modifiers).into_iter().collect(),
            tail_words: lower(&vocabulary.header_tail_words).into_iter().collect(),
            max_words,
        }
    }

    /// Check whether a normalized line is a section header.
    pub fn detect<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let line = line.trim();
        if line.is_empty() || is_bullet(line) {
            return None;
        }

        let (label, inline) = match line.split_once(':') {
            Some((label, rest)) => (label.trim(), Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        if label.is_empty() || label.contains('@') || label.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let words: Vec<String> = label
            .split_whitespace()
            .map(clean_word)
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() || words.len() > self.max_words {
            return None;
        }

        let all_caps = label.chars().any(char::is_alphabetic) && !label.chars().any(char::is_lowercase);
        let emphatic = all_caps || line.ends_with(':');

        let first = words.iter().position(|w| !self.modifiers.contains(w));
        let section = match first {
            Some(i) => match self.section_for(&words[i]) {
                Some(section) => section,
                // "Work History", "Academic Background"
                None if self.tail_words.contains(&words[i]) => {
                    words[..i].iter().rev().find_map(|w| self.section_for(w))?
                }
                None => return None,
            },
            None => words.iter().rev().find_map(|w| self.section_for(w))?,
        };

        // A plain line must read like a header all the way through.
        if !emphatic && inline.is_none() {
            let rest = first.map_or(words.len(), |i| i + 1);
            if !words[rest..].iter().all(|w| self.is_header_word(w)) {
                return None;
            }
        }

        Some(HeaderMatch {
            section,
            inline,
            emphatic,
        })
    }

    fn section_for(&self, word: &str) -> Option<Section> {
        self.keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| word.starts_with(k.as_str())))
            .map(|(section, _)| *section)
    }

    fn is_header_word(&self, word: &str) -> bool {
        self.modifiers.contains(word) || self.tail_words.contains(word) || self.section_for(word).is_some()
    }
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new(&Vocabulary::default(), 4)
    }
}

fn clean_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '&')
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detect(line: &str) -> Option<Section> {
        SectionDetector::default().detect(line).map(|h| h.section)
    }

    #[test]
    fn test_plain_headers() {
        assert_eq!(detect("EXPERIENCE"), Some(Section::Experience));
        assert_eq!(detect("Education"), Some(Section::Education));
        assert_eq!(detect("Projects"), Some(Section::Projects));
        assert_eq!(detect("Certifications & Licenses"), Some(Section::Certifications));
        assert_eq!(detect("Languages"), Some(Section::Languages));
        assert_eq!(detect("Hobbies"), Some(Section::Interests));
        assert_eq!(detect("Profile"), Some(Section::Summary));
    }

    #[test]
    fn test_modifiers_are_skipped() {
        assert_eq!(detect("Work Experience"), Some(Section::Experience));
        assert_eq!(detect("Professional Summary"), Some(Section::Summary));
        assert_eq!(detect("Technical Skills:"), Some(Section::Skills));
        assert_eq!(detect("Key Projects"), Some(Section::Projects));
        assert_eq!(detect("Work"), Some(Section::Experience));
        assert_eq!(detect("Work History"), Some(Section::Experience));
        assert_eq!(detect("Academic Background"), Some(Section::Education));
        assert_eq!(detect("Summary of Qualifications"), Some(Section::Summary));
    }

    #[test]
    fn test_rejects_non_headers() {
        assert_eq!(detect("Senior Software Engineer"), None);
        assert_eq!(detect("• Skills"), None);
        assert_eq!(detect("Experience 2020"), None);
        assert_eq!(detect("Skilled in Python"), None);
        assert_eq!(detect("Programming Languages: Python, Rust"), None);
        assert_eq!(detect("Experience building large scale distributed systems"), None);
        assert_eq!(detect("Email: jane@example.com"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_inline_content() {
        let detector = SectionDetector::default();
        let header = detector.detect("Skills: Python, Rust, SQL").unwrap();
        assert_eq!(header.section, Section::Skills);
        assert_eq!(header.inline, Some("Python, Rust, SQL"));
        assert!(!header.emphatic);
    }

    #[test]
    fn test_emphasis() {
        let detector = SectionDetector::default();
        assert!(detector.detect("SKILLS").unwrap().emphatic);
        assert!(detector.detect("Skills:").unwrap().emphatic);
        assert!(!detector.detect("Skills").unwrap().emphatic);
        // Caps lines may carry words that are not header vocabulary
        assert_eq!(
            detector.detect("EDUCATION AND CERTIFICATES").map(|h| h.section),
            Some(Section::Education)
        );
    }

    #[test]
    fn test_custom_vocabulary() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.sections.projects.push("portfolio".to_string());
        let detector = SectionDetector::new(&vocabulary, 4);
        assert_eq!(detector.detect("Portfolio").map(|h| h.section), Some(Section::Projects));
    }
}
