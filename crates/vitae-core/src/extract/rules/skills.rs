//! Skill vocabulary matching.

use std::collections::HashSet;

use super::normalize::{strip_bullet, title_case, BULLET};
use crate::models::config::Vocabulary;

/// Vocabulary terms that are also everyday words. In free text they only
/// count when written capitalized ("Go", "REST").
const AMBIGUOUS: &[&str] = &[
    "go", "rest", "excel", "spring", "express", "swift", "rust", "dart", "shell", "oracle",
    "react", "spark", "rails", "flask", "sap", "lua", "perl", "ruby", "testing", "research",
    "presentation", "organization", "communication", "leadership", "networking", "statistics",
];

/// Case-insensitive lookup against the skill vocabulary.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    terms: HashSet<String>,
    max_words: usize,
}

impl SkillMatcher {
    pub fn new(skills: &[String]) -> Self {
        let terms: HashSet<String> = skills
            .iter()
            .map(|s| collapse(&s.to_lowercase()))
            .filter(|s| !s.is_empty())
            .collect();
        let max_words = terms
            .iter()
            .map(|t| t.split(' ').count())
            .max()
            .unwrap_or(1)
            .min(3);

        Self { terms, max_words }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Match a whole token, returning its display form.
    pub fn lookup(&self, token: &str) -> Option<String> {
        let key = collapse(&token.to_lowercase());
        self.terms.contains(&key).then(|| title_case(&key))
    }

    /// Find vocabulary terms anywhere in free text, longest phrase first.
    pub fn find_in_text(&self, text: &str) -> Vec<String> {
        let words = words(text);
        let mut found = Vec::new();
        let mut i = 0;

        'outer: while i < words.len() {
            for n in (1..=self.max_words.min(words.len() - i)).rev() {
                let phrase = words[i..i + n].join(" ").to_lowercase();
                if self.terms.contains(&phrase) && self.accept_in_text(&phrase, words[i]) {
                    found.push(title_case(&phrase));
                    i += n;
                    continue 'outer;
                }
            }
            i += 1;
        }

        found
    }

    fn accept_in_text(&self, phrase: &str, original: &str) -> bool {
        if phrase.chars().count() < 2 {
            return false;
        }
        let lowercase = original.chars().next().is_some_and(char::is_lowercase);
        !(lowercase && AMBIGUOUS.contains(&phrase))
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(&Vocabulary::default().skills)
    }
}

/// Ordered skill list, unique ignoring case, with a hard cap.
#[derive(Debug, Clone)]
pub struct SkillSet {
    items: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl SkillSet {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    /// Add a skill; returns false when it was a duplicate or the set is full.
    pub fn push(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.is_full() || !self.seen.insert(skill.to_lowercase()) {
            return false;
        }
        self.items.push(skill);
        true
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, skills: I) {
        for skill in skills {
            if self.is_full() {
                break;
            }
            self.push(skill);
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Split a skills-section line into candidate tokens.
pub fn skill_tokens(line: &str) -> Vec<&str> {
    let line = strip_bullet(line.trim());
    let body = match line.split_once(':') {
        Some((label, rest)) if label.split_whitespace().count() <= 4 => rest,
        _ => line,
    };

    body.split([',', ';', BULLET, '(', ')', '|'])
        .flat_map(|part| part.split(" and "))
        .flat_map(|part| part.split(" & "))
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_token(token: &str) -> &str {
    let token = token
        .trim()
        .trim_end_matches('.')
        .trim_matches(['-', '"', '\'', ' ']);
    token
        .strip_prefix("and ")
        .or_else(|| token.strip_prefix("& "))
        .unwrap_or(token)
        .trim()
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words of free text, keeping the punctuation skill names use (`c++`,
/// `node.js`, `ci/cd`, `.net`).
fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || "+#./-_".contains(c)))
        .map(|w| w.trim_end_matches(['.', '/', '-']).trim_start_matches(['/', '-']))
        .filter(|w| !w.is_empty())
        .collect()
}
