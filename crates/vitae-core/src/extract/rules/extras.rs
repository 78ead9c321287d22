//! Summary, projects, certifications, languages and interests.

use std::collections::HashSet;

use super::dates::{split_dates, PRESENT_LABEL};
use super::normalize::{is_bullet, strip_bullet, BULLET};
use super::skills::SkillMatcher;
use crate::models::record::{Certification, Language, Project, Provenance};

const ISSUER_SEPARATORS: &[&str] = &[" - ", ", ", " by ", " from "];
const PROJECT_SEPARATORS: &[&str] = &[" - ", ": "];
const TECH_LABELS: &[&str] = &["technologies", "technology", "tech stack", "tech", "stack", "tools", "built with"];

/// Joins summary lines into one paragraph.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    text: String,
}

impl SummaryBuilder {
    pub fn push_line(&mut self, line: &str) {
        let line = strip_bullet(line.trim());
        if line.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn finish(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone, Default)]
struct ProjectDraft {
    name: String,
    description: String,
    tech_text: String,
}

/// Accumulates projects. A non-bullet line names a project, bullets
/// describe it.
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    current: Option<ProjectDraft>,
    drafts: Vec<ProjectDraft>,
}

impl ProjectBuilder {
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if is_bullet(line) {
            let text = strip_bullet(line);
            let draft = self.current.get_or_insert_with(ProjectDraft::default);
            if let Some(tech) = tech_label(text) {
                append(&mut draft.tech_text, tech, ", ");
            } else {
                append(&mut draft.description, text, "\n");
            }
            return;
        }

        if let Some(tech) = tech_label(line) {
            let draft = self.current.get_or_insert_with(ProjectDraft::default);
            append(&mut draft.tech_text, tech, ", ");
            return;
        }

        // A sentence right under a project name is its description
        if let Some(draft) = self.current.as_mut() {
            if !draft.name.is_empty() && draft.description.is_empty() && line.split_whitespace().count() >= 8 {
                draft.description = line.to_string();
                return;
            }
        }

        self.flush();
        let (rest, _) = split_dates(line);
        let (name, description) = PROJECT_SEPARATORS
            .iter()
            .find_map(|sep| rest.split_once(sep))
            .map_or((rest.as_str(), ""), |(n, d)| (n.trim(), d.trim()));

        self.current = Some(ProjectDraft {
            name: name.to_string(),
            description: description.to_string(),
            tech_text: String::new(),
        });
    }

    /// Close the project in progress.
    pub fn flush(&mut self) {
        if let Some(draft) = self.current.take() {
            if !draft.name.is_empty() || !draft.description.is_empty() {
                self.drafts.push(draft);
            }
        }
    }

    /// Flush and resolve technologies against the skill vocabulary.
    pub fn finish(mut self, matcher: &SkillMatcher) -> Vec<Project> {
        self.flush();
        self.drafts
            .into_iter()
            .map(|draft| {
                let mut seen = HashSet::new();
                let text = format!("{}\n{}\n{}", draft.tech_text, draft.name, draft.description);
                let technologies = matcher
                    .find_in_text(&text)
                    .into_iter()
                    .filter(|t| seen.insert(t.to_lowercase()))
                    .collect();

                Project {
                    name: draft.name,
                    description: draft.description,
                    technologies,
                    provenance: Provenance::Extracted,
                }
            })
            .collect()
    }
}

fn tech_label(line: &str) -> Option<&str> {
    let (label, rest) = line.split_once(':')?;
    let label = label.trim().to_lowercase();
    TECH_LABELS.contains(&label.as_str()).then(|| rest.trim())
}

fn append(field: &mut String, text: &str, sep: &str) {
    if text.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push_str(sep);
    }
    field.push_str(text);
}

/// Parse one certification line.
pub fn parse_certification(line: &str) -> Option<Certification> {
    let (rest, range) = split_dates(strip_bullet(line.trim()));
    if rest.is_empty() {
        return None;
    }

    let year = if range.end.is_empty() || range.end == PRESENT_LABEL {
        range.start
    } else {
        range.end
    };

    let (name, issuer) = ISSUER_SEPARATORS
        .iter()
        .find_map(|sep| rest.split_once(sep))
        .map_or((rest.as_str(), ""), |(n, i)| (n.trim(), i.trim()));

    Some(Certification {
        name: name.to_string(),
        issuer: issuer.trim_matches(['(', ')']).to_string(),
        year,
    })
}

/// Parse a languages line such as `English (Native), Spanish - Fluent`.
pub fn parse_languages(line: &str) -> Vec<Language> {
    split_outside_parens(strip_bullet(line.trim()))
        .into_iter()
        .filter_map(parse_language)
        .collect()
}

fn parse_language(item: &str) -> Option<Language> {
    let item = item.trim().trim_end_matches('.');
    if item.is_empty() || item.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Some((language, rest)) = item.split_once('(') {
        return Some(Language {
            language: language.trim().to_string(),
            proficiency: rest.trim_end_matches(')').trim().to_string(),
        });
    }

    for sep in [" - ", ": "] {
        if let Some((language, proficiency)) = item.split_once(sep) {
            return Some(Language {
                language: language.trim().to_string(),
                proficiency: proficiency.trim().to_string(),
            });
        }
    }

    Some(Language {
        language: item.to_string(),
        proficiency: String::new(),
    })
}

fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | ';' | '|' | BULLET if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split an interests line into individual interests.
pub fn parse_interests(line: &str) -> Vec<String> {
    strip_bullet(line.trim())
        .split([',', ';', '|', BULLET])
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append interests, skipping ones already present ignoring case.
///
/// `seen` holds the lowercased form of everything in `target`.
pub fn merge_unique(target: &mut Vec<String>, seen: &mut HashSet<String>, items: Vec<String>) {
    for item in items {
        if seen.insert(item.to_lowercase()) {
            target.push(item);
        }
    }
}
