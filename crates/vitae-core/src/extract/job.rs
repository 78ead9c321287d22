//! Job posting extraction.

use tracing::{debug, info};

use crate::models::config::{ExtractionConfig, VitaeConfig};
use crate::models::document::ExtractionHints;
use crate::models::job::JobRecord;

use super::rules::contact::{extract_email, find_location};
use super::rules::normalize::{is_bullet, normalize, segment, strip_bullet};
use super::rules::patterns::{ABOUT_COMPANY, EMAIL, EMPLOYMENT_TYPE, JOB_LABEL, REMOTE};
use super::rules::skills::{SkillMatcher, SkillSet};

/// Words that follow "About" in headings that do not name the company.
const NOT_A_COMPANY: &[&str] = &[
    "us", "the", "you", "this", "our", "me", "the role", "the team", "the job", "the position",
];

/// Lines of a posting that may hold its title.
const TITLE_SCAN_LINES: usize = 5;
const MAX_TITLE_LEN: usize = 80;
const MAX_TITLE_WORDS: usize = 10;
const MAX_HEADING_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobSection {
    Requirements,
    Responsibilities,
}

/// Rule-based job posting extractor.
#[derive(Debug, Clone)]
pub struct JobExtractor {
    config: ExtractionConfig,
    matcher: SkillMatcher,
    requirement_headers: Vec<String>,
    responsibility_headers: Vec<String>,
}

impl JobExtractor {
    pub fn new() -> Self {
        Self::from_config(&VitaeConfig::default())
    }

    pub fn from_config(config: &VitaeConfig) -> Self {
        let lower = |items: &[String]| items.iter().map(|s| s.to_lowercase()).collect::<Vec<_>>();
        Self {
            config: config.extraction.clone(),
            matcher: SkillMatcher::new(&config.vocabulary.skills),
            requirement_headers: lower(&config.vocabulary.job_requirement_headers),
            responsibility_headers: lower(&config.vocabulary.job_responsibility_headers),
        }
    }

    /// Set the maximum number of skills kept.
    pub fn with_max_skills(mut self, max_skills: usize) -> Self {
        self.config.max_skills = max_skills;
        self
    }

    /// Extract a job record from raw posting text. Never fails.
    pub fn extract(&self, text: &str, hints: &ExtractionHints) -> JobRecord {
        info!(chars = text.len(), kind = ?hints.kind(), "Extracting job posting");

        let normalized = normalize(text, hints.kind(), self.config.strip_punctuation);
        let lines = segment(
            &normalized,
            self.config.min_segment_len,
            self.config.sentence_split_len,
        );

        let mut job = JobRecord::new();
        job.email = extract_email(&normalized).unwrap_or_default();

        self.apply_labels(&lines, &mut job);
        self.collect_sections(&lines, &mut job);

        if job.title.is_empty() {
            if let Some((title, company)) = self.find_title(&lines) {
                job.title = title.to_string();
                if job.company.is_empty() {
                    job.company = company.to_string();
                }
            }
        }

        if job.company.is_empty() {
            job.company = find_about_company(&lines).unwrap_or_default();
        }

        if job.location.is_empty() {
            job.location = lines
                .iter()
                .find_map(|line| find_location(line, &self.config))
                .map(str::to_string)
                .or_else(|| REMOTE.is_match(&normalized).then(|| "Remote".to_string()))
                .unwrap_or_default();
        }

        if job.employment_type.is_empty() {
            job.employment_type = EMPLOYMENT_TYPE
                .find(&normalized)
                .and_then(|m| canonical_employment_type(m.as_str()))
                .unwrap_or_default()
                .to_string();
        }

        let mut skills = SkillSet::new(self.config.max_skills);
        skills.extend(self.matcher.find_in_text(&normalized));
        job.skills = skills.into_vec();

        debug!(
            requirements = job.requirements.len(),
            responsibilities = job.responsibilities.len(),
            skills = job.skills.len(),
            "Job extraction complete"
        );

        job
    }

    /// `Title: ...`, `Company: ...`, `Location: ...`, `Type: ...` labels.
    fn apply_labels(&self, lines: &[&str], job: &mut JobRecord) {
        for line in lines {
            let Some(caps) = JOB_LABEL.captures(line) else {
                continue;
            };
            let label = caps[1].to_lowercase();
            let value = caps[2].trim();

            let field = match label.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["job", "title"] | ["title"] | ["position"] | ["role"] => &mut job.title,
                ["company"] | ["employer"] | ["organization"] => &mut job.company,
                ["location"] => &mut job.location,
                _ => {
                    if job.employment_type.is_empty() {
                        job.employment_type = canonical_employment_type(value).unwrap_or_default().to_string();
                    }
                    continue;
                }
            };

            if field.is_empty() {
                *field = value.to_string();
            }
        }
    }

    fn collect_sections(&self, lines: &[&str], job: &mut JobRecord) {
        let mut section: Option<JobSection> = None;
        let mut saw_bullet = false;

        for line in lines {
            if let Some((found, inline)) = self.job_heading(line) {
                section = found;
                saw_bullet = false;
                if let (Some(section), Some(inline)) = (section, inline) {
                    push_item(job, section, inline);
                }
                continue;
            }

            let Some(current) = section else {
                continue;
            };

            if JOB_LABEL.is_match(line) {
                section = None;
                continue;
            }

            let bullet = is_bullet(line);
            if bullet {
                saw_bullet = true;
            } else if saw_bullet {
                // Prose after a bullet list ends the list
                section = None;
                continue;
            }

            push_item(job, current, strip_bullet(line));
        }
    }

    /// Recognize a heading line. Returns the section it opens (None for
    /// headings of other parts of the posting) and any inline content.
    #[allow(clippy::type_complexity)]
    fn job_heading<'a>(&self, line: &'a str) -> Option<(Option<JobSection>, Option<&'a str>)> {
        if is_bullet(line) {
            return None;
        }

        let (label, inline) = match line.split_once(':') {
            Some((label, rest)) => (label.trim(), Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line.trim(), None),
        };
        if label.chars().any(|c| c.is_ascii_digit()) || label.split_whitespace().count() > MAX_HEADING_WORDS {
            return None;
        }

        let lower = label.to_lowercase();
        if self.requirement_headers.iter().any(|h| lower.starts_with(h.as_str())) {
            return Some((Some(JobSection::Requirements), inline));
        }
        if self.responsibility_headers.iter().any(|h| lower.starts_with(h.as_str())) {
            return Some((Some(JobSection::Responsibilities), inline));
        }

        let all_caps = label.chars().any(char::is_alphabetic) && !label.chars().any(char::is_lowercase);
        let colon_terminated = line.trim_end().ends_with(':');
        if ABOUT_COMPANY.is_match(line) || all_caps || colon_terminated {
            return Some((None, None));
        }

        None
    }

    fn find_title<'a>(&self, lines: &[&'a str]) -> Option<(&'a str, &'a str)> {
        lines.iter().take(TITLE_SCAN_LINES).find_map(|line| {
            let line = line.trim();
            let plausible = line.chars().count() <= MAX_TITLE_LEN
                && line.split_whitespace().count() <= MAX_TITLE_WORDS
                && !is_bullet(line)
                && !EMAIL.is_match(line)
                && !JOB_LABEL.is_match(line)
                && !ABOUT_COMPANY.is_match(line)
                && self.job_heading(line).is_none()
                && line.starts_with(char::is_uppercase);
            if !plausible {
                return None;
            }

            for sep in [" at ", " @ "] {
                if let Some((title, company)) = line.split_once(sep) {
                    return Some((title.trim(), company.trim()));
                }
            }
            Some((line, ""))
        })
    }
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn push_item(job: &mut JobRecord, section: JobSection, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match section {
        JobSection::Requirements => job.requirements.push(text.to_string()),
        JobSection::Responsibilities => job.responsibilities.push(text.to_string()),
    }
}

fn find_about_company(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| {
        let caps = ABOUT_COMPANY.captures(line)?;
        let name = caps[1].trim();
        let lower = name.to_lowercase();
        (!NOT_A_COMPANY.contains(&lower.as_str())).then(|| name.to_string())
    })
}

/// Map an employment type phrase to its display form.
pub fn canonical_employment_type(text: &str) -> Option<&'static str> {
    let key: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();

    let canonical = match key.as_str() {
        k if k.starts_with("fulltime") => "Full-time",
        k if k.starts_with("parttime") => "Part-time",
        k if k.starts_with("contract") => "Contract",
        k if k.starts_with("intern") => "Internship",
        k if k.starts_with("temp") => "Temporary",
        k if k.starts_with("freelance") => "Freelance",
        _ => return None,
    };
    Some(canonical)
}
