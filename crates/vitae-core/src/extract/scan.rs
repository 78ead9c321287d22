//! Single-pass section scan over segmented lines.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::rules::education::EducationBuilder;
use super::rules::experience::ExperienceBuilder;
use super::rules::extras::{
    merge_unique, parse_certification, parse_interests, parse_languages, ProjectBuilder,
    SummaryBuilder,
};
use super::rules::sections::{Section, SectionDetector};
use super::rules::skills::{skill_tokens, SkillMatcher, SkillSet};
use crate::models::config::ExtractionConfig;
use crate::models::record::{Certification, EducationEntry, ExperienceEntry, Language, Project};

/// Everything the section scan found.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScanOutput {
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub interests: Vec<String>,
    /// Sections in the order their headers appeared.
    pub sections_seen: Vec<Section>,
    pub lines_scanned: usize,
    pub truncated: bool,
}

struct SectionState<'a> {
    matcher: &'a SkillMatcher,
    current: Section,
    summary: SummaryBuilder,
    experience: ExperienceBuilder,
    education: EducationBuilder,
    skills: SkillSet,
    projects: ProjectBuilder,
    certifications: Vec<Certification>,
    languages: Vec<Language>,
    interests: Vec<String>,
    interest_keys: HashSet<String>,
    sections_seen: Vec<Section>,
}

impl<'a> SectionState<'a> {
    fn new(matcher: &'a SkillMatcher, config: &ExtractionConfig) -> Self {
        Self {
            matcher,
            current: Section::Contact,
            summary: SummaryBuilder::default(),
            experience: ExperienceBuilder::new(config.title_min_len),
            education: EducationBuilder::new(),
            skills: SkillSet::new(config.max_skills),
            projects: ProjectBuilder::default(),
            certifications: Vec::new(),
            languages: Vec::new(),
            interests: Vec::new(),
            interest_keys: HashSet::new(),
            sections_seen: Vec::new(),
        }
    }

    fn switch(&mut self, section: Section) {
        match self.current {
            Section::Experience => self.experience.flush(),
            Section::Education => self.education.flush(),
            Section::Projects => self.projects.flush(),
            _ => {}
        }
        trace!(from = %self.current, to = %section, "Section switch");
        self.current = section;
        self.sections_seen.push(section);
    }

    fn feed(&mut self, line: &str) {
        match self.current {
            Section::Contact => {}
            Section::Summary => self.summary.push_line(line),
            Section::Experience => self.experience.push_line(line),
            Section::Education => self.education.push_line(line),
            Section::Skills => {
                for token in skill_tokens(line) {
                    if self.skills.is_full() {
                        break;
                    }
                    if let Some(skill) = self.matcher.lookup(token) {
                        self.skills.push(skill);
                    }
                }
            }
            Section::Projects => self.projects.push_line(line),
            Section::Certifications => self.certifications.extend(parse_certification(line)),
            Section::Languages => self.languages.extend(parse_languages(line)),
            Section::Interests => {
                merge_unique(&mut self.interests, &mut self.interest_keys, parse_interests(line))
            }
        }
    }

    fn finish(self, lines_scanned: usize, truncated: bool) -> ScanOutput {
        ScanOutput {
            summary: self.summary.finish(),
            experience: self.experience.finish(),
            education: self.education.finish(),
            skills: self.skills.into_vec(),
            projects: self.projects.finish(self.matcher),
            certifications: self.certifications,
            languages: self.languages,
            interests: self.interests,
            sections_seen: self.sections_seen,
            lines_scanned,
            truncated,
        }
    }
}

/// Walk the lines once, routing each to the builder of the current section.
pub(crate) fn scan_sections(
    lines: &[&str],
    detector: &SectionDetector,
    matcher: &SkillMatcher,
    config: &ExtractionConfig,
) -> ScanOutput {
    let mut state = SectionState::new(matcher, config);
    let limit = config.max_section_lines;
    let truncated = lines.len() > limit;

    for line in lines.iter().take(limit) {
        match detector.detect(line) {
            // Re-announcing the current section in plain text is content
            Some(header) if header.section != state.current || header.emphatic => {
                state.switch(header.section);
                if let Some(inline) = header.inline {
                    state.feed(inline);
                }
            }
            _ => state.feed(line),
        }
    }

    let scanned = lines.len().min(limit);
    debug!(lines = scanned, sections = state.sections_seen.len(), truncated, "Section scan complete");
    state.finish(scanned, truncated)
}
