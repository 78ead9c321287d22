//! Heuristic résumé parser combining normalization, contact rules, the
//! section scan and fallback synthesis.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::config::{ExtractionConfig, VitaeConfig};
use crate::models::document::{ExtractionHints, RawDocument};
use crate::models::record::ExtractionRecord;

use super::rules::contact::{extract_email, extract_location, extract_name, extract_phone};
use super::rules::normalize::{normalize, segment};
use super::rules::sections::SectionDetector;
use super::rules::skills::SkillMatcher;
use super::scan::scan_sections;
use super::synthesis::apply_fallbacks;

/// Result of résumé extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExtractionRecord,
    /// Human-readable notes about what could not be found or was generated.
    pub warnings: Vec<String>,
    /// Whether the section scan stopped at its line limit.
    pub truncated: bool,
    /// Lines the section scan looked at.
    pub lines_scanned: usize,
}

/// Trait for turning plain text into an `ExtractionRecord`.
pub trait RecordExtractor {
    /// Extract a record from raw text. Never fails.
    fn extract(&self, text: &str, hints: &ExtractionHints) -> ExtractionRecord;

    /// Extract a record from a document.
    fn extract_document(&self, document: &RawDocument) -> ExtractionRecord {
        self.extract(document.text(), &document.hints())
    }
}

/// Trait for résumé parsing with diagnostics.
pub trait ResumeParser {
    /// Parse a document into a record plus warnings.
    fn parse(&self, document: &RawDocument) -> ExtractionResult;
}

/// Rule-based résumé extractor.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    config: ExtractionConfig,
    detector: SectionDetector,
    matcher: SkillMatcher,
}

impl HeuristicExtractor {
    /// Create an extractor with the bundled configuration.
    pub fn new() -> Self {
        Self::from_config(&VitaeConfig::default())
    }

    /// Create an extractor from a full configuration.
    pub fn from_config(config: &VitaeConfig) -> Self {
        let extraction = config.extraction.clone();
        Self {
            detector: SectionDetector::new(&config.vocabulary, extraction.max_header_words),
            matcher: SkillMatcher::new(&config.vocabulary.skills),
            config: extraction,
        }
    }

    /// Set the maximum number of skills kept.
    pub fn with_max_skills(mut self, max_skills: usize) -> Self {
        self.config.max_skills = max_skills;
        self
    }

    /// Enable or disable placeholder summary and project generation.
    pub fn with_fallbacks(mut self, enabled: bool) -> Self {
        self.config.synthesize_fallbacks = enabled;
        self
    }

    /// Set the section scan line limit.
    pub fn with_max_section_lines(mut self, max_lines: usize) -> Self {
        self.config.max_section_lines = max_lines;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Normalize text the same way extraction does.
    pub fn normalize(&self, text: &str, hints: &ExtractionHints) -> String {
        normalize(text, hints.kind(), self.config.strip_punctuation)
    }

    fn run(&self, text: &str, hints: &ExtractionHints) -> ExtractionResult {
        info!(chars = text.len(), kind = ?hints.kind(), "Extracting résumé");

        let normalized = self.normalize(text, hints);
        let lines = segment(
            &normalized,
            self.config.min_segment_len,
            self.config.sentence_split_len,
        );
        debug!(lines = lines.len(), "Segmented text");

        let mut record = ExtractionRecord::new();
        record.personal.email = extract_email(&normalized).unwrap_or_default();
        record.personal.phone = extract_phone(&normalized).unwrap_or_default();
        record.personal.full_name = extract_name(&lines, &self.detector, &self.config).unwrap_or_default();
        record.personal.location =
            extract_location(&lines, &self.detector, &self.config).unwrap_or_default();
        debug!(
            name = !record.personal.full_name.is_empty(),
            email = !record.personal.email.is_empty(),
            phone = !record.personal.phone.is_empty(),
            location = !record.personal.location.is_empty(),
            "Contact fields extracted"
        );

        let scan = scan_sections(&lines, &self.detector, &self.matcher, &self.config);
        debug!(sections = ?scan.sections_seen, "Sections found");
        record.personal.summary = scan.summary;
        record.experience = scan.experience;
        record.education = scan.education;
        record.skills = scan.skills;
        record.projects = scan.projects;
        record.certifications = scan.certifications;
        record.languages = scan.languages;
        record.interests = scan.interests;

        let mut warnings = Vec::new();

        if scan.truncated {
            warn!(limit = self.config.max_section_lines, "Section scan truncated");
            warnings.push(format!(
                "Only the first {} lines were scanned for sections",
                self.config.max_section_lines
            ));
        }

        for field in record.missing_fields() {
            warnings.push(format!("Could not find {}", field));
        }

        if self.config.synthesize_fallbacks {
            for field in apply_fallbacks(&mut record) {
                debug!(field, "Synthesized placeholder");
                warnings.push(format!("Generated a placeholder {}; please review it", field));
            }
        }

        info!(
            experience = record.experience.len(),
            education = record.education.len(),
            skills = record.skills.len(),
            warnings = warnings.len(),
            "Extraction complete"
        );

        ExtractionResult {
            record,
            warnings,
            truncated: scan.truncated,
            lines_scanned: scan.lines_scanned,
        }
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for HeuristicExtractor {
    fn extract(&self, text: &str, hints: &ExtractionHints) -> ExtractionRecord {
        self.run(text, hints).record
    }
}

impl ResumeParser for HeuristicExtractor {
    fn parse(&self, document: &RawDocument) -> ExtractionResult {
        self.run(document.text(), &document.hints())
    }
}
