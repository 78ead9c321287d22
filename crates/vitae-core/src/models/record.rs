//! Structured output of résumé extraction.
//!
//! Every field has an empty default and nothing is optional: downstream code
//! (form UI, datastore) can rely on strings and sequences always being
//! present in the serialized JSON.

use serde::{Deserialize, Serialize};

/// Where a value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Found in the input text.
    #[default]
    Extracted,
    /// Placeholder generated so the UI never shows a blank record.
    Synthesized,
}

impl Provenance {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Provenance::Synthesized)
    }
}

/// A complete résumé extraction result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionRecord {
    /// Contact details and summary.
    pub personal: PersonalInfo,

    /// Work history in document order.
    pub experience: Vec<ExperienceEntry>,

    /// Education history in document order.
    pub education: Vec<EducationEntry>,

    /// Title-cased skills, unique ignoring case, capped.
    pub skills: Vec<String>,

    /// Projects, possibly one synthesized placeholder.
    pub projects: Vec<Project>,

    /// Certifications and licenses.
    pub certifications: Vec<Certification>,

    /// Spoken languages.
    pub languages: Vec<Language>,

    /// Interests and hobbies.
    pub interests: Vec<String>,
}

/// Personal and contact information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,

    /// Whether `summary` was found or generated.
    pub summary_provenance: Provenance,
}

/// A single position held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_year: String,
    /// Four-digit year, `Present`, or empty.
    pub end_year: String,
    /// Bullet points, newline-joined, markers stripped.
    pub description: String,
}

impl ExperienceEntry {
    /// Check if the entry has any data.
    pub fn is_empty(&self) -> bool {
        self.company.is_empty()
            && self.position.is_empty()
            && self.location.is_empty()
            && !self.is_dated()
            && self.description.is_empty()
    }

    /// Whether a date range has been seen for this entry.
    pub fn is_dated(&self) -> bool {
        !self.start_year.is_empty() || !self.end_year.is_empty()
    }
}

/// A single school attended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub location: String,
    pub start_year: String,
    pub end_year: String,
    pub gpa: String,
}

impl EducationEntry {
    /// Check if the entry has any data.
    pub fn is_empty(&self) -> bool {
        self.school.is_empty()
            && self.degree.is_empty()
            && self.location.is_empty()
            && !self.is_dated()
            && self.gpa.is_empty()
    }

    pub fn is_dated(&self) -> bool {
        !self.start_year.is_empty() || !self.end_year.is_empty()
    }
}

/// A project listed on the résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    /// Vocabulary skills mentioned by the project.
    pub technologies: Vec<String>,
    pub provenance: Provenance,
}

/// A certification or license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

/// A spoken language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub language: String,
    pub proficiency: String,
}

impl ExtractionRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing at all was found.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == MISSING_FIELD_COUNT
    }

    /// Names of top-level fields the extractor could not fill.
    ///
    /// Synthesized content does not count as found. Callers use this to
    /// prompt "please fill in manually" warnings.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.personal.full_name.is_empty() {
            missing.push("fullName");
        }
        if self.personal.email.is_empty() {
            missing.push("email");
        }
        if self.personal.phone.is_empty() {
            missing.push("phone");
        }
        if self.personal.location.is_empty() {
            missing.push("location");
        }
        if self.personal.summary.is_empty() || self.personal.summary_provenance.is_synthesized() {
            missing.push("summary");
        }
        if self.experience.is_empty() {
            missing.push("experience");
        }
        if self.education.is_empty() {
            missing.push("education");
        }
        if self.skills.is_empty() {
            missing.push("skills");
        }
        if self.projects.iter().all(|p| p.provenance.is_synthesized()) {
            missing.push("projects");
        }
        if self.certifications.is_empty() {
            missing.push("certifications");
        }
        if self.languages.is_empty() {
            missing.push("languages");
        }
        if self.interests.is_empty() {
            missing.push("interests");
        }

        missing
    }

    /// Whether any part of the record was generated rather than found.
    pub fn has_synthesized_content(&self) -> bool {
        self.personal.summary_provenance.is_synthesized()
            || self.projects.iter().any(|p| p.provenance.is_synthesized())
    }
}

const MISSING_FIELD_COUNT: usize = 12;
