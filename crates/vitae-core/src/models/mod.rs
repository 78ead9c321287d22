//! Data models for extraction input, output and configuration.

pub mod config;
pub mod document;
pub mod job;
pub mod record;

pub use config::{ExtractionConfig, InputConfig, SectionKeywords, VitaeConfig, Vocabulary};
pub use document::{ExtractionHints, RawDocument, SourceKind};
pub use job::JobRecord;
pub use record::{
    Certification, EducationEntry, ExperienceEntry, ExtractionRecord, Language, PersonalInfo,
    Project, Provenance,
};
