//! Core library for heuristic résumé and job posting extraction.
//!
//! This crate provides:
//! - Text normalization for pasted, PDF and word processor text
//! - Résumé section detection and field extraction into `ExtractionRecord`
//! - Job posting extraction into `JobRecord`
//! - Document loading for `.txt`, `.md` and `.pdf` files (`native` feature)
//!
//! Extraction is pure and never fails: missing information shows up as empty
//! fields, which callers inspect through `ExtractionRecord::missing_fields`.

pub mod error;
pub mod extract;
pub mod models;
#[cfg(feature = "native")]
pub mod document;

pub use error::{DocumentError, InputError, Result, VitaeError};
pub use extract::{
    extract, extract_job, ExtractionResult, HeuristicExtractor, JobExtractor, RecordExtractor,
    ResumeParser,
};
pub use models::{
    Certification, EducationEntry, ExperienceEntry, ExtractionConfig, ExtractionHints,
    ExtractionRecord, InputConfig, JobRecord, Language, PersonalInfo, Project, Provenance,
    RawDocument, SourceKind, VitaeConfig, Vocabulary,
};
#[cfg(feature = "native")]
pub use document::DocumentLoader;
