//! Résumé and job posting extraction module.

mod job;
mod parser;
mod scan;
mod synthesis;
pub mod rules;

pub use job::{canonical_employment_type, JobExtractor};
pub use parser::{ExtractionResult, HeuristicExtractor, RecordExtractor, ResumeParser};
pub use synthesis::{apply_fallbacks, synthesize_project, synthesize_summary};

use lazy_static::lazy_static;

use crate::models::document::ExtractionHints;
use crate::models::job::JobRecord;
use crate::models::record::ExtractionRecord;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: HeuristicExtractor = HeuristicExtractor::new();
    static ref DEFAULT_JOB_EXTRACTOR: JobExtractor = JobExtractor::new();
}

/// Extract a résumé record with the bundled configuration.
pub fn extract(text: &str, hints: &ExtractionHints) -> ExtractionRecord {
    DEFAULT_EXTRACTOR.extract(text, hints)
}

/// Extract a job posting with the bundled configuration.
pub fn extract_job(text: &str, hints: &ExtractionHints) -> JobRecord {
    DEFAULT_JOB_EXTRACTOR.extract(text, hints)
}
