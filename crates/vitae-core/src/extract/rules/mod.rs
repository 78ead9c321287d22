//! Rule-based building blocks for résumé extraction.

pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod extras;
pub mod normalize;
pub mod patterns;
pub mod sections;
pub mod skills;

pub use contact::{
    extract_email, extract_location, extract_name, extract_phone, find_location,
    split_trailing_location, EmailExtractor, PhoneExtractor,
};
pub use dates::{parse_year_range, split_dates, YearRange};
pub use normalize::{normalize, segment, title_case};
pub use sections::{HeaderMatch, Section, SectionDetector};
pub use skills::{SkillMatcher, SkillSet};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text along with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
