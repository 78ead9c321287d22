//! Structured output of job posting extraction.

use serde::{Deserialize, Serialize};

/// A job posting reduced to the fields a cover letter needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Contact or application address.
    pub email: String,
    /// Canonical form: `Full-time`, `Part-time`, `Contract`, `Internship`,
    /// `Temporary` or `Freelance`.
    pub employment_type: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    /// Title-cased vocabulary skills mentioned anywhere in the posting.
    pub skills: Vec<String>,
}

impl JobRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing at all was found.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
