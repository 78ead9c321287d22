//! Common regex patterns for résumé and job posting extraction.
//!
//! All patterns run on the `regex` crate's finite-automata engine, so matching
//! is linear in the input no matter how adversarial the text is. None of them
//! are built from input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // NANP style with optional country code, or any '+'-prefixed grouping
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{3}\)\s?|\d{3}[\s.-]?)\d{3}[\s.-]?\d{4}|\+\d{1,3}(?:[\s.-]?\d{2,4}){2,4}"
    ).unwrap();

    pub static ref NAME_LINE: Regex = Regex::new(
        r"^\p{Lu}[\p{L}'\-]+(?:\s\p{Lu}[\p{L}'\-]*\.?){1,3}$"
    ).unwrap();

    // City of up to three words, then a state code or a country
    pub static ref LOCATION: Regex = Regex::new(
        r"\b\p{Lu}[\p{L}.'\-]+(?:\s\p{Lu}[\p{L}.'\-]+){0,2},\s?(?:[A-Z]{2}\b|\p{Lu}\p{Ll}+(?:\s\p{Lu}\p{Ll}+)?)"
    ).unwrap();

    pub static ref LOCATION_LABEL: Regex = Regex::new(
        r"(?i)^(?:location|address|based\s+in|city)\s*:?\s+(.+)$"
    ).unwrap();

    // "Boston, MA" as a whole line, or "Remote"
    pub static ref LOCATION_LINE: Regex = Regex::new(
        r"^(?:\p{Lu}[\p{L}.'\-]+(?:\s\p{Lu}[\p{L}.'\-]+){0,2},\s?[A-Z]{2}(?:\s\d{5})?|(?i:remote|hybrid))$"
    ).unwrap();

    pub static ref TRAILING_LOCATION: Regex = Regex::new(
        r",\s*(\p{Lu}[\p{L}.'\-]+(?:\s\p{Lu}[\p{L}.'\-]+){0,2},\s?[A-Z]{2})\s*$"
    ).unwrap();

    // Dates
    pub static ref YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref NUMERIC_MONTH_YEAR: Regex = Regex::new(
        r"\b\d{1,2}/(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref PRESENT: Regex = Regex::new(
        r"(?i)\b(?:present|current|now|today|ongoing)\b"
    ).unwrap();

    pub static ref RANGE_WORD: Regex = Regex::new(
        r"(?i)\b(?:to|until)\b"
    ).unwrap();

    // Education
    pub static ref GPA: Regex = Regex::new(
        r"(?i)\bGPA\b[\s:]*([0-4](?:\.\d{1,2})?(?:\s*/\s*\d(?:\.\d{1,2})?)?)"
    ).unwrap();

    // Job postings
    pub static ref JOB_LABEL: Regex = Regex::new(
        r"(?i)^(job\s+title|title|position|role|company|employer|organization|location|employment\s+type|job\s+type|type)\s*:\s*(.+)$"
    ).unwrap();

    pub static ref EMPLOYMENT_TYPE: Regex = Regex::new(
        r"(?i)\b(full[\s-]?time|part[\s-]?time|contract(?:or)?|internship|temporary|freelance)\b"
    ).unwrap();

    pub static ref ABOUT_COMPANY: Regex = Regex::new(
        r"^About\s+(\p{Lu}[\p{L}&.'\-]*(?:\s\p{Lu}[\p{L}&.'\-]*){0,3})\s*:?$"
    ).unwrap();

    pub static ref REMOTE: Regex = Regex::new(
        r"(?i)\b(?:fully\s+)?remote\b"
    ).unwrap();
}
