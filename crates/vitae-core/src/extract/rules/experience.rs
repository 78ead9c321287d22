//! Experience section builder.
//!
//! Entries are closed lazily: a new date range on an already dated entry, or
//! a new title after a dated entry with content, starts the next one. What is
//! left open is flushed when the section ends.

use super::contact::split_trailing_location;
use super::dates::{is_date_range_line, split_dates};
use super::normalize::{is_bullet, strip_bullet};
use super::patterns::LOCATION_LINE;
use crate::models::record::ExperienceEntry;

/// Title separators in priority order.
const TITLE_SEPARATORS: &[&str] = &[" at ", " @ ", ", ", " - "];

/// Accumulates experience entries line by line.
#[derive(Debug, Clone)]
pub struct ExperienceBuilder {
    title_min_len: usize,
    current: ExperienceEntry,
    entries: Vec<ExperienceEntry>,
}

impl ExperienceBuilder {
    pub fn new(title_min_len: usize) -> Self {
        Self {
            title_min_len,
            current: ExperienceEntry::default(),
            entries: Vec::new(),
        }
    }

    /// Feed one normalized line of the experience section.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if is_bullet(line) {
            self.append_description(strip_bullet(line));
            return;
        }

        if is_date_range_line(line) {
            self.push_dates(line);
            return;
        }

        if LOCATION_LINE.is_match(line) {
            if self.current.location.is_empty() {
                self.current.location = line.to_string();
            }
            return;
        }

        if line.chars().count() > self.title_min_len {
            self.push_title(line);
        } else if !self.current.position.is_empty() && self.current.company.is_empty() {
            // Short company names ("Acme Inc") under a position
            self.current.company = line.to_string();
        }
    }

    fn push_dates(&mut self, line: &str) {
        let (rest, range) = split_dates(line);

        if self.current.is_dated() {
            self.flush();
        }

        if LOCATION_LINE.is_match(&rest) {
            if self.current.location.is_empty() {
                self.current.location = rest;
            }
        } else if rest.chars().count() > self.title_min_len {
            self.push_title(&rest);
        }

        self.current.start_year = range.start;
        self.current.end_year = range.end;
    }

    fn push_title(&mut self, line: &str) {
        let has_content = !self.current.position.is_empty()
            || !self.current.company.is_empty()
            || !self.current.description.is_empty();
        let complete = !self.current.position.is_empty() && !self.current.company.is_empty();

        if (self.current.is_dated() && has_content) || complete {
            self.flush();
        }

        let (text, location) = split_trailing_location(line);
        if !location.is_empty() && self.current.location.is_empty() {
            self.current.location = location.to_string();
        }

        if self.current.position.is_empty() {
            let (position, company) = split_title(text);
            self.current.position = position.to_string();
            if self.current.company.is_empty() {
                self.current.company = company.to_string();
            }
        } else {
            self.current.company = text.to_string();
        }
    }

    fn append_description(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.current.description.is_empty() {
            self.current.description.push('\n');
        }
        self.current.description.push_str(text);
    }

    /// Close the entry in progress, dropping it if it holds nothing.
    pub fn flush(&mut self) {
        let entry = std::mem::take(&mut self.current);
        if !entry.is_empty() {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }

    /// Flush and return every entry in document order.
    pub fn finish(mut self) -> Vec<ExperienceEntry> {
        self.flush();
        self.entries
    }
}

impl Default for ExperienceBuilder {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Split `Position at Company` or `Position, Company` into its parts.
pub fn split_title(line: &str) -> (&str, &str) {
    for sep in TITLE_SEPARATORS {
        if let Some((position, company)) = line.split_once(sep) {
            let (position, company) = (position.trim(), company.trim());
            if !position.is_empty() && !company.is_empty() {
                return (position, company);
            }
        }
    }
    (line.trim(), "")
}
