//! Configuration structures for the extraction pipeline.
//!
//! Keyword lists live here as plain data so the extractor never consults
//! mutable globals; every extractor is built from one immutable config.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VitaeError};

/// Main configuration for vitae.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitaeConfig {
    /// Extraction tuning knobs.
    pub extraction: ExtractionConfig,

    /// Caller-side input policy.
    pub input: InputConfig,

    /// Recognized skills and section keywords.
    pub vocabulary: Vocabulary,
}

/// Extraction limits and heuristics thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Hard cap on extracted skills; extras are truncated.
    pub max_skills: usize,

    /// Segments shorter than this (in chars) are noise.
    pub min_segment_len: usize,

    /// Lines longer than this are also split into sentences.
    pub sentence_split_len: usize,

    /// How many leading lines may hold the candidate's name.
    pub name_scan_lines: usize,

    /// Longest line accepted as a name.
    pub max_name_len: usize,

    /// Shortest plausible location match.
    pub min_location_len: usize,

    /// Longest plausible location match.
    pub max_location_len: usize,

    /// Non-bullet lines must be longer than this to count as a job title.
    pub title_min_len: usize,

    /// Lines with more words than this are never section headers.
    pub max_header_words: usize,

    /// Section scanning stops after this many lines.
    pub max_section_lines: usize,

    /// Replace decorative punctuation with spaces during normalization.
    pub strip_punctuation: bool,

    /// Generate placeholder summary/project when nothing was found.
    pub synthesize_fallbacks: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_skills: 20,
            min_segment_len: 3,
            sentence_split_len: 200,
            name_scan_lines: 5,
            max_name_len: 50,
            min_location_len: 5,
            max_location_len: 50,
            title_min_len: 10,
            max_header_words: 4,
            max_section_lines: 50_000,
            strip_punctuation: true,
            synthesize_fallbacks: true,
        }
    }
}

/// Policy applied by callers before extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum readable characters before a document is worth extracting.
    pub min_text_length: usize,

    /// Largest file the loader will read, in bytes.
    pub max_file_size: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

/// Keyword data driving skill matching and section detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Known skills, matched case-insensitively. Up to three words each.
    pub skills: Vec<String>,

    /// Header keyword prefixes per résumé section.
    pub sections: SectionKeywords,

    /// Words that may precede a header keyword ("Professional Experience").
    pub header_modifiers: Vec<String>,

    /// Words that may follow a header keyword in a plain header line
    /// ("Work History", "About Me").
    pub header_tail_words: Vec<String>,

    /// Header keyword prefixes introducing job requirements.
    pub job_requirement_headers: Vec<String>,

    /// Header keyword prefixes introducing job responsibilities.
    pub job_responsibility_headers: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            skills: strings(DEFAULT_SKILLS),
            sections: SectionKeywords::default(),
            header_modifiers: strings(&[
                "professional", "work", "relevant", "technical", "core", "key",
                "academic", "career", "personal", "selected", "other", "additional",
                "spoken", "employment", "and", "&", "my",
            ]),
            header_tail_words: strings(&[
                "history", "background", "highlights", "overview", "details", "information",
                "training", "activities", "achievements", "statement", "qualifications", "me", "of",
                "tools",
            ]),
            job_requirement_headers: strings(&[
                "requirement", "qualification", "what you bring", "what we're looking for",
                "what we are looking for", "must have", "you have", "who you are", "skills",
                "nice to have", "preferred",
            ]),
            job_responsibility_headers: strings(&[
                "responsibilit", "what you'll do", "what you will do", "duties", "the role",
                "your role", "day to day", "in this role",
            ]),
        }
    }
}

/// Header keyword prefixes per section, lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionKeywords {
    pub summary: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
}

impl Default for SectionKeywords {
    fn default() -> Self {
        Self {
            summary: strings(&["summary", "profile", "objective", "about"]),
            experience: strings(&["experience", "work", "employment"]),
            education: strings(&["education", "academic", "university", "college", "degree"]),
            skills: strings(&["skill", "technical", "competenc"]),
            projects: strings(&["project"]),
            certifications: strings(&["certification", "license", "licence"]),
            languages: strings(&["language"]),
            interests: strings(&["interest", "hobbies", "hobby"]),
        }
    }
}

impl VitaeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| VitaeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| VitaeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "rust", "go", "golang", "c", "c++", "c#",
    "ruby", "php", "swift", "kotlin", "scala", "r", "matlab", "perl", "dart", "elixir",
    "haskell", "lua", "bash", "shell scripting", "powershell", "sql", "html", "css", "sass",
    "objective-c", "fortran", "cobol", "assembly", "solidity",
    // Frameworks and libraries
    "react", "react native", "angular", "vue", "vue.js", "svelte", "next.js", "node.js",
    "express", "django", "flask", "fastapi", "spring", "spring boot", "rails",
    "ruby on rails", "laravel", ".net", "asp.net", "jquery", "redux", "graphql",
    "tailwind", "bootstrap", "flutter", "pandas", "numpy", "scikit-learn", "tensorflow",
    "pytorch", "keras", "spark", "hadoop", "tokio",
    // Data and infrastructure
    "postgresql", "mysql", "sqlite", "mongodb", "redis", "elasticsearch", "cassandra",
    "dynamodb", "oracle", "kafka", "rabbitmq", "docker", "kubernetes", "terraform",
    "ansible", "jenkins", "aws", "azure", "gcp", "google cloud", "linux", "git", "github",
    "gitlab", "ci/cd", "devops", "microservices", "rest", "rest api", "grpc", "nginx",
    "serverless", "firebase", "supabase", "snowflake", "tableau", "power bi", "excel",
    // Practices and domains
    "machine learning", "deep learning", "data analysis", "data science",
    "data visualization", "statistics", "nlp", "computer vision", "artificial intelligence",
    "cloud computing", "cybersecurity", "networking", "distributed systems",
    "system design", "testing", "unit testing", "test automation", "agile", "scrum",
    "kanban", "jira", "figma", "ui/ux", "ux design", "ui design", "product management",
    "project management", "seo", "digital marketing", "content writing", "copywriting",
    "accounting", "budgeting", "forecasting", "salesforce", "sap", "crm",
    // Soft skills
    "leadership", "communication", "teamwork", "collaboration", "problem solving",
    "critical thinking", "time management", "mentoring", "public speaking",
    "negotiation", "customer service", "stakeholder management", "adaptability",
    "creativity", "analytical skills", "attention to detail", "organization",
    "presentation", "research", "strategic planning", "team leadership",
];
