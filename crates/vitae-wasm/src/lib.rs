//! WASM bindings for heuristic résumé and job posting extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Everything runs locally; no text leaves the page.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use vitae_core::extract::{ExtractionResult, HeuristicExtractor, JobExtractor, ResumeParser};
use vitae_core::models::document::{ExtractionHints, RawDocument, SourceKind};
use vitae_core::models::record::ExtractionRecord;
use vitae_core::VitaeConfig;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than Maps, so the result can be spread into forms
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| js_error(e.to_string()))
}

fn hints_for(kind: Option<String>) -> Result<ExtractionHints, JsValue> {
    match kind {
        None => Ok(ExtractionHints::default()),
        Some(name) => SourceKind::from_name(&name)
            .map(ExtractionHints::new)
            .ok_or_else(|| js_error(format!("Unknown source kind: {}", name))),
    }
}

/// Extract a résumé from text.
///
/// `kind` is one of `text`, `pdf` or `office` (file extensions work too).
/// Returns the record as a plain object.
#[wasm_bindgen]
pub fn extract_resume_from_text(text: &str, kind: Option<String>) -> Result<JsValue, JsValue> {
    let record = vitae_core::extract(text, &hints_for(kind)?);
    to_js(&record)
}

/// Extract a job posting from text.
#[wasm_bindgen]
pub fn extract_job_from_text(text: &str, kind: Option<String>) -> Result<JsValue, JsValue> {
    let job = vitae_core::extract_job(text, &hints_for(kind)?);
    to_js(&job)
}

/// Normalize text the way extraction sees it.
#[wasm_bindgen]
pub fn normalize_text(text: &str, kind: Option<String>) -> Result<String, JsValue> {
    Ok(HeuristicExtractor::new().normalize(text, &hints_for(kind)?))
}

/// Whether text has at least `min_length` non-whitespace characters.
#[wasm_bindgen]
pub fn is_readable(text: &str, min_length: usize) -> bool {
    RawDocument::new(text).ensure_readable(min_length).is_ok()
}

/// Read a browser `File` as text and extract a résumé from it.
///
/// PDFs must be converted to text by the page first.
#[wasm_bindgen]
pub async fn extract_resume_from_file(file: web_sys::File) -> Result<JsValue, JsValue> {
    let name = file.name();
    let kind = name
        .rsplit_once('.')
        .and_then(|(_, ext)| SourceKind::from_name(ext))
        .unwrap_or_default();

    if kind == SourceKind::Pdf {
        return Err(js_error("PDF files must be converted to text before extraction"));
    }

    let text = JsFuture::from(file.text())
        .await?
        .as_string()
        .ok_or_else(|| js_error(format!("Could not read {} as text", name)))?;

    to_js(&vitae_core::extract(&text, &ExtractionHints::new(kind)))
}

/// Résumé extractor class for browser use.
#[wasm_bindgen]
pub struct ResumeExtractor {
    config: VitaeConfig,
    extractor: HeuristicExtractor,
    log_warnings: bool,
}

#[wasm_bindgen]
impl ResumeExtractor {
    /// Create an extractor with the bundled configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = VitaeConfig::default();
        Self {
            extractor: HeuristicExtractor::from_config(&config),
            config,
            log_warnings: false,
        }
    }

    /// Create an extractor from a JSON configuration. Missing keys take
    /// their default values.
    #[wasm_bindgen]
    pub fn from_config_json(json: &str) -> Result<ResumeExtractor, JsValue> {
        let config: VitaeConfig = serde_json::from_str(json)
            .map_err(|e| js_error(format!("Invalid configuration: {}", e)))?;
        Ok(Self {
            extractor: HeuristicExtractor::from_config(&config),
            config,
            log_warnings: false,
        })
    }

    /// Cap the number of extracted skills.
    #[wasm_bindgen]
    pub fn set_max_skills(&mut self, max_skills: usize) {
        self.config.extraction.max_skills = max_skills;
        self.extractor = HeuristicExtractor::from_config(&self.config);
    }

    /// Log extraction warnings to the browser console.
    #[wasm_bindgen]
    pub fn set_log_warnings(&mut self, enabled: bool) {
        self.log_warnings = enabled;
    }

    /// Minimum readable length from the configuration.
    #[wasm_bindgen(getter)]
    pub fn min_text_length(&self) -> usize {
        self.config.input.min_text_length
    }

    /// Extract a résumé record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, kind: Option<String>) -> Result<JsValue, JsValue> {
        let result = self.parse(text, kind)?;
        to_js(&result.record)
    }

    /// Extract a résumé with warnings and scan metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str, kind: Option<String>) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractOutput {
            record: ExtractionRecord,
            warnings: Vec<String>,
            missing_fields: Vec<&'static str>,
            synthesized: bool,
            truncated: bool,
        }

        let result = self.parse(text, kind)?;
        let output = ExtractOutput {
            missing_fields: result.record.missing_fields(),
            synthesized: result.record.has_synthesized_content(),
            truncated: result.truncated,
            warnings: result.warnings,
            record: result.record,
        };

        to_js(&output)
    }

    /// Extract a job posting from text with this extractor's configuration.
    #[wasm_bindgen]
    pub fn extract_job(&self, text: &str, kind: Option<String>) -> Result<JsValue, JsValue> {
        let job = JobExtractor::from_config(&self.config).extract(text, &hints_for(kind)?);
        to_js(&job)
    }
}

impl ResumeExtractor {
    fn parse(&self, text: &str, kind: Option<String>) -> Result<ExtractionResult, JsValue> {
        let hints = hints_for(kind)?;
        let mut document = RawDocument::new(text);
        if let Some(kind) = hints.source_kind {
            document = document.with_source_kind(kind);
        }

        let result = self.extractor.parse(&document);
        if self.log_warnings {
            for warning in &result.warnings {
                web_sys::console::warn_1(&JsValue::from_str(warning));
            }
        }
        Ok(result)
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
