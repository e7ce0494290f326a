//! WASM bindings for bilingual invoice field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR runs on the JavaScript side; these functions take the recognized text.

use wasm_bindgen::prelude::*;

use fawtara_core::{FawtaraConfig, InvoiceParser, InvoicePipeline};

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

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Replace Eastern Arabic-Indic digits with ASCII digits.
#[wasm_bindgen]
pub fn normalize_digits(text: &str) -> String {
    fawtara_core::normalize_digits(text).into_owned()
}

/// Join per-page OCR text into one document.
#[wasm_bindgen]
pub fn assemble_pages(pages: Vec<String>) -> String {
    fawtara_core::assemble_pages(pages)
}

/// Invoice date as `YYYY-MM-DD`, or "Not Found".
#[wasm_bindgen]
pub fn extract_date(text: &str) -> String {
    fawtara_core::extract_date(text)
}

/// Invoice total, 0 when the text holds no number.
#[wasm_bindgen]
pub fn extract_amount(text: &str) -> f64 {
    fawtara_core::extract_amount(text)
        .to_string()
        .parse()
        .unwrap_or(0.0)
}

/// Currency code, "USD" or "IQD".
#[wasm_bindgen]
pub fn detect_currency(text: &str) -> String {
    fawtara_core::detect_currency(text).to_string()
}

/// Category label.
#[wasm_bindgen]
pub fn classify_category(text: &str) -> String {
    fawtara_core::classify_category(text).to_string()
}

/// Script language, "ar" or "en".
#[wasm_bindgen]
pub fn detect_language(text: &str) -> String {
    fawtara_core::detect_language(text).to_string()
}

/// Extract all invoice fields from OCR text.
#[wasm_bindgen]
pub fn extract_invoice_from_text(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&fawtara_core::extract_invoice(text)).map_err(to_js_error)
}

/// Invoice extractor class for browser use.
///
/// Holds a pipeline compiled once from configuration.
#[wasm_bindgen]
pub struct InvoiceExtractor {
    pipeline: InvoicePipeline,
}

#[wasm_bindgen]
impl InvoiceExtractor {
    /// Create an extractor from an optional JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<InvoiceExtractor, JsValue> {
        let pipeline = match config_json {
            Some(json) => {
                let config: FawtaraConfig = serde_json::from_str(&json).map_err(to_js_error)?;
                InvoicePipeline::from_config(&config.extraction).map_err(to_js_error)?
            }
            None => InvoicePipeline::new(),
        };

        Ok(Self { pipeline })
    }

    /// Extract invoice fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.pipeline.extract(text)).map_err(to_js_error)
    }

    /// Extract fields together with the source text and fallback warnings.
    #[wasm_bindgen]
    pub fn extract_with_warnings(&self, text: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.pipeline.parse(text)).map_err(to_js_error)
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self {
            pipeline: InvoicePipeline::new(),
        }
    }
}
