//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use fawtara_core::FawtaraConfig;

/// Page argument that reads OCR text from stdin.
pub const STDIN_PAGE: &str = "-";

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fawtara")
        .join("config.json")
}

/// Resolve the config file a command should use.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration: an explicit path must exist, the default path is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FawtaraConfig> {
    if let Some(path) = config_path {
        return Ok(FawtaraConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(FawtaraConfig::from_file(&default_path)?)
    } else {
        Ok(FawtaraConfig::default())
    }
}

/// Read the OCR text of one page.
///
/// `.txt` files hold recognized text as-is. PDFs go through their text layer;
/// scanned images must be recognized by an OCR engine first.
pub fn read_page_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new(STDIN_PAGE) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "txt" | "text" => Ok(fs::read_to_string(path)?),
        "pdf" => pdf_extract::extract_text(path).map_err(|e| {
            anyhow::anyhow!("Failed to extract text from {}: {}", path.display(), e)
        }),
        "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp" | "webp" => anyhow::bail!(
            "{} is an image; run OCR first and pass the recognized text",
            path.display()
        ),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Whether batch mode should pick up a file.
pub fn is_supported_input(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "txt" | "text" | "pdf")
}
