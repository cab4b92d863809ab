//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    ExtractedText, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, ExtractedText>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        Ok(self.extract(path).await?.text)
    }

    pub async fn extract(&mut self, path: &Path) -> Result<ExtractedText> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached) = self.cache.get(&path_str) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extracted = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, extracted.clone());

        Ok(extracted)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
