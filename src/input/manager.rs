//! Input manager for handling different file types

use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    normalize_text, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Upload limit of the hosted service, 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl InputManager {
    pub fn new(max_file_size: u64) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_file_size,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract and normalize the text of `path`
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let file_type = self.detect_file_type(path)?;

        let metadata = fs::metadata(path).await.map_err(|_| {
            AtsScorerError::InvalidInput(format!("File does not exist: {}", path.display()))
        })?;
        if metadata.len() > self.max_file_size {
            return Err(AtsScorerError::FileTooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: self.max_file_size,
            });
        }

        let raw = match file_type {
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
            other => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "No extractor for {:?}: {}",
                    other,
                    path.display()
                )));
            }
        };

        let text = normalize_text(&raw);
        debug!("Extracted {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                AtsScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        match FileType::from_extension(extension) {
            FileType::Docx => Err(AtsScorerError::UnsupportedFormat(format!(
                "DOCX is not supported, convert to PDF or text: {}",
                path.display()
            ))),
            FileType::Unknown => Err(AtsScorerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
            supported => Ok(supported),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
