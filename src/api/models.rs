use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// What gets sent to the classification service: exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    File(UploadedFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.filter(|value| !value.trim().is_empty()),
            data,
        }
    }

    /// Reads a `.txt` or `.pdf` file from disk, guessing its MIME type from the extension.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !has_accepted_extension(path) {
            return Err(AppError::InvalidInput(format!(
                "unsupported file `{}`; only .txt and .pdf are accepted",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        let data = fs::read(path)?;

        Ok(Self::new(name, mime_type, data))
    }
}

pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    pub category: String,
    #[serde(default)]
    pub suggested_response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
