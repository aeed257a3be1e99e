use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::api::models::{SubmissionInput, UploadedFile};

const SUBJECT_PREVIEW_CHARS: usize = 50;
const NO_SUBJECT: &str = "(no subject)";
const UNKNOWN_FILE_TYPE: &str = "unknown";

static NEXT_EMAIL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique, monotonically assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmailId(u64);

impl EmailId {
    pub fn next() -> Self {
        Self(NEXT_EMAIL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    /// Maps the classifier's Portuguese labels, ignoring case and surrounding whitespace.
    pub fn from_classifier(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "produtivo" => Some(Category::Productive),
            "improdutivo" => Some(Category::Unproductive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Productive => "productive",
            Category::Unproductive => "unproductive",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-visible half of a record, fixed at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginalSubmission {
    pub subject: String,
    pub body: String,
    pub original_file_name: Option<String>,
    pub original_file_type: Option<String>,
}

impl OriginalSubmission {
    pub fn from_input(input: &SubmissionInput) -> Self {
        match input {
            SubmissionInput::Text(text) => Self::from_parts(text, None),
            SubmissionInput::File(file) => Self::from_parts("", Some(file)),
        }
    }

    /// Derives the record fields from everything the form held.
    ///
    /// Typed text names the subject even when a file is attached; the body and
    /// file metadata come from the file whenever there is one.
    pub fn from_parts(text: &str, file: Option<&UploadedFile>) -> Self {
        let subject = subject_for(text, file);
        match file {
            None => Self {
                subject,
                body: text.to_string(),
                original_file_name: None,
                original_file_type: None,
            },
            Some(file) => {
                let file_type = describe_file_type(file);
                Self {
                    subject,
                    body: format!("Uploaded file: {} ({file_type})", file.name),
                    original_file_name: Some(file.name.clone()),
                    original_file_type: Some(file_type),
                }
            }
        }
    }
}

fn subject_for(text: &str, file: Option<&UploadedFile>) -> String {
    if !text.trim().is_empty() {
        let preview = text.chars().take(SUBJECT_PREVIEW_CHARS).collect::<String>();
        return format!("{preview}...");
    }

    match file {
        Some(file) if !file.name.trim().is_empty() => file.name.clone(),
        _ => NO_SUBJECT.to_string(),
    }
}

fn describe_file_type(file: &UploadedFile) -> String {
    if let Some(mime_type) = &file.mime_type {
        return mime_type.clone();
    }

    match file.name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{ext}"),
        _ => UNKNOWN_FILE_TYPE.to_string(),
    }
}

/// One analyzed submission. Fields are private: a record never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRecord {
    id: EmailId,
    subject: String,
    body: String,
    original_file_name: Option<String>,
    original_file_type: Option<String>,
    category: Category,
    suggested_response: String,
}

impl EmailRecord {
    pub fn new(
        original: OriginalSubmission,
        category: Category,
        suggested_response: impl Into<String>,
    ) -> Self {
        Self {
            id: EmailId::next(),
            subject: original.subject,
            body: original.body,
            original_file_name: original.original_file_name,
            original_file_type: original.original_file_type,
            category,
            suggested_response: suggested_response.into(),
        }
    }

    pub fn id(&self) -> EmailId {
        self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn original_file_name(&self) -> Option<&str> {
        self.original_file_name.as_deref()
    }

    pub fn original_file_type(&self) -> Option<&str> {
        self.original_file_type.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn suggested_response(&self) -> &str {
        &self.suggested_response
    }

    /// Whether the original upload looks like plain text (drives the preview icon).
    pub fn is_text_upload(&self) -> bool {
        let Some(name) = self.original_file_name.as_deref() else {
            return false;
        };
        let file_type = self
            .original_file_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        file_type.contains("text") || name.to_lowercase().ends_with(".txt")
    }
}
