use crate::api::Classifier;
use crate::api::models::{AnalysisResponse, SubmissionInput, UploadedFile};
use crate::error::{AppError, AppResult};

use super::record::{Category, EmailId, EmailRecord, OriginalSubmission};
use super::store::TriageStore;

/// The form contents the user is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub file: Option<UploadedFile>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.text.trim().is_empty()
    }

    /// A file takes precedence over text, so a request never carries both.
    fn to_input(&self) -> Option<SubmissionInput> {
        if let Some(file) = &self.file {
            return Some(SubmissionInput::File(file.clone()));
        }
        if self.text.trim().is_empty() {
            return None;
        }
        Some(SubmissionInput::Text(self.text.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// An accepted submission waiting for the classifier.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub ticket: Ticket,
    pub input: SubmissionInput,
}

#[derive(Debug)]
struct Pending {
    ticket: Ticket,
    original: OriginalSubmission,
}

#[derive(Debug)]
pub enum Resolution {
    Ingested(EmailId),
    Failed(AppError),
    /// The completion did not belong to the outstanding request and was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    draft: Draft,
    pending: Option<Pending>,
    error: Option<String>,
    next_ticket: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: Draft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Edits are ignored while a request is in flight; the form is disabled.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        if self.is_loading() {
            return None;
        }
        Some(&mut self.draft)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.draft.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the draft and marks a request outstanding.
    pub fn begin(&mut self) -> AppResult<PreparedRequest> {
        if self.is_loading() {
            tracing::debug!("submit ignored while a request is outstanding");
            return Err(AppError::Busy);
        }

        self.error = None;
        let Some(input) = self.draft.to_input() else {
            let err = AppError::EmptyInput;
            self.error = Some(err.to_string());
            return Err(err);
        };

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(Pending {
            ticket,
            original: OriginalSubmission::from_parts(&self.draft.text, self.draft.file.as_ref()),
        });

        tracing::info!(ticket = ticket.0, "analysis request started");
        Ok(PreparedRequest { ticket, input })
    }

    /// Applies the classifier's outcome for `ticket`. Only a success touches the store.
    pub fn resolve(
        &mut self,
        store: &mut TriageStore,
        ticket: Ticket,
        outcome: AppResult<AnalysisResponse>,
    ) -> Resolution {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.pending = other;
                tracing::debug!(ticket = ticket.0, "dropping stale analysis result");
                return Resolution::Stale;
            }
        };

        let record = outcome.and_then(|response| build_record(pending.original, response));
        match record {
            Ok(record) => {
                let id = record.id();
                store.ingest(record);
                self.draft = Draft::default();
                Resolution::Ingested(id)
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.0, error = %err, "analysis request failed");
                self.error = Some(err.to_string());
                Resolution::Failed(err)
            }
        }
    }

    /// One full round-trip against `classifier`.
    pub async fn submit(
        &mut self,
        classifier: &dyn Classifier,
        store: &mut TriageStore,
    ) -> AppResult<EmailId> {
        let request = self.begin()?;
        let outcome = classifier.classify(&request.input).await;

        match self.resolve(store, request.ticket, outcome) {
            Resolution::Ingested(id) => Ok(id),
            Resolution::Failed(err) => Err(err),
            Resolution::Stale => Err(AppError::Invariant(
                "analysis result lost its pending request".to_string(),
            )),
        }
    }
}

fn build_record(
    original: OriginalSubmission,
    response: AnalysisResponse,
) -> AppResult<EmailRecord> {
    let category = Category::from_classifier(&response.category).ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "classifier returned an unknown category `{}`",
            response.category
        ))
    })?;

    Ok(EmailRecord::new(
        original,
        category,
        response.suggested_response,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_wins_over_text() {
        let draft = Draft {
            text: "typed".to_string(),
            file: Some(UploadedFile::new("a.txt", None, b"file".to_vec())),
        };

        assert!(matches!(draft.to_input(), Some(SubmissionInput::File(_))));
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let draft = Draft {
            text: "  \n\t".to_string(),
            file: None,
        };
        assert!(draft.is_empty());
        assert!(draft.to_input().is_none());
    }

    #[test]
    fn draft_is_locked_while_loading() {
        let mut controller = SubmissionController::with_draft(Draft {
            text: "hello".to_string(),
            file: None,
        });
        controller.begin().expect("begin should succeed");

        assert!(controller.draft_mut().is_none());
        assert!(!controller.can_submit());
    }
}
