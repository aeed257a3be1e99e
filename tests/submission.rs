use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use automail::api::{AnalysisResponse, Classifier, SubmissionInput, UploadedFile};
use automail::error::{AppError, AppResult};
use automail::triage::{ActiveView, Category, Draft, Resolution, SubmissionController, TriageStore};

enum Reply {
    Classify(&'static str, &'static str),
    Fail(&'static str),
}

struct FakeClassifier {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeClassifier {
    fn classify_as(category: &'static str, suggested: &'static str) -> Self {
        Self {
            reply: Reply::Classify(category, suggested),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &'static str) -> Self {
        Self {
            reply: Reply::Fail(message),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    async fn classify(&self, _input: &SubmissionInput) -> AppResult<AnalysisResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Classify(category, suggested) => Ok(AnalysisResponse {
                category: category.to_string(),
                suggested_response: suggested.to_string(),
            }),
            Reply::Fail(message) => Err(AppError::Transport(message.to_string())),
        }
    }
}

fn text_draft(text: &str) -> Draft {
    Draft {
        text: text.to_string(),
        file: None,
    }
}

#[tokio::test]
async fn productive_text_lands_first_in_productive_list_and_is_selected() {
    let classifier = FakeClassifier::classify_as("Produtivo", "Estamos verificando.");
    let mut controller = SubmissionController::with_draft(text_draft("Status do chamado 12345?"));
    let mut store = TriageStore::new();

    let id = controller
        .submit(&classifier, &mut store)
        .await
        .expect("submission should succeed");

    assert_eq!(store.productive().len(), 1);
    assert_eq!(store.productive()[0].id(), id);
    assert_eq!(store.productive()[0].subject(), "Status do chamado 12345?...");
    assert_eq!(store.productive()[0].category(), Category::Productive);
    assert_eq!(store.active_view(), ActiveView::ProductiveList);
    assert_eq!(store.selected_id(), Some(id));
    assert!(controller.draft().is_empty());
    assert!(!controller.is_loading());
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn uploaded_file_records_keep_file_metadata() {
    let classifier = FakeClassifier::classify_as("Improdutivo", "Obrigado!");
    let file = UploadedFile::new("natal.txt", Some("text/plain".to_string()), b"Feliz natal".to_vec());
    let mut controller = SubmissionController::with_draft(Draft {
        text: "Mensagem de fim de ano".to_string(),
        file: Some(file),
    });
    let mut store = TriageStore::new();

    controller
        .submit(&classifier, &mut store)
        .await
        .expect("submission should succeed");

    let record = &store.unproductive()[0];
    assert_eq!(record.subject(), "Mensagem de fim de ano...");
    assert_eq!(record.body(), "Uploaded file: natal.txt (text/plain)");
    assert_eq!(record.original_file_type(), Some("text/plain"));
    assert!(record.is_text_upload());
    assert_eq!(store.active_view(), ActiveView::UnproductiveList);
}

#[tokio::test]
async fn attachment_without_text_is_named_after_file() {
    let classifier = FakeClassifier::classify_as("Produtivo", "Recebido.");
    let file = UploadedFile::new("anexo.pdf", Some("application/pdf".to_string()), vec![1, 2, 3]);
    let mut controller = SubmissionController::with_draft(Draft {
        text: String::new(),
        file: Some(file),
    });
    let mut store = TriageStore::new();

    controller
        .submit(&classifier, &mut store)
        .await
        .expect("submission should succeed");

    let record = &store.productive()[0];
    assert_eq!(record.subject(), "anexo.pdf");
    assert_eq!(record.body(), "Uploaded file: anexo.pdf (application/pdf)");
}

#[tokio::test]
async fn empty_draft_never_reaches_classifier() {
    let classifier = FakeClassifier::classify_as("Produtivo", "");
    let mut controller = SubmissionController::with_draft(text_draft("   "));
    let mut store = TriageStore::new();

    let result = controller.submit(&classifier, &mut store).await;

    assert!(matches!(result, Err(AppError::EmptyInput)));
    assert_eq!(
        controller.error(),
        Some("please enter some text or select a file")
    );
    assert_eq!(classifier.calls(), 0);
    assert!(store.productive().is_empty());
    assert_eq!(store.active_view(), ActiveView::SubmissionForm);
}

#[tokio::test]
async fn second_submit_while_loading_is_rejected() {
    let classifier = FakeClassifier::classify_as("Produtivo", "ok");
    let mut controller = SubmissionController::with_draft(text_draft("Reunião amanhã?"));
    let mut store = TriageStore::new();

    let request = controller.begin().expect("first begin should succeed");
    assert!(matches!(controller.begin(), Err(AppError::Busy)));

    let outcome = classifier.classify(&request.input).await;
    let resolution = controller.resolve(&mut store, request.ticket, outcome);

    assert!(matches!(resolution, Resolution::Ingested(_)));
    assert_eq!(classifier.calls(), 1);
    assert_eq!(store.productive().len(), 1);
}

#[tokio::test]
async fn failure_keeps_draft_and_store() {
    let classifier = FakeClassifier::failing("Arquivo muito grande");
    let mut controller = SubmissionController::with_draft(text_draft("Segue o anexo"));
    let mut store = TriageStore::new();

    let result = controller.submit(&classifier, &mut store).await;

    assert!(matches!(result, Err(AppError::Transport(_))));
    assert_eq!(controller.error(), Some("Arquivo muito grande"));
    assert_eq!(controller.draft().text, "Segue o anexo");
    assert!(!controller.is_loading());
    assert!(store.productive().is_empty() && store.unproductive().is_empty());
    assert_eq!(store.active_view(), ActiveView::SubmissionForm);
}

#[tokio::test]
async fn unknown_category_is_malformed() {
    let classifier = FakeClassifier::classify_as("Spam", "");
    let mut controller = SubmissionController::with_draft(text_draft("Promoção imperdível"));
    let mut store = TriageStore::new();

    let result = controller.submit(&classifier, &mut store).await;

    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    assert!(store.productive().is_empty() && store.unproductive().is_empty());
    assert_eq!(controller.draft().text, "Promoção imperdível");
}

#[test]
fn stale_completion_is_dropped() {
    let mut controller = SubmissionController::with_draft(text_draft("primeiro"));
    let mut store = TriageStore::new();

    let first = controller.begin().expect("begin");
    let failed = controller.resolve(
        &mut store,
        first.ticket,
        Err(AppError::Transport("timeout".to_string())),
    );
    assert!(matches!(failed, Resolution::Failed(_)));

    let second = controller.begin().expect("retry");
    let stale = controller.resolve(
        &mut store,
        first.ticket,
        Ok(AnalysisResponse {
            category: "Produtivo".to_string(),
            suggested_response: String::new(),
        }),
    );
    assert!(matches!(stale, Resolution::Stale));
    assert!(controller.is_loading());
    assert!(store.productive().is_empty());

    let applied = controller.resolve(
        &mut store,
        second.ticket,
        Ok(AnalysisResponse {
            category: "Improdutivo".to_string(),
            suggested_response: "Obrigado".to_string(),
        }),
    );
    assert!(matches!(applied, Resolution::Ingested(_)));
    assert_eq!(store.unproductive().len(), 1);
}

#[test]
fn new_begin_clears_previous_error() {
    let mut controller = SubmissionController::new();
    assert!(controller.begin().is_err());
    assert!(controller.error().is_some());

    if let Some(draft) = controller.draft_mut() {
        draft.text = "agora sim".to_string();
    }
    controller.begin().expect("begin");
    assert!(controller.error().is_none());
}
