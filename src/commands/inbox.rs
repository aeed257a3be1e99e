use std::sync::Arc;

use crate::api::Classifier;
use crate::api::models::UploadedFile;
use crate::cli::InboxArgs;
use crate::clipboard::SystemClipboard;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::triage::{DetailPanePresenter, Draft, ViewportClassifier};
use crate::tui::{InboxApp, terminal};

pub async fn run(ctx: &AppContext, args: InboxArgs) -> AppResult<()> {
    let mut draft = Draft::default();
    if let Some(path) = args.file {
        draft.file = Some(UploadedFile::load(&path)?);
    }

    let (width, _) = crossterm::terminal::size()?;
    let viewport = ViewportClassifier::new(ctx.settings.compact_breakpoint(), width);
    let presenter = DetailPanePresenter::new(ctx.settings.exit_transition());
    let mut app = InboxApp::new(viewport, presenter, Box::new(SystemClipboard), draft);

    let classifier: Arc<dyn Classifier> = Arc::new(ctx.classifier.clone());
    tracing::info!(api = %ctx.classifier.base_url(), "starting inbox");

    // The loop blocks on terminal input while submissions run on other workers.
    tokio::task::block_in_place(|| terminal::run(&mut app, classifier))
}
