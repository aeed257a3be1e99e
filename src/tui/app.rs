//! Inbox session state: the triage core plus terminal-only bits (cursor, prompts, status line).

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::Classifier;
use crate::api::models::{AnalysisResponse, UploadedFile};
use crate::clipboard::ClipboardSink;
use crate::error::AppResult;
use crate::triage::{
    ActiveView, DetailPanePresenter, Draft, EmailId, GestureTracker, Point, RenderDecision,
    Resolution, SubmissionController, Ticket, TriageStore, ViewportClass, ViewportClassifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a path to attach to the form.
    FilePath,
}

/// Result of one classifier call, routed back to the session loop.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: AppResult<AnalysisResponse>,
}

pub struct InboxApp {
    pub store: TriageStore,
    pub submission: SubmissionController,
    pub tracker: GestureTracker,
    pub viewport: ViewportClassifier,
    pub presenter: DetailPanePresenter,
    pub input_mode: InputMode,
    pub path_input: String,
    /// Highlighted row while the compact list is shown without a selection.
    pub list_cursor: usize,
    pub status: Option<String>,
    pub should_quit: bool,
    /// The record a drag started on; a drag never outlives its record's selection.
    drag_target: Option<EmailId>,
    clipboard: Box<dyn ClipboardSink>,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl InboxApp {
    pub fn new(
        viewport: ViewportClassifier,
        presenter: DetailPanePresenter,
        clipboard: Box<dyn ClipboardSink>,
        draft: Draft,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            store: TriageStore::new(),
            submission: SubmissionController::with_draft(draft),
            tracker: GestureTracker::new(),
            viewport,
            presenter,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            list_cursor: 0,
            status: None,
            should_quit: false,
            drag_target: None,
            clipboard,
            completions_tx,
            completions_rx,
        }
    }

    pub fn class(&self) -> ViewportClass {
        self.viewport.class()
    }

    pub fn decision(&self, now: Instant) -> RenderDecision<'_> {
        self.presenter.project(&self.store, &self.tracker, self.class(), now)
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.reset_detail_pane();
        self.store.select_view(view);
        self.list_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    /// Starts an analysis in the background; the result comes back through [`Self::drain_completions`].
    pub fn submit(&mut self, classifier: Arc<dyn Classifier>) {
        let request = match self.submission.begin() {
            Ok(request) => request,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };

        self.status = Some("Analyzing...".to_string());
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = classifier.classify(&request.input).await;
            let completion = Completion {
                ticket: request.ticket,
                outcome,
            };
            if tx.send(completion).is_err() {
                tracing::debug!("inbox closed before the analysis finished");
            }
        });
    }

    pub fn apply_completion(&mut self, completion: Completion) {
        match self
            .submission
            .resolve(&mut self.store, completion.ticket, completion.outcome)
        {
            Resolution::Ingested(id) => {
                self.reset_detail_pane();
                self.list_cursor = 0;
                self.status = self
                    .store
                    .find(id)
                    .map(|record| format!("Classified as {}", record.category()));
            }
            Resolution::Failed(err) => {
                self.status = Some(err.to_string());
            }
            Resolution::Stale => {}
        }
    }

    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    /// Waits for the next completion and applies it.
    pub async fn settle_next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let exiting = self.store.selected_id();
        if self.presenter.tick(&mut self.store, &mut self.tracker, now) {
            self.drag_target = None;
            if let Some(id) = exiting {
                self.highlight(id);
            }
        }
    }

    /// Drops any exit transition or drag tied to the current selection.
    fn reset_detail_pane(&mut self) {
        self.presenter.cancel_exit(&mut self.tracker);
        self.tracker.settle();
        self.drag_target = None;
    }

    /// Points the compact list cursor at `id`'s row, if it is listed.
    fn highlight(&mut self, id: EmailId) {
        if let Some(index) = self
            .store
            .active_list()
            .iter()
            .position(|record| record.id() == id)
        {
            self.list_cursor = index;
        }
    }

    pub fn resize(&mut self, width: u16) {
        if self.viewport.resize(width) {
            // A drag in progress belongs to the old layout.
            self.tracker.settle();
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        if self.store.active_view() == ActiveView::SubmissionForm {
            return;
        }

        match (self.class(), self.store.selected_id()) {
            (ViewportClass::Wide, _) => {
                self.reset_detail_pane();
                self.store.move_selection(delta);
            }
            (ViewportClass::Compact, None) => {
                let len = self.store.active_list().len();
                if len == 0 {
                    self.list_cursor = 0;
                    return;
                }
                let next = (self.list_cursor as i64 + delta as i64).clamp(0, len as i64 - 1);
                self.list_cursor = next as usize;
            }
            (ViewportClass::Compact, Some(_)) => {}
        }
    }

    pub fn open_highlighted(&mut self) {
        if self.store.selected_id().is_some() {
            return;
        }

        let Some(id) = self
            .store
            .active_list()
            .get(self.list_cursor)
            .map(|record| record.id())
        else {
            return;
        };

        self.reset_detail_pane();
        if let Err(err) = self.store.select(id) {
            self.status = Some(err.to_string());
        }
    }

    pub fn back(&mut self, now: Instant) {
        let Some(id) = self.store.selected_id() else {
            return;
        };

        let class = self.class();
        self.presenter.back(&mut self.store, class, now);
        if self.store.selected_id().is_none() {
            self.highlight(id);
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.store.selected_id() else {
            return;
        };

        self.reset_detail_pane();
        if self.store.delete(id).is_some() {
            let len = self.store.active_list().len();
            self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
            self.status = Some("Email deleted".to_string());
        }
    }

    pub fn copy_selected(&mut self) {
        if self.store.selected().is_none() {
            return;
        }

        let Some(reply) = self.store.copyable_response().map(str::to_owned) else {
            self.status = Some("Copying is only available for unproductive emails".to_string());
            return;
        };

        self.status = match self.clipboard.write(&reply) {
            Ok(()) => Some("Suggested response copied".to_string()),
            Err(err) => Some(err.to_string()),
        };
    }

    pub fn send_selected(&mut self) {
        let Some(record) = self.store.selected() else {
            return;
        };

        tracing::info!(id = %record.id(), "reply marked as sent");
        self.status = Some(format!("Reply sent for \"{}\"", record.subject()));
        self.reset_detail_pane();
        self.store.deselect();
    }

    pub fn begin_file_prompt(&mut self) {
        if self.submission.is_loading() {
            return;
        }
        self.input_mode = InputMode::FilePath;
        self.path_input.clear();
    }

    pub fn cancel_file_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.path_input.clear();
    }

    pub fn confirm_file_prompt(&mut self) {
        let path = self.path_input.trim().to_string();
        self.cancel_file_prompt();
        if path.is_empty() {
            return;
        }

        match UploadedFile::load(Path::new(&path)) {
            Ok(file) => {
                let name = file.name.clone();
                if let Some(draft) = self.submission.draft_mut() {
                    draft.file = Some(file);
                    self.status = Some(format!("Attached {name}"));
                }
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn detach_file(&mut self) {
        if let Some(draft) = self.submission.draft_mut() {
            draft.file = None;
        }
    }

    pub fn type_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::FilePath => self.path_input.push(c),
            InputMode::Normal => {
                if let Some(draft) = self.submission.draft_mut() {
                    draft.text.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.input_mode {
            InputMode::FilePath => {
                self.path_input.pop();
            }
            InputMode::Normal => {
                if let Some(draft) = self.submission.draft_mut() {
                    draft.text.pop();
                }
            }
        }
    }

    pub fn pointer_down(&mut self, point: Point, now: Instant) {
        if !matches!(self.decision(now), RenderDecision::DetailOnly { .. }) {
            return;
        }

        self.tracker.touch_start(point, self.class());
        if self.tracker.is_tracking() {
            self.drag_target = self.store.selected_id();
        }
    }

    pub fn pointer_drag(&mut self, point: Point, now: Instant) {
        if !self.drag_matches_selection() {
            return;
        }
        if let Some(outcome) = self.tracker.touch_move(point) {
            let class = self.class();
            self.presenter
                .handle_gesture(outcome, &mut self.store, &mut self.tracker, class, now);
        }
    }

    pub fn pointer_up(&mut self, now: Instant) {
        if !self.drag_matches_selection() {
            return;
        }
        if let Some(outcome) = self.tracker.touch_end() {
            let class = self.class();
            self.presenter
                .handle_gesture(outcome, &mut self.store, &mut self.tracker, class, now);
        }
    }

    /// A drag whose record is no longer selected is discarded.
    fn drag_matches_selection(&mut self) -> bool {
        if self.drag_target.is_some() && self.drag_target == self.store.selected_id() {
            return true;
        }

        if self.tracker.is_tracking() {
            tracing::debug!("discarding drag that outlived its selection");
            self.tracker.settle();
        }
        self.drag_target = None;
        false
    }
}
