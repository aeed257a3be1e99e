use std::time::{Duration, Instant};

use super::gesture::{GestureOutcome, GestureTracker};
use super::record::{EmailId, EmailRecord};
use super::store::{ActiveView, TriageStore};
use super::viewport::ViewportClass;

pub const DEFAULT_EXIT_TRANSITION: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneMotion {
    Resting,
    /// Following the pointer; no easing applies.
    Dragging,
    /// Sliding out ahead of a deferred deselect, `progress` in `0.0..=1.0`.
    Exiting { progress: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderDecision<'a> {
    SubmissionForm,
    ListOnly {
        records: &'a [EmailRecord],
    },
    DetailOnly {
        record: &'a EmailRecord,
        offset: f32,
        shadow: f32,
        motion: PaneMotion,
    },
    /// Wide layout; `selected` is `None` when the detail pane shows its placeholder.
    Split {
        records: &'a [EmailRecord],
        selected: Option<&'a EmailRecord>,
    },
}

#[derive(Debug, Clone, Copy)]
struct ExitTransition {
    email: EmailId,
    started: Instant,
}

/// Projects store and gesture state into a layout, and owns the exit timer.
///
/// The deferred clear only fires while the selection still points at the
/// record that started exiting, so a newer selection cancels it.
#[derive(Debug, Clone)]
pub struct DetailPanePresenter {
    exit_duration: Duration,
    exit: Option<ExitTransition>,
}

impl DetailPanePresenter {
    pub fn new(exit_duration: Duration) -> Self {
        Self {
            exit_duration,
            exit: None,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    pub fn project<'a>(
        &self,
        store: &'a TriageStore,
        tracker: &GestureTracker,
        class: ViewportClass,
        now: Instant,
    ) -> RenderDecision<'a> {
        if store.active_view() == ActiveView::SubmissionForm {
            return RenderDecision::SubmissionForm;
        }

        let records = store.active_list();
        let selected = store.selected();

        match (class, selected) {
            (ViewportClass::Wide, selected) => RenderDecision::Split { records, selected },
            (ViewportClass::Compact, None) => RenderDecision::ListOnly { records },
            (ViewportClass::Compact, Some(record)) => {
                let motion = match self.exit {
                    Some(exit) if exit.email == record.id() => PaneMotion::Exiting {
                        progress: self.progress(exit, now),
                    },
                    _ if tracker.is_tracking() => PaneMotion::Dragging,
                    _ => PaneMotion::Resting,
                };

                RenderDecision::DetailOnly {
                    record,
                    offset: tracker.offset(),
                    shadow: tracker.shadow_intensity(),
                    motion,
                }
            }
        }
    }

    /// Explicit "back". Wide clears at once; compact slides the pane out first.
    pub fn back(&mut self, store: &mut TriageStore, class: ViewportClass, now: Instant) {
        let Some(id) = store.selected_id() else {
            return;
        };

        if class == ViewportClass::Wide {
            self.exit = None;
            store.deselect();
            return;
        }

        if self.exit.is_some_and(|exit| exit.email == id) {
            return;
        }

        tracing::debug!(%id, "starting detail exit transition");
        self.exit = Some(ExitTransition {
            email: id,
            started: now,
        });
    }

    pub fn handle_gesture(
        &mut self,
        outcome: GestureOutcome,
        store: &mut TriageStore,
        tracker: &mut GestureTracker,
        class: ViewportClass,
        now: Instant,
    ) {
        if outcome != GestureOutcome::Commit {
            return;
        }

        self.back(store, class, now);
        if !self.is_exiting() {
            tracker.settle();
        }
    }

    /// Advances the exit timer. Returns true when it cleared the selection.
    pub fn tick(
        &mut self,
        store: &mut TriageStore,
        tracker: &mut GestureTracker,
        now: Instant,
    ) -> bool {
        let Some(exit) = self.exit else {
            return false;
        };

        if store.selected_id() != Some(exit.email) {
            self.exit = None;
            tracker.settle();
            return false;
        }

        if now.saturating_duration_since(exit.started) < self.exit_duration {
            return false;
        }

        self.exit = None;
        tracker.settle();
        store.deselect();
        true
    }

    pub fn cancel_exit(&mut self, tracker: &mut GestureTracker) {
        if self.exit.take().is_some() {
            tracker.settle();
        }
    }

    fn progress(&self, exit: ExitTransition, now: Instant) -> f32 {
        if self.exit_duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(exit.started);
        (elapsed.as_secs_f32() / self.exit_duration.as_secs_f32()).min(1.0)
    }
}

impl Default for DetailPanePresenter {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_TRANSITION)
    }
}
