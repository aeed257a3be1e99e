use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::record::{Category, EmailId, EmailRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    SubmissionForm,
    ProductiveList,
    UnproductiveList,
}

impl ActiveView {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Productive => ActiveView::ProductiveList,
            Category::Unproductive => ActiveView::UnproductiveList,
        }
    }

    pub fn bucket(self) -> Option<Category> {
        match self {
            ActiveView::SubmissionForm => None,
            ActiveView::ProductiveList => Some(Category::Productive),
            ActiveView::UnproductiveList => Some(Category::Unproductive),
        }
    }
}

/// Both buckets, the active view, and the selection.
///
/// Every mutation leaves the selection either empty or pointing at a record in
/// the bucket of the active view.
#[derive(Debug, Default)]
pub struct TriageStore {
    productive: Vec<EmailRecord>,
    unproductive: Vec<EmailRecord>,
    active_view: ActiveView,
    selected: Option<EmailId>,
}

impl TriageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn productive(&self) -> &[EmailRecord] {
        &self.productive
    }

    pub fn unproductive(&self) -> &[EmailRecord] {
        &self.unproductive
    }

    pub fn bucket(&self, category: Category) -> &[EmailRecord] {
        match category {
            Category::Productive => &self.productive,
            Category::Unproductive => &self.unproductive,
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn selected_id(&self) -> Option<EmailId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&EmailRecord> {
        let id = self.selected?;
        self.active_list().iter().find(|record| record.id() == id)
    }

    /// Records of the active view's bucket; empty while the form is shown.
    pub fn active_list(&self) -> &[EmailRecord] {
        match self.active_view.bucket() {
            Some(category) => self.bucket(category),
            None => &[],
        }
    }

    pub fn find(&self, id: EmailId) -> Option<&EmailRecord> {
        self.productive
            .iter()
            .chain(self.unproductive.iter())
            .find(|record| record.id() == id)
    }

    /// Prepends the record to its bucket, switches to that bucket's list, and selects it.
    pub fn ingest(&mut self, record: EmailRecord) {
        debug_assert!(
            self.find(record.id()).is_none(),
            "record {} ingested twice",
            record.id()
        );

        let id = record.id();
        let category = record.category();
        self.bucket_mut(category).insert(0, record);
        self.active_view = ActiveView::for_category(category);
        self.selected = Some(id);

        tracing::info!(%id, %category, "ingested analyzed email");
    }

    pub fn select_view(&mut self, view: ActiveView) {
        self.active_view = view;

        let keep = self
            .selected
            .is_some_and(|id| self.active_list().iter().any(|record| record.id() == id));
        if !keep {
            self.selected = None;
        }
    }

    pub fn select(&mut self, id: EmailId) -> AppResult<()> {
        if !self.active_list().iter().any(|record| record.id() == id) {
            tracing::error!(%id, view = ?self.active_view, "select called with an id outside the active bucket");
            return Err(AppError::Invariant(format!(
                "email {id} is not in the active view"
            )));
        }

        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Removes the record from whichever bucket holds it, clearing the selection if it pointed there.
    pub fn delete(&mut self, id: EmailId) -> Option<EmailRecord> {
        let removed = [Category::Productive, Category::Unproductive]
            .into_iter()
            .find_map(|category| {
                let bucket = self.bucket_mut(category);
                let index = bucket.iter().position(|record| record.id() == id)?;
                Some(bucket.remove(index))
            });

        if self.selected == Some(id) {
            self.selected = None;
        }

        if removed.is_some() {
            tracing::info!(%id, "deleted email");
        }

        removed
    }

    /// Moves the selection by `delta` within the active list, selecting the first record when nothing is selected.
    pub fn move_selection(&mut self, delta: i32) {
        let list = self.active_list();
        if list.is_empty() {
            self.selected = None;
            return;
        }

        let current = self
            .selected
            .and_then(|id| list.iter().position(|record| record.id() == id));
        let next = match current {
            Some(index) => (index as i64 + delta as i64).clamp(0, list.len() as i64 - 1) as usize,
            None => 0,
        };
        let next_id = list[next].id();
        self.selected = Some(next_id);
    }

    /// The reply that may be copied: only unproductive records qualify.
    pub fn copyable_response(&self) -> Option<&str> {
        self.selected()
            .filter(|record| record.category() == Category::Unproductive)
            .map(EmailRecord::suggested_response)
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<EmailRecord> {
        match category {
            Category::Productive => &mut self.productive,
            Category::Unproductive => &mut self.unproductive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::record::OriginalSubmission;

    fn record(category: Category) -> EmailRecord {
        let original = OriginalSubmission {
            subject: "subject".to_string(),
            body: "body".to_string(),
            original_file_name: None,
            original_file_type: None,
        };
        EmailRecord::new(original, category, "reply")
    }

    #[test]
    fn select_view_keeps_selection_inside_matching_bucket() {
        let mut store = TriageStore::new();
        let kept = record(Category::Productive);
        let id = kept.id();
        store.ingest(kept);

        store.select_view(ActiveView::ProductiveList);
        assert_eq!(store.selected_id(), Some(id));

        store.select_view(ActiveView::UnproductiveList);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn move_selection_clamps_to_list_bounds() {
        let mut store = TriageStore::new();
        let older = record(Category::Productive);
        let older_id = older.id();
        store.ingest(older);
        let newer = record(Category::Productive);
        let newer_id = newer.id();
        store.ingest(newer);

        store.move_selection(5);
        assert_eq!(store.selected_id(), Some(older_id));
        store.move_selection(-5);
        assert_eq!(store.selected_id(), Some(newer_id));
    }

    #[test]
    fn move_selection_on_form_clears_selection() {
        let mut store = TriageStore::new();
        store.move_selection(1);
        assert_eq!(store.selected_id(), None);
    }
}
