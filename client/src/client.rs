use futures::future::join_all;

use crate::filter::filter_notes;
use crate::models::{Note, NoteId};
use crate::notify::Notifier;
use crate::store::{NoteStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Idle,
    Editing(NoteId),
}

/// Outcome of a clear-all: one entry per delete that was issued.
#[derive(Debug)]
pub struct ClearReport {
    pub results: Vec<(NoteId, Result<(), StoreError>)>,
}

impl ClearReport {
    pub fn issued(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = (NoteId, &StoreError)> {
        self.results
            .iter()
            .filter_map(|(id, result)| result.as_ref().err().map(|e| (*id, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }
}

/// Client-side view of the notes.
///
/// The cache is never patched in place: every successful mutation is
/// followed by a full [`NoteClient::load`], so the last listing wins.
pub struct NoteClient<S, N> {
    store: S,
    notifier: N,
    notes: Vec<Note>,
    draft: String,
    mode: EditMode,
    search: String,
}

impl<S: NoteStore, N: Notifier> NoteClient<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            notes: Vec::new(),
            draft: String::new(),
            mode: EditMode::Idle,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// The cached notes matching the current search.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search)
    }

    /// Replaces the cache with a fresh listing. Failures leave the cache as it was.
    pub async fn load(&mut self) -> bool {
        match self.store.list_notes().await {
            Ok(notes) => {
                log::debug!("Loaded {} notes", notes.len());
                self.notes = notes;
                true
            }
            Err(e) => {
                log::error!("Failed to load notes: {}", e);
                false
            }
        }
    }

    pub async fn add(&mut self) -> Option<Note> {
        if let EditMode::Editing(id) = self.mode {
            log::warn!("Ignoring add while note {} is being edited", id);
            return None;
        }

        match self.store.create_note(&self.draft).await {
            Ok(note) => {
                self.load().await;
                self.draft.clear();
                Some(note)
            }
            Err(e) => {
                log::error!("Failed to create note: {}", e);
                self.notifier.alert(&e.detail());
                None
            }
        }
    }

    pub async fn delete(&mut self, id: NoteId) -> bool {
        match self.store.delete_note(id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                log::error!("Failed to delete note {}: {}", id, e);
                false
            }
        }
    }

    /// Starts editing a cached note, loading its text into the draft.
    pub fn edit(&mut self, id: NoteId) -> bool {
        match self.notes.iter().find(|n| n.id == id) {
            Some(note) => {
                self.draft = note.text.clone();
                self.mode = EditMode::Editing(id);
                true
            }
            None => {
                log::warn!("Cannot edit note {}: not in the list", id);
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.mode != EditMode::Idle {
            self.mode = EditMode::Idle;
            self.draft.clear();
        }
    }

    pub async fn save(&mut self) -> Option<Note> {
        let EditMode::Editing(id) = self.mode else {
            log::warn!("Ignoring save with no note being edited");
            return None;
        };

        match self.store.update_note(id, &self.draft).await {
            Ok(note) => {
                self.load().await;
                self.draft.clear();
                self.mode = EditMode::Idle;
                Some(note)
            }
            Err(e) => {
                log::error!("Failed to update note {}: {}", id, e);
                self.notifier.alert(&e.detail());
                None
            }
        }
    }

    /// Deletes every cached note concurrently, then reloads once.
    ///
    /// Individual failures are logged and reported, never retried; a partial
    /// clear is a normal outcome.
    pub async fn clear_all(&mut self) -> ClearReport {
        let ids: Vec<NoteId> = self.notes.iter().map(|n| n.id).collect();
        let store = &self.store;

        let results = join_all(ids.into_iter().map(|id| async move {
            (id, store.delete_note(id).await)
        }))
            .await;

        for (id, result) in &results {
            if let Err(e) = result {
                log::error!("Failed to delete note {} during clear: {}", id, e);
            }
        }

        self.load().await;
        ClearReport { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalNoteStore;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        alerts: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    /// Wraps a local store, counts deletes and fails the ones listed.
    struct FlakyStore {
        inner: LocalNoteStore,
        failing: HashSet<NoteId>,
        deletes: Mutex<Vec<NoteId>>,
        fail_listing: bool,
    }

    impl FlakyStore {
        fn new(inner: LocalNoteStore) -> Self {
            Self {
                inner,
                failing: HashSet::new(),
                deletes: Mutex::new(Vec::new()),
                fail_listing: false,
            }
        }

        fn delete_calls(&self) -> Vec<NoteId> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NoteStore for FlakyStore {
        async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
            if self.fail_listing {
                return Err(StoreError::Rejected { status: 500, detail: "down".to_string() });
            }
            self.inner.list_notes().await
        }

        async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
            self.inner.create_note(text).await
        }

        async fn update_note(&self, id: NoteId, text: &str) -> Result<Note, StoreError> {
            self.inner.update_note(id, text).await
        }

        async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
            self.deletes.lock().unwrap().push(id);
            if self.failing.contains(&id) {
                return Err(StoreError::Rejected { status: 500, detail: "boom".to_string() });
            }
            self.inner.delete_note(id).await
        }
    }

    async fn seeded(texts: &[&str]) -> LocalNoteStore {
        let store = LocalNoteStore::new().rejecting_empty();
        for text in texts {
            store.create_note(text).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn add_reloads_and_clears_draft() {
        let notifier = RecordingNotifier::default();
        let mut client = NoteClient::new(LocalNoteStore::new(), notifier.clone());
        client.load().await;
        assert!(client.notes().is_empty());

        client.set_draft("buy milk");
        let created = client.add().await.expect("note created");

        assert_eq!(client.draft(), "");
        assert_eq!(client.notes(), &[created]);
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejected_add_alerts_and_keeps_list() {
        let notifier = RecordingNotifier::default();
        let mut client = NoteClient::new(seeded(&["existing"]).await, notifier.clone());
        client.load().await;
        let before = client.notes().to_vec();

        client.set_draft("");
        assert!(client.add().await.is_none());

        assert_eq!(*notifier.alerts.borrow(), vec!["Text must not be empty".to_string()]);
        assert_eq!(client.notes(), before.as_slice());
    }

    #[tokio::test]
    async fn edit_then_save_changes_only_that_note() {
        let mut client = NoteClient::new(seeded(&["a", "b", "c"]).await, RecordingNotifier::default());
        client.load().await;
        let before = client.notes().to_vec();
        let target = before[1].id;

        assert!(client.edit(target));
        assert_eq!(client.mode(), EditMode::Editing(target));
        assert_eq!(client.draft(), "b");

        client.set_draft("b, revised");
        let saved = client.save().await.expect("saved");
        assert_eq!(saved.id, target);
        assert_eq!(client.mode(), EditMode::Idle);
        assert_eq!(client.draft(), "");

        let after = client.notes();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].id, target);
        assert_eq!(after[1].text, "b, revised");
        assert!(after[1].date >= before[1].date);
    }

    #[tokio::test]
    async fn failed_save_stays_in_edit_mode() {
        let notifier = RecordingNotifier::default();
        let mut client = NoteClient::new(seeded(&["keep me"]).await, notifier.clone());
        client.load().await;
        let id = client.notes()[0].id;

        client.edit(id);
        client.set_draft("   ");
        assert!(client.save().await.is_none());

        assert_eq!(client.mode(), EditMode::Editing(id));
        assert_eq!(client.draft(), "   ");
        assert_eq!(notifier.alerts.borrow().len(), 1);
        assert_eq!(client.notes()[0].text, "keep me");
    }

    #[tokio::test]
    async fn add_is_ignored_while_editing_and_save_while_idle() {
        let mut client = NoteClient::new(seeded(&["only"]).await, RecordingNotifier::default());
        client.load().await;

        assert!(client.save().await.is_none());

        let id = client.notes()[0].id;
        client.edit(id);
        assert!(client.add().await.is_none());
        assert_eq!(client.notes().len(), 1);

        client.cancel_edit();
        assert_eq!(client.mode(), EditMode::Idle);
        assert_eq!(client.draft(), "");
    }

    #[tokio::test]
    async fn edit_of_unknown_note_is_refused() {
        let mut client = NoteClient::new(LocalNoteStore::new(), RecordingNotifier::default());
        assert!(!client.edit(NoteId(12)));
        assert_eq!(client.mode(), EditMode::Idle);
    }

    #[tokio::test]
    async fn delete_failure_is_not_alerted() {
        let notifier = RecordingNotifier::default();
        let mut client = NoteClient::new(LocalNoteStore::new(), notifier.clone());
        assert!(!client.delete(NoteId(5)).await);
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn clear_all_issues_one_delete_per_cached_note() {
        let mut store = FlakyStore::new(seeded(&["1", "2", "3", "4", "5"]).await);
        store.failing.insert(NoteId(2));
        store.failing.insert(NoteId(4));

        let notifier = RecordingNotifier::default();
        let mut client = NoteClient::new(store, notifier.clone());
        client.load().await;

        let report = client.clear_all().await;

        assert_eq!(report.issued(), 5);
        assert!(!report.is_complete());
        let failed: Vec<NoteId> = report.failures().map(|(id, _)| id).collect();
        assert_eq!(failed, vec![NoteId(2), NoteId(4)]);

        let mut calls = client.store().delete_calls();
        calls.sort();
        assert_eq!(calls, (1..=5).map(NoteId).collect::<Vec<_>>());

        let left: Vec<NoteId> = client.notes().iter().map(|n| n.id).collect();
        assert_eq!(left, vec![NoteId(2), NoteId(4)]);
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_load_keeps_stale_cache() {
        let store = FlakyStore::new(seeded(&["cached"]).await);
        let mut client = NoteClient::new(store, RecordingNotifier::default());
        assert!(client.load().await);

        client.store.fail_listing = true;
        assert!(!client.load().await);
        assert_eq!(client.notes().len(), 1);
    }

    #[tokio::test]
    async fn search_filters_without_touching_cache() {
        let mut client = NoteClient::new(
            seeded(&["a quick note", "shopping list"]).await,
            RecordingNotifier::default(),
        );
        client.load().await;

        client.set_search("NOTE");
        let visible: Vec<&str> = client.visible_notes().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(visible, vec!["a quick note"]);
        assert_eq!(client.notes().len(), 2);
    }
}
