// crates/client/src/controller.rs
//! The autocomplete interaction controller.
//!
//! Binds input events to the [`SearchStore`], fetches suggestions through a
//! [`SuggestionSource`], and walks keyboard selection over a single merged
//! active list (server suggestions while the draft is non-empty, otherwise
//! persisted history).
//!
//! Fetch failures degrade to an empty list: autocomplete is an enhancement,
//! and committing a raw search always works independent of suggestion
//! availability. Responses are keyed by the query they were issued for;
//! [`Autocomplete::accept_suggestions`] discards any response whose key no
//! longer matches the current draft, so a stale fetch can never overwrite
//! state for the query the user has since typed.

use inboxhq_types::{SearchField, Suggestion};

use crate::source::SuggestionSource;
use crate::state::SearchStore;

/// Keyboard events the controller handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What the caller should do after a key was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The controller consumed the key.
    Handled,
    /// Plain Enter with no active selection: fall through to normal form
    /// submission (the caller invokes [`Autocomplete::submit`]).
    Submit,
}

/// The list keyboard navigation currently walks.
#[derive(Debug, PartialEq)]
pub enum ActiveList<'a> {
    Suggestions(&'a [Suggestion]),
    History(&'a [String]),
    Empty,
}

impl ActiveList<'_> {
    pub fn len(&self) -> usize {
        match self {
            ActiveList::Suggestions(items) => items.len(),
            ActiveList::History(items) => items.len(),
            ActiveList::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interaction controller wiring keyboard navigation, dropdown visibility,
/// and commit actions to the state store and the suggestion boundary.
pub struct Autocomplete<S> {
    store: SearchStore,
    source: S,
    open: bool,
    active_index: isize,
    suggestions: Vec<Suggestion>,
}

impl<S: SuggestionSource> Autocomplete<S> {
    pub fn new(store: SearchStore, source: S) -> Self {
        Self {
            store,
            source,
            open: false,
            active_index: -1,
            suggestions: Vec::new(),
        }
    }

    pub fn store(&self) -> &SearchStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SearchStore {
        &mut self.store
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_index(&self) -> isize {
        self.active_index
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Dropdown shows history: open, empty draft, non-empty history.
    pub fn show_history(&self) -> bool {
        self.open && self.store.draft().trim().is_empty() && !self.store.history().is_empty()
    }

    /// Dropdown shows suggestions: open, non-empty draft, non-empty results.
    pub fn show_suggestions(&self) -> bool {
        self.open && !self.store.draft().trim().is_empty() && !self.suggestions.is_empty()
    }

    /// The merged list keyboard navigation operates on. Both visibility
    /// flags false means the dropdown renders nothing even while `open`.
    pub fn active_list(&self) -> ActiveList<'_> {
        if self.show_suggestions() {
            ActiveList::Suggestions(&self.suggestions)
        } else if self.show_history() {
            ActiveList::History(self.store.history())
        } else {
            ActiveList::Empty
        }
    }

    /// Input gained focus.
    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Input lost focus.
    pub fn blur(&mut self) {
        self.open = false;
        self.active_index = -1;
    }

    /// A keystroke changed the draft. Opens the dropdown and resets the
    /// selection; the caller follows up with [`Self::refresh_suggestions`].
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.store.set_draft(text);
        self.open = true;
        self.active_index = -1;
    }

    /// Fetch suggestions for the current draft and apply them (unless the
    /// draft changed underneath a slow response). Transport and server
    /// errors degrade to an empty list, logged at debug.
    pub async fn refresh_suggestions(&mut self) {
        if !self.open {
            return;
        }
        let query = self.store.draft().trim().to_string();
        if query.is_empty() {
            // Empty query short-circuits without a network call.
            self.suggestions.clear();
            self.clamp_active_index();
            return;
        }
        let items = match self.source.suggest(&query).await {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!(query = %query, error = %e, "suggestion fetch failed");
                Vec::new()
            }
        };
        self.accept_suggestions(&query, items);
    }

    /// Apply a suggestion response keyed by the query it was issued for.
    /// Discarded when the key no longer matches the current draft.
    pub fn accept_suggestions(&mut self, query: &str, items: Vec<Suggestion>) {
        if self.store.draft().trim() != query {
            tracing::debug!(query = %query, "discarding stale suggestion response");
            return;
        }
        self.suggestions = items;
        self.clamp_active_index();
    }

    /// Dispatch a keyboard event.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        // Escape is handled first, regardless of open state.
        if key == Key::Escape {
            self.open = false;
            self.active_index = -1;
            return KeyOutcome::Handled;
        }

        let len = self.active_list().len() as isize;
        match key {
            Key::ArrowDown if self.open && len > 0 => {
                self.active_index = if self.active_index >= len - 1 {
                    0
                } else {
                    self.active_index + 1
                };
                KeyOutcome::Handled
            }
            Key::ArrowUp if self.open && len > 0 => {
                self.active_index = if self.active_index <= 0 {
                    len - 1
                } else {
                    self.active_index - 1
                };
                KeyOutcome::Handled
            }
            Key::Enter if self.active_index >= 0 => {
                self.select(self.active_index as usize);
                KeyOutcome::Handled
            }
            Key::Enter => KeyOutcome::Submit,
            _ => KeyOutcome::Handled,
        }
    }

    /// Select the item at `index` in the active list (mouse or keyboard).
    /// Always closes the dropdown and resets the selection.
    pub fn select(&mut self, index: usize) {
        enum Picked {
            Suggestion(Suggestion),
            History(String),
        }
        let picked = match self.active_list() {
            ActiveList::Suggestions(items) => items.get(index).cloned().map(Picked::Suggestion),
            ActiveList::History(items) => items.get(index).cloned().map(Picked::History),
            ActiveList::Empty => None,
        };
        match picked {
            Some(Picked::Suggestion(s)) => self.store.apply_suggestion(&s),
            Some(Picked::History(value)) => self.store.commit_search(Some(&value), None),
            None => {}
        }
        self.close();
    }

    /// Commit the raw draft (plain form submission).
    pub fn submit(&mut self) {
        self.store.commit_search(None, Some(SearchField::All));
        self.close();
    }

    /// The committed search succeeded; record it in history.
    pub fn confirm_commit(&mut self) {
        self.store.flush_pending_history();
    }

    /// Remove a history entry via its remove control. Never selects the
    /// entry (the remove action does not propagate into selection).
    pub fn remove_history_entry(&mut self, value: &str) {
        self.store.remove_history(value);
        self.clamp_active_index();
    }

    fn close(&mut self) {
        self.open = false;
        self.active_index = -1;
    }

    /// When the active list shrinks past the selection, clamp to the new
    /// end, or to -1 when the list emptied.
    fn clamp_active_index(&mut self) {
        let len = self.active_list().len() as isize;
        if self.active_index >= len {
            self.active_index = len - 1;
        }
    }
}
