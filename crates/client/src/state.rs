// crates/client/src/state.rs
//! The search state store: draft text, committed query and filters, and the
//! bounded search history.
//!
//! The draft updates on every keystroke and is never overwritten by async
//! responses; the committed query changes only on explicit commit actions
//! (submit, history pick, suggestion pick). Text-query commits and the
//! structured facet filters are mutually exclusive views: selecting one
//! clears the other, and the facets clear each other: the last selected
//! facet wins.

use inboxhq_types::{SearchField, Suggestion, SuggestionKind, TicketPriority, TicketStatus};

use crate::history::HistoryStore;
use crate::MAX_HISTORY;

/// Single-writer store for all search state.
///
/// History is the only persisted piece; every history mutation is written
/// through the injected [`HistoryStore`].
pub struct SearchStore {
    draft: String,
    committed_query: String,
    committed_field: SearchField,
    assignee_filter: Option<String>,
    status_filter: Option<TicketStatus>,
    priority_filter: Option<TicketPriority>,
    history: Vec<String>,
    /// Most recent value destined for history, staged on commit and written
    /// once the controller confirms the search succeeded.
    pending_history: Option<String>,
    store: Box<dyn HistoryStore>,
}

impl SearchStore {
    /// Create a store, loading persisted history through `store`.
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        let history = store.load();
        Self {
            draft: String::new(),
            committed_query: String::new(),
            committed_field: SearchField::All,
            assignee_filter: None,
            status_filter: None,
            priority_filter: None,
            history,
            pending_history: None,
            store,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn committed_field(&self) -> SearchField {
        self.committed_field
    }

    pub fn assignee_filter(&self) -> Option<&str> {
        self.assignee_filter.as_deref()
    }

    pub fn status_filter(&self) -> Option<TicketStatus> {
        self.status_filter
    }

    pub fn priority_filter(&self) -> Option<TicketPriority> {
        self.priority_filter
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Update the draft text. Pure assignment; fetch triggering is the
    /// controller's job.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commit a text query. `value` defaults to the current draft, `field`
    /// to [`SearchField::All`]. The committed value is mirrored back into
    /// the draft so the input box reflects exactly what was searched, and
    /// any active assignee/priority filters are reset.
    pub fn commit_search(&mut self, value: Option<&str>, field: Option<SearchField>) {
        let resolved = value.unwrap_or(&self.draft).trim().to_string();
        self.committed_query = resolved.clone();
        self.draft = resolved.clone();
        self.committed_field = field.unwrap_or_default();
        self.assignee_filter = None;
        self.priority_filter = None;
        if !resolved.is_empty() {
            self.pending_history = Some(resolved);
        }
    }

    /// Apply a picked suggestion. Title/description kinds commit a text
    /// query into that field; assignee/status/priority set the matching
    /// structured filter and clear whatever view conflicts with it.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        let value = suggestion.value.trim();
        if value.is_empty() {
            return;
        }
        self.pending_history = Some(value.to_string());

        match suggestion.kind {
            SuggestionKind::Title => {
                self.commit_search(Some(value), Some(SearchField::Title));
            }
            SuggestionKind::Description => {
                self.commit_search(Some(value), Some(SearchField::Description));
            }
            SuggestionKind::Assignee => {
                self.assignee_filter = Some(value.to_string());
                self.priority_filter = None;
                self.clear_text_query();
            }
            SuggestionKind::Status => {
                match value.parse::<TicketStatus>() {
                    Ok(status) => self.status_filter = Some(status),
                    Err(e) => tracing::debug!(error = %e, "ignoring unparseable status suggestion"),
                }
                self.clear_text_query();
            }
            SuggestionKind::Priority => {
                match value.parse::<TicketPriority>() {
                    Ok(priority) => self.priority_filter = Some(priority),
                    Err(e) => tracing::debug!(error = %e, "ignoring unparseable priority suggestion"),
                }
                self.assignee_filter = None;
                self.clear_text_query();
            }
        }
    }

    fn clear_text_query(&mut self) {
        self.committed_query.clear();
        self.draft.clear();
        self.committed_field = SearchField::All;
    }

    /// Record a value at the front of history: trims, no-ops on empty,
    /// removes any case-insensitive duplicate, caps at [`MAX_HISTORY`].
    /// Short-circuits without persisting when the list is unchanged.
    pub fn add_history(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let lower = value.to_lowercase();
        let mut next = Vec::with_capacity(MAX_HISTORY);
        next.push(value.to_string());
        next.extend(
            self.history
                .iter()
                .filter(|e| e.to_lowercase() != lower)
                .take(MAX_HISTORY - 1)
                .cloned(),
        );
        if next == self.history {
            return;
        }
        self.history = next;
        self.store.save(&self.history);
    }

    /// Remove an entry by exact (case-sensitive) match; entries are
    /// literals the user already selected.
    pub fn remove_history(&mut self, value: &str) {
        let before = self.history.len();
        self.history.retain(|e| e != value);
        if self.history.len() != before {
            self.store.save(&self.history);
        }
    }

    /// Write the staged pending-history value, if any. Called by the
    /// controller once it has confirmed the committed search succeeded.
    pub fn flush_pending_history(&mut self) {
        if let Some(value) = self.pending_history.take() {
            self.add_history(&value);
        }
    }

    #[cfg(test)]
    pub(crate) fn pending_history(&self) -> Option<&str> {
        self.pending_history.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::InMemoryHistoryStore;
    use pretty_assertions::assert_eq;

    fn store() -> SearchStore {
        SearchStore::new(Box::new(InMemoryHistoryStore::new()))
    }

    fn suggestion(kind: SuggestionKind, value: &str) -> Suggestion {
        Suggestion {
            value: value.to_string(),
            kind,
            match_start: -1,
            match_length: 0,
        }
    }

    #[test]
    fn test_set_draft_does_not_touch_committed_query() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.set_draft("expo");
        assert_eq!(s.committed_query(), "export");
        assert_eq!(s.draft(), "expo");
    }

    #[test]
    fn test_commit_defaults_to_draft_and_trims() {
        let mut s = store();
        s.set_draft("  login bug  ");
        s.commit_search(None, None);
        assert_eq!(s.committed_query(), "login bug");
        // Mirrored back so the input shows exactly what was searched.
        assert_eq!(s.draft(), "login bug");
        assert_eq!(s.committed_field(), SearchField::All);
        assert_eq!(s.pending_history(), Some("login bug"));
    }

    #[test]
    fn test_commit_clears_structured_filters() {
        let mut s = store();
        s.apply_suggestion(&suggestion(SuggestionKind::Assignee, "Jordan Lee"));
        s.apply_suggestion(&suggestion(SuggestionKind::Priority, "high"));
        s.commit_search(Some("export"), None);
        assert_eq!(s.assignee_filter(), None);
        assert_eq!(s.priority_filter(), None);
        assert_eq!(s.committed_query(), "export");
    }

    #[test]
    fn test_empty_commit_stages_no_history() {
        let mut s = store();
        s.set_draft("   ");
        s.commit_search(None, None);
        assert_eq!(s.committed_query(), "");
        assert_eq!(s.pending_history(), None);
    }

    #[test]
    fn test_apply_title_suggestion_commits_into_title_field() {
        let mut s = store();
        s.apply_suggestion(&suggestion(SuggestionKind::Title, "Unable to export"));
        assert_eq!(s.committed_query(), "Unable to export");
        assert_eq!(s.committed_field(), SearchField::Title);
        assert_eq!(s.draft(), "Unable to export");
    }

    #[test]
    fn test_apply_assignee_clears_text_query_and_priority() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.apply_suggestion(&suggestion(SuggestionKind::Priority, "urgent"));
        s.apply_suggestion(&suggestion(SuggestionKind::Assignee, "Jordan Lee"));
        assert_eq!(s.assignee_filter(), Some("Jordan Lee"));
        assert_eq!(s.priority_filter(), None);
        assert_eq!(s.committed_query(), "");
    }

    #[test]
    fn test_apply_priority_clears_assignee_and_normalizes_case() {
        let mut s = store();
        s.apply_suggestion(&suggestion(SuggestionKind::Assignee, "Jordan Lee"));
        s.apply_suggestion(&suggestion(SuggestionKind::Priority, "HIGH"));
        assert_eq!(s.priority_filter(), Some(TicketPriority::High));
        assert_eq!(s.assignee_filter(), None);
    }

    #[test]
    fn test_apply_status_clears_text_query() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.apply_suggestion(&suggestion(SuggestionKind::Status, "Pending"));
        assert_eq!(s.status_filter(), Some(TicketStatus::Pending));
        assert_eq!(s.committed_query(), "");
    }

    #[test]
    fn test_apply_unknown_status_label_is_ignored_but_still_clears_text() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.apply_suggestion(&suggestion(SuggestionKind::Status, "reopened"));
        assert_eq!(s.status_filter(), None);
        assert_eq!(s.committed_query(), "");
        assert_eq!(s.draft(), "");
    }

    #[test]
    fn test_apply_unknown_priority_label_is_ignored_but_still_clears_assignee() {
        let mut s = store();
        s.apply_suggestion(&suggestion(SuggestionKind::Assignee, "Jordan Lee"));
        s.apply_suggestion(&suggestion(SuggestionKind::Priority, "XL"));
        assert_eq!(s.priority_filter(), None);
        // The priority path still clears the conflicting facet.
        assert_eq!(s.assignee_filter(), None);
    }

    #[test]
    fn test_apply_empty_suggestion_is_a_no_op() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.apply_suggestion(&suggestion(SuggestionKind::Title, "   "));
        assert_eq!(s.committed_query(), "export");
    }

    #[test]
    fn test_history_cap_and_recency_order() {
        let mut s = store();
        for q in ["one", "two", "three", "four", "five", "six"] {
            s.add_history(q);
        }
        assert_eq!(s.history(), ["six", "five", "four", "three", "two"]);
    }

    #[test]
    fn test_history_readd_moves_to_front_without_growth() {
        let mut s = store();
        for q in ["one", "two", "three"] {
            s.add_history(q);
        }
        s.add_history("ONE");
        assert_eq!(s.history(), ["ONE", "three", "two"]);
    }

    #[test]
    fn test_history_unchanged_list_short_circuits() {
        let mut s = store();
        s.add_history("export");
        s.add_history("export");
        assert_eq!(s.history(), ["export"]);
    }

    #[test]
    fn test_remove_history_is_case_sensitive() {
        let mut s = store();
        s.add_history("Export CSV");
        s.remove_history("export csv");
        assert_eq!(s.history(), ["Export CSV"]);
        s.remove_history("Export CSV");
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_flush_pending_history_writes_once() {
        let mut s = store();
        s.commit_search(Some("export"), None);
        s.flush_pending_history();
        assert_eq!(s.history(), ["export"]);
        s.flush_pending_history();
        assert_eq!(s.history(), ["export"]);
    }

    #[test]
    fn test_history_loads_from_injected_store() {
        let backing = InMemoryHistoryStore::new();
        backing.save(&["previous".to_string()]);
        let s = SearchStore::new(Box::new(backing));
        assert_eq!(s.history(), ["previous"]);
    }
}
