// crates/client/src/lib.rs
//! Client-side search core for the InboxHQ SPA.
//!
//! Three pieces, wired together by the embedding UI:
//!
//! - [`SearchStore`]: draft text, committed query/filters, and the bounded
//!   persisted search history (single writer for all of them).
//! - [`Autocomplete`]: the interaction controller for dropdown visibility,
//!   keyboard navigation over the active item list, suggestion fetching with
//!   stale-response protection.
//! - [`SuggestionSource`]: the suggestion service boundary, implemented
//!   over HTTP by [`HttpSuggestClient`] and swappable for a fake in tests.
//!   [`InstrumentedSource`] decorates any source with a push-based request
//!   observer.
//!
//! Everything runs on the UI's single logical thread; suggestion fetches are
//! async and non-blocking but state mutation stays single-writer.

pub mod controller;
pub mod history;
pub mod source;
pub mod state;

pub use controller::{ActiveList, Autocomplete, Key, KeyOutcome};
pub use history::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore, HISTORY_STORAGE_KEY};
pub use source::{
    HttpSuggestClient, InstrumentedSource, SuggestError, SuggestEvent, SuggestOutcome,
    SuggestionSource,
};
pub use state::SearchStore;

/// Maximum number of persisted search-history entries.
pub const MAX_HISTORY: usize = 5;
