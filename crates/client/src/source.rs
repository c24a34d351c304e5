// crates/client/src/source.rs
//! The suggestion service boundary, as seen from the client.
//!
//! [`SuggestionSource`] is the seam the controller talks to;
//! [`HttpSuggestClient`] implements it over HTTP against the InboxHQ server.
//! [`InstrumentedSource`] decorates any source with a push-based observer;
//! callers that want network capture wrap their source instead of patching
//! anything global.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use inboxhq_types::{SuggestResponse, Suggestion};
use thiserror::Error;

/// Errors from the suggestion boundary. The controller degrades all of them
/// to "no suggestions"; they stay typed so instrumentation and callers that
/// do care (e.g. authorization surfacing) can tell them apart. Never retried
/// here; retry policy belongs to the calling UI layer.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected status: {0}")]
    Status(u16),
}

/// A request/response boundary that turns a query string into ranked
/// suggestions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, SuggestError>;
}

/// HTTP client for `GET /api/suggestions?q=`.
#[derive(Debug, Clone)]
pub struct HttpSuggestClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSuggestClient {
    /// `base_url` without a trailing slash, e.g. `http://127.0.0.1:47311`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestClient {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, SuggestError> {
        let response = self
            .http
            .get(format!("{}/api/suggestions", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        match response.status().as_u16() {
            200..=299 => {}
            401 => return Err(SuggestError::Unauthorized),
            status => return Err(SuggestError::Status(status)),
        }

        let body: SuggestResponse = response.json().await?;
        Ok(body.suggestions)
    }
}

/// How an observed suggestion request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Number of suggestions returned.
    Ok(usize),
    /// Stringified error.
    Err(String),
}

/// One observed suggestion request.
#[derive(Debug, Clone)]
pub struct SuggestEvent {
    pub query: String,
    pub elapsed: Duration,
    pub outcome: SuggestOutcome,
}

/// Decorator emitting a [`SuggestEvent`] to an observer callback for every
/// request passing through the wrapped source.
pub struct InstrumentedSource<S> {
    inner: S,
    observer: Box<dyn Fn(SuggestEvent) + Send + Sync>,
}

impl<S: SuggestionSource> InstrumentedSource<S> {
    pub fn new(inner: S, observer: impl Fn(SuggestEvent) + Send + Sync + 'static) -> Self {
        Self {
            inner,
            observer: Box::new(observer),
        }
    }
}

#[async_trait]
impl<S: SuggestionSource> SuggestionSource for InstrumentedSource<S> {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, SuggestError> {
        let start = Instant::now();
        let result = self.inner.suggest(query).await;
        let outcome = match &result {
            Ok(items) => SuggestOutcome::Ok(items.len()),
            Err(e) => SuggestOutcome::Err(e.to_string()),
        };
        (self.observer)(SuggestEvent {
            query: query.to_string(),
            elapsed: start.elapsed(),
            outcome,
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxhq_types::SuggestionKind;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_http_client_parses_suggestions() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/suggestions")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "expor".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"suggestions":[{"value":"Unable to export data","kind":"title","matchStart":10,"matchLength":5}]}"#,
            )
            .create_async()
            .await;

        let client = HttpSuggestClient::new(server.url());
        let suggestions = client.suggest("expor").await.unwrap();
        mock.assert_async().await;

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "Unable to export data");
        assert_eq!(suggestions[0].kind, SuggestionKind::Title);
        assert_eq!(suggestions[0].match_start, 10);
    }

    #[tokio::test]
    async fn test_http_client_maps_401_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/suggestions")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = HttpSuggestClient::new(server.url());
        let err = client.suggest("anything").await.unwrap_err();
        assert!(matches!(err, SuggestError::Unauthorized));
    }

    #[tokio::test]
    async fn test_http_client_maps_other_statuses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/suggestions")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = HttpSuggestClient::new(server.url());
        let err = client.suggest("anything").await.unwrap_err();
        assert!(matches!(err, SuggestError::Status(503)));
    }

    struct CannedSource(Result<usize, ()>);

    #[async_trait]
    impl SuggestionSource for CannedSource {
        async fn suggest(&self, _query: &str) -> Result<Vec<Suggestion>, SuggestError> {
            match self.0 {
                Ok(n) => Ok(vec![
                    Suggestion {
                        value: "x".to_string(),
                        kind: SuggestionKind::Title,
                        match_start: -1,
                        match_length: 0,
                    };
                    n
                ]),
                Err(()) => Err(SuggestError::Status(500)),
            }
        }
    }

    #[tokio::test]
    async fn test_instrumented_source_observes_success() {
        let events: Arc<Mutex<Vec<SuggestEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let source = InstrumentedSource::new(CannedSource(Ok(3)), move |event| {
            sink.lock().unwrap().push(event);
        });

        let items = source.suggest("export").await.unwrap();
        assert_eq!(items.len(), 3);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].query, "export");
        assert_eq!(events[0].outcome, SuggestOutcome::Ok(3));
    }

    #[tokio::test]
    async fn test_instrumented_source_observes_failure_and_forwards_error() {
        let events: Arc<Mutex<Vec<SuggestEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let source = InstrumentedSource::new(CannedSource(Err(())), move |event| {
            sink.lock().unwrap().push(event);
        });

        let err = source.suggest("export").await.unwrap_err();
        assert!(matches!(err, SuggestError::Status(500)));
        assert_eq!(
            events.lock().unwrap()[0].outcome,
            SuggestOutcome::Err("unexpected status: 500".to_string())
        );
    }
}
