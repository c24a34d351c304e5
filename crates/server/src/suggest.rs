// crates/server/src/suggest.rs
//! The suggestion service boundary: candidate gathering + ranking.
//!
//! One ranking pass runs over mixed candidate pools (ticket subjects,
//! ticket descriptions, agent names, and the status/priority label sets),
//! so the top 5 across all of them come back deduplicated and sorted by
//! score then recency.

use inboxhq_db::{Database, DbResult, CANDIDATE_WINDOW};
use inboxhq_search::{rank, Candidate, MAX_SUGGESTIONS};
use inboxhq_types::{Suggestion, SuggestionKind, TicketPriority, TicketStatus};

/// Build ranked suggestions for a query. Empty or whitespace queries
/// short-circuit to an empty list without touching the database.
pub async fn build_suggestions(db: &Database, query: &str) -> DbResult<Vec<Suggestion>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates = db.subject_candidates(CANDIDATE_WINDOW).await?;
    candidates.extend(db.description_candidates(CANDIDATE_WINDOW).await?);
    candidates.extend(db.agent_name_candidates().await?);
    candidates.extend(
        TicketStatus::ALL
            .iter()
            .map(|s| Candidate::new(s.as_str(), 0, SuggestionKind::Status)),
    );
    candidates.extend(
        TicketPriority::ALL
            .iter()
            .map(|p| Candidate::new(p.as_str(), 0, SuggestionKind::Priority)),
    );

    Ok(rank(&candidates, query, MAX_SUGGESTIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxhq_types::{ActorRole, NewTicket};

    async fn seeded_db() -> Database {
        let db = Database::new_in_memory().await.unwrap();
        let customer = db
            .create_actor("Sam Customer", "sam@example.com", ActorRole::Customer)
            .await
            .unwrap();
        db.create_actor("Jordan Lee", "jordan@example.com", ActorRole::Agent)
            .await
            .unwrap();

        for (i, subject) in [
            "Need help exporting reports",
            "Unable to export data to CSV",
        ]
        .iter()
        .enumerate()
        {
            let t = db
                .create_ticket(&NewTicket {
                    subject: subject.to_string(),
                    description: format!("description {i}"),
                    priority: TicketPriority::Medium,
                    requester_id: customer.id.clone(),
                })
                .await
                .unwrap();
            // Deterministic recency: later tickets are more recent.
            sqlx::query("UPDATE tickets SET updated_at = ? WHERE id = ?")
                .bind(1000 + i as i64)
                .bind(&t.id)
                .execute(db.pool())
                .await
                .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let db = Database::new_in_memory().await.unwrap();
        assert!(build_suggestions(&db, "   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prefix_query_ranks_recent_first() {
        let db = seeded_db().await;
        let suggestions = build_suggestions(&db, "expor").await.unwrap();
        // Both subjects contain "expor" verbatim (score 1.0); the more
        // recently updated one wins the tie and both outrank everything
        // that only survives on a short prefix overlap.
        let top: Vec<&str> = suggestions[..2].iter().map(|s| s.value.as_str()).collect();
        assert_eq!(
            top,
            vec![
                "Unable to export data to CSV",
                "Need help exporting reports",
            ],
        );
        for s in &suggestions[..2] {
            assert_eq!(s.kind, SuggestionKind::Title);
            assert!(s.match_length > 0);
        }
    }

    #[tokio::test]
    async fn test_agent_names_suggest_as_assignee() {
        let db = seeded_db().await;
        let suggestions = build_suggestions(&db, "jordan").await.unwrap();
        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Assignee && s.value == "Jordan Lee"));
    }

    #[tokio::test]
    async fn test_status_labels_suggest_as_status() {
        let db = seeded_db().await;
        let suggestions = build_suggestions(&db, "pending").await.unwrap();
        assert_eq!(suggestions[0].kind, SuggestionKind::Status);
        assert_eq!(suggestions[0].value, "pending");
    }

    #[tokio::test]
    async fn test_result_list_is_bounded() {
        let db = seeded_db().await;
        // "e" prefix-matches nearly everything across all pools.
        let suggestions = build_suggestions(&db, "e").await.unwrap();
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }
}
