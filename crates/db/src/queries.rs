// crates/db/src/queries.rs
// Ticket, actor, and comment CRUD plus candidate sourcing for suggestions.

use chrono::Utc;
use inboxhq_search::Candidate;
use inboxhq_types::{
    Actor, ActorRole, Comment, NewComment, NewTicket, SearchField, SuggestionKind, Ticket,
    TicketPriority, TicketStatus, TicketUpdate,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::{Database, DbResult};

/// How many of the most recently updated tickets feed the suggestion
/// ranker. A fixed source window keeps the scoring pass bounded no matter
/// how large the inbox grows.
pub const CANDIDATE_WINDOW: usize = 300;

/// Filter for `GET /api/tickets`. Text query and facets combine with AND;
/// mutual exclusion between them is the client's policy, not enforced here.
#[derive(Debug, Clone, Default)]
pub struct TicketListFilter {
    pub query: Option<String>,
    pub field: SearchField,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    /// Assignee display name, matched against the actor directory.
    pub assignee: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

fn decode_label<T: std::str::FromStr>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e: T::Err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn ticket_from_row(row: &SqliteRow) -> Result<Ticket, sqlx::Error> {
    Ok(Ticket {
        id: row.try_get("id")?,
        subject: row.try_get("subject")?,
        description: row.try_get("description")?,
        status: decode_label(row, "status")?,
        priority: decode_label(row, "priority")?,
        requester_id: row.try_get("requester_id")?,
        assignee_id: row.try_get("assignee_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn actor_from_row(row: &SqliteRow) -> Result<Actor, sqlx::Error> {
    Ok(Actor {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role: decode_label(row, "role")?,
    })
}

fn comment_from_row(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        ticket_id: row.try_get("ticket_id")?,
        author_id: row.try_get("author_id")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    // ── Actors ──────────────────────────────────────────────────────────

    pub async fn create_actor(&self, name: &str, email: &str, role: ActorRole) -> DbResult<Actor> {
        let actor = Actor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        };
        sqlx::query("INSERT INTO actors (id, name, email, role) VALUES (?, ?, ?, ?)")
            .bind(&actor.id)
            .bind(&actor.name)
            .bind(&actor.email)
            .bind(actor.role.as_str())
            .execute(self.pool())
            .await?;
        Ok(actor)
    }

    pub async fn list_actors(&self, role: Option<ActorRole>) -> DbResult<Vec<Actor>> {
        let rows = match role {
            Some(role) => {
                sqlx::query("SELECT * FROM actors WHERE role = ? ORDER BY name")
                    .bind(role.as_str())
                    .fetch_all(self.pool())
                    .await?
            }
            None => {
                sqlx::query("SELECT * FROM actors ORDER BY name")
                    .fetch_all(self.pool())
                    .await?
            }
        };
        rows.iter().map(|r| Ok(actor_from_row(r)?)).collect()
    }

    pub async fn get_actor(&self, id: &str) -> DbResult<Option<Actor>> {
        let row = sqlx::query("SELECT * FROM actors WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(actor_from_row).transpose().map_err(Into::into)
    }

    // ── Tickets ─────────────────────────────────────────────────────────

    pub async fn create_ticket(&self, new: &NewTicket) -> DbResult<Ticket> {
        let now = Utc::now().timestamp();
        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            subject: new.subject.clone(),
            description: new.description.clone(),
            status: TicketStatus::Open,
            priority: new.priority,
            requester_id: new.requester_id.clone(),
            assignee_id: None,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            "INSERT INTO tickets (id, subject, description, status, priority, requester_id, assignee_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(&ticket.id)
        .bind(&ticket.subject)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.priority.as_str())
        .bind(&ticket.requester_id)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .execute(self.pool())
        .await?;
        Ok(ticket)
    }

    /// Total tickets in storage. Cheap enough for liveness checks.
    pub async fn ticket_count(&self) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(self.pool())
            .await?;
        Ok(row.0)
    }

    pub async fn get_ticket(&self, id: &str) -> DbResult<Option<Ticket>> {
        let row = sqlx::query("SELECT * FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(ticket_from_row).transpose().map_err(Into::into)
    }

    /// Apply a partial update. Absent fields are untouched; any change bumps
    /// `updated_at`. Returns the updated row, or `None` for an unknown id.
    pub async fn update_ticket(&self, id: &str, update: &TicketUpdate) -> DbResult<Option<Ticket>> {
        if update.status.is_none() && update.assignee_id.is_none() {
            return self.get_ticket(id).await;
        }
        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "UPDATE tickets SET
                status = COALESCE(?, status),
                assignee_id = COALESCE(?, assignee_id),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.assignee_id.as_deref())
        .bind(now)
        .bind(id)
        .execute(self.pool())
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_ticket(id).await
    }

    /// List tickets, most recently updated first. Text query matches the
    /// subject and/or description per `filter.field` (case-insensitive
    /// LIKE); status/priority/assignee facets AND in.
    pub async fn list_tickets(&self, filter: &TicketListFilter) -> DbResult<Vec<Ticket>> {
        let mut sql = String::from("SELECT t.* FROM tickets t");
        let mut clauses: Vec<&str> = Vec::new();
        let pattern = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q.to_lowercase()));

        if filter.assignee.is_some() {
            sql.push_str(" JOIN actors a ON a.id = t.assignee_id");
            clauses.push("LOWER(a.name) = LOWER(?)");
        }
        if pattern.is_some() {
            clauses.push(match filter.field {
                SearchField::Title => "LOWER(t.subject) LIKE ?",
                SearchField::Description => "LOWER(t.description) LIKE ?",
                SearchField::All => "(LOWER(t.subject) LIKE ? OR LOWER(t.description) LIKE ?)",
            });
        }
        if filter.status.is_some() {
            clauses.push("t.status = ?");
        }
        if filter.priority.is_some() {
            clauses.push("t.priority = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY t.updated_at DESC LIMIT ? OFFSET ?");

        let mut q = sqlx::query(&sql);
        if let Some(name) = &filter.assignee {
            q = q.bind(name);
        }
        if let Some(pattern) = &pattern {
            q = q.bind(pattern);
            if filter.field == SearchField::All {
                q = q.bind(pattern);
            }
        }
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority.as_str());
        }
        let limit = if filter.limit == 0 { 50 } else { filter.limit };
        q = q.bind(limit as i64).bind(filter.offset as i64);

        let rows = q.fetch_all(self.pool()).await?;
        rows.iter().map(|r| Ok(ticket_from_row(r)?)).collect()
    }

    // ── Comments ────────────────────────────────────────────────────────

    /// Add a reply to a ticket and bump the ticket's `updated_at` so recency
    /// based candidate sourcing reflects the activity. Returns `None` for an
    /// unknown ticket.
    pub async fn create_comment(
        &self,
        ticket_id: &str,
        new: &NewComment,
    ) -> DbResult<Option<Comment>> {
        if self.get_ticket(ticket_id).await?.is_none() {
            return Ok(None);
        }
        let now = Utc::now().timestamp();
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            ticket_id: ticket_id.to_string(),
            author_id: new.author_id.clone(),
            body: new.body.clone(),
            created_at: now,
        };
        sqlx::query(
            "INSERT INTO comments (id, ticket_id, author_id, body, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&comment.id)
        .bind(&comment.ticket_id)
        .bind(&comment.author_id)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(self.pool())
        .await?;
        sqlx::query("UPDATE tickets SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(ticket_id)
            .execute(self.pool())
            .await?;
        Ok(Some(comment))
    }

    pub async fn list_comments(&self, ticket_id: &str) -> DbResult<Vec<Comment>> {
        let rows = sqlx::query("SELECT * FROM comments WHERE ticket_id = ? ORDER BY created_at")
            .bind(ticket_id)
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(|r| Ok(comment_from_row(r)?)).collect()
    }

    // ── Candidate sourcing ──────────────────────────────────────────────

    /// Ticket subjects from the `window` most recently updated tickets.
    /// Malformed rows are skipped with a debug log, a data-quality concern,
    /// never a request failure.
    pub async fn subject_candidates(&self, window: usize) -> DbResult<Vec<Candidate>> {
        self.text_candidates("subject", SuggestionKind::Title, window)
            .await
    }

    /// Ticket descriptions over the same window.
    pub async fn description_candidates(&self, window: usize) -> DbResult<Vec<Candidate>> {
        self.text_candidates("description", SuggestionKind::Description, window)
            .await
    }

    async fn text_candidates(
        &self,
        column: &str,
        kind: SuggestionKind,
        window: usize,
    ) -> DbResult<Vec<Candidate>> {
        let sql = format!(
            "SELECT {column} AS text, updated_at FROM tickets ORDER BY updated_at DESC LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(window as i64)
            .fetch_all(self.pool())
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let text: Result<String, _> = row.try_get("text");
            let recency: Result<i64, _> = row.try_get("updated_at");
            match (text, recency) {
                (Ok(text), Ok(recency)) if !text.trim().is_empty() => {
                    out.push(Candidate::new(text, recency, kind));
                }
                (Ok(_), Ok(_)) => {}
                (text, recency) => {
                    tracing::debug!(
                        column,
                        text_err = text.is_err(),
                        recency_err = recency.is_err(),
                        "skipping malformed candidate row"
                    );
                }
            }
        }
        Ok(out)
    }

    /// Agent display names for assignee suggestions.
    pub async fn agent_name_candidates(&self) -> DbResult<Vec<Candidate>> {
        let actors = self.list_actors(Some(ActorRole::Agent)).await?;
        Ok(actors
            .into_iter()
            .map(|a| Candidate::new(a.name, 0, SuggestionKind::Assignee))
            .collect())
    }
}
