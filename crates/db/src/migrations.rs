/// Inline SQL migrations for the InboxHQ database schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: actors table
    r#"
CREATE TABLE IF NOT EXISTS actors (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role  TEXT NOT NULL
);
"#,
    // Migration 2: tickets table
    r#"
CREATE TABLE IF NOT EXISTS tickets (
    id           TEXT PRIMARY KEY,
    subject      TEXT NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    status       TEXT NOT NULL DEFAULT 'open',
    priority     TEXT NOT NULL DEFAULT 'medium',
    requester_id TEXT NOT NULL REFERENCES actors(id),
    assignee_id  TEXT REFERENCES actors(id),
    created_at   INTEGER NOT NULL,
    updated_at   INTEGER NOT NULL
);
"#,
    // Migrations 3-5: ticket indexes. updated_at DESC drives candidate sourcing.
    r#"CREATE INDEX IF NOT EXISTS idx_tickets_updated ON tickets(updated_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_tickets_assignee ON tickets(assignee_id);"#,
    // Migration 6: comments table
    r#"
CREATE TABLE IF NOT EXISTS comments (
    id         TEXT PRIMARY KEY,
    ticket_id  TEXT NOT NULL REFERENCES tickets(id),
    author_id  TEXT NOT NULL REFERENCES actors(id),
    body       TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_comments_ticket ON comments(ticket_id);"#,
];
