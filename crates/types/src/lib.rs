// crates/types/src/lib.rs
//! Shared wire types for the InboxHQ API.
//!
//! Everything here is serialized with camelCase field names and exported to
//! TypeScript via ts-rs so the SPA consumes the same shapes the server
//! produces. Enums that travel on the wire use lowercase string tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Where a suggestion came from, and therefore what committing it means:
/// a text-query commit (title/description) or a structured filter
/// (assignee/status/priority).
///
/// Closed set: consumers must match exhaustively so a new kind cannot be
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Title,
    Description,
    Assignee,
    Status,
    Priority,
}

/// A ranked, typed completion offered to the user.
///
/// `match_start = -1` with `match_length = 0` means "no highlight span".
/// Otherwise `match_start` indexes into `value` (character offsets of the
/// case-folded text; identical to the original under ASCII case folding)
/// and `match_start + match_length <= value` length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub value: String,
    pub kind: SuggestionKind,
    pub match_start: i32,
    pub match_length: u32,
}

/// Response body for `GET /api/suggestions`. At most 5 entries, deduplicated
/// and sorted by score then recency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Error returned when parsing a wire enum label fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All variants, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The lowercase wire label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            /// Case-insensitive: `"High"`, `"HIGH"` and `"high"` all parse.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseLabelError { kind: $label, value: s.to_string() }),
                }
            }
        }
    };
}

/// Which ticket attribute a committed text query matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Match across all searchable attributes.
    #[default]
    All,
    Title,
    Description,
}

wire_enum!(SearchField, "field", {
    All => "all",
    Title => "title",
    Description => "description",
});

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
}

wire_enum!(TicketStatus, "status", {
    Open => "open",
    Pending => "pending",
    Resolved => "resolved",
    Closed => "closed",
});

/// Urgency of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

wire_enum!(TicketPriority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

/// Whether an actor files tickets or works them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Customer,
    Agent,
}

wire_enum!(ActorRole, "role", {
    Customer => "customer",
    Agent => "agent",
});

/// A helpdesk ticket. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub requester_id: String,
    pub assignee_id: Option<String>,
    #[ts(type = "number")]
    pub created_at: i64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

/// A customer or agent in the actor directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: ActorRole,
}

/// A reply on a ticket's thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub body: String,
    #[ts(type = "number")]
    pub created_at: i64,
}

/// Request body for `POST /api/tickets`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub requester_id: String,
}

/// Request body for `PATCH /api/tickets/{id}`. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase", default)]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub assignee_id: Option<String>,
}

/// Request body for `POST /api/tickets/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub author_id: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suggestion_kind_wire_tags_are_lowercase() {
        let json = serde_json::to_string(&SuggestionKind::Assignee).unwrap();
        assert_eq!(json, "\"assignee\"");
        let kind: SuggestionKind = serde_json::from_str("\"priority\"").unwrap();
        assert_eq!(kind, SuggestionKind::Priority);
    }

    #[test]
    fn test_suggestion_serializes_camel_case() {
        let s = Suggestion {
            value: "Login bug".to_string(),
            kind: SuggestionKind::Title,
            match_start: 0,
            match_length: 5,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"matchStart\":0"), "got: {json}");
        assert!(json.contains("\"matchLength\":5"), "got: {json}");
        assert!(json.contains("\"kind\":\"title\""), "got: {json}");
    }

    #[test]
    fn test_no_highlight_span_round_trips() {
        let s = Suggestion {
            value: "Need help exporting reports".to_string(),
            kind: SuggestionKind::Title,
            match_start: -1,
            match_length: 0,
        };
        let back: Suggestion =
            serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Open".parse::<TicketStatus>().unwrap(), TicketStatus::Open);
        assert_eq!(
            " RESOLVED ".parse::<TicketStatus>().unwrap(),
            TicketStatus::Resolved
        );
        assert!("reopened".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_priority_parse_and_display_round_trip() {
        for p in TicketPriority::ALL {
            assert_eq!(p.to_string().parse::<TicketPriority>().unwrap(), *p);
        }
    }

    #[test]
    fn test_parse_error_names_the_label_kind() {
        let err = "XL".parse::<TicketPriority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority label: XL");
    }

    #[test]
    fn test_ticket_update_defaults_to_no_changes() {
        let update: TicketUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.status.is_none());
        assert!(update.assignee_id.is_none());
    }
}
