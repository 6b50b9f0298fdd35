use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_STATUS: &str = "open";

/// Body of `POST /tickets/from-sheet`.
///
/// Optional fields are sent as explicit `null` rather than being left out,
/// so the ticket API always receives the same set of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    pub property_id: i64,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub issue: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub maintenance_category: Option<String>,
    /// RFC 3339 timestamp in UTC.
    pub sla_due_at: Option<String>,
}

/// Identifier returned by the ticket API. It is usually numeric but is kept
/// opaque, since all we do with it is write it back into the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketId::Number(n) => write!(f, "{}", n),
            TicketId::Text(s) => f.write_str(s),
        }
    }
}

/// The part of a successful creation response we care about. Other keys are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTicket {
    pub id: TicketId,
}
