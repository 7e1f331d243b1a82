use crate::models::{Priority, Status, Ticket};
use serde::Serialize;

/// Filter criteria for querying tickets
///
/// The filtered set is the conjunction of every present criterion; absent
/// criteria impose no constraint. Status and priority arrive here already
/// enum-typed, so out-of-set values never reach the predicate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl TicketFilter {
    /// Test a single ticket against every present criterion
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if ticket.priority != priority {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            // Exact membership, case-insensitive. Not a substring test.
            let needle = tag.trim().to_lowercase();
            if !ticket.normalized_tags().iter().any(|t| *t == needle) {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            // Whitespace-only search imposes no constraint.
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !ticket.contains_text(&needle) {
                return false;
            }
        }

        true
    }
}
