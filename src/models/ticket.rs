use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 120;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum number of tags per ticket
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag, in characters
pub const MAX_TAG_LEN: usize = 30;

/// A ticket record as persisted in the collection
///
/// Field names match the on-disk JSON layout exactly, including the
/// `createdAt` spelling and the literal enum strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier, assigned by the store
    pub id: u64,

    /// Human-readable title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Priority level
    pub priority: Priority,

    /// Workflow status
    pub status: Status,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation date, `YYYY-MM-DD`
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Ticket {
    /// Parse the creation date, degrading to the epoch when the stored
    /// value is missing or unparsable. Never fails.
    pub fn created_date(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d").unwrap_or_default()
    }

    /// Stored tags trimmed and lower-cased, empty entries dropped
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Case-insensitive substring match against title, description, or
    /// any tag. The needle must already be lower-cased.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.normalized_tags().iter().any(|t| t.contains(needle))
    }
}

/// Ticket priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ordinal weight for sorting. Business order, not alphabetical:
    /// alphabetical would put High before Low relative to severity.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// Ticket workflow status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In progress")]
    #[strum(serialize = "In progress")]
    InProgress,
    Closed,
}

impl Status {
    /// Ordinal weight for sorting, by workflow stage
    pub fn weight(&self) -> u8 {
        match self {
            Status::Open => 1,
            Status::InProgress => 2,
            Status::Closed => 3,
        }
    }
}

/// Request payload for creating a ticket
///
/// `id` and `createdAt` are never client-supplied; they are assigned by
/// the mutation path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicket {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateTicket {
    /// Normalize into a stored ticket with the given id and creation date.
    ///
    /// Trims title/description (rejecting values that are empty after the
    /// trim) and cleans the tag list.
    pub fn into_ticket(self, id: u64, created_at: NaiveDate) -> Result<Ticket> {
        Ok(Ticket {
            id,
            title: clean_text("title", &self.title, MAX_TITLE_LEN)?,
            description: clean_text("description", &self.description, MAX_DESCRIPTION_LEN)?,
            priority: self.priority,
            status: self.status,
            tags: clean_tags(self.tags)?,
            created_at: created_at.format("%Y-%m-%d").to_string(),
        })
    }
}

/// Sparse update payload for patching a ticket
///
/// A field present in the payload is applied; an absent field keeps its
/// prior value. `id` and `createdAt` are immutable and not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub tags: Option<Vec<String>>,
}

impl TicketPatch {
    /// True when the payload carries no recognized fields
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }

    /// Merge the present fields into an existing ticket
    pub fn apply(self, ticket: &mut Ticket) -> Result<()> {
        if let Some(title) = self.title {
            ticket.title = clean_text("title", &title, MAX_TITLE_LEN)?;
        }
        if let Some(description) = self.description {
            ticket.description = clean_text("description", &description, MAX_DESCRIPTION_LEN)?;
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(tags) = self.tags {
            ticket.tags = clean_tags(tags)?;
        }
        Ok(())
    }
}

/// Trim a text field, rejecting values that are empty or too long
fn clean_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must not exceed {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim tags, drop empty entries, enforce count and per-tag length limits
fn clean_tags(tags: Vec<String>) -> Result<Vec<String>> {
    if tags.len() > MAX_TAGS {
        return Err(AppError::Validation(format!(
            "at most {} tags are allowed",
            MAX_TAGS
        )));
    }

    let mut cleaned = Vec::with_capacity(tags.len());
    for tag in &tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() > MAX_TAG_LEN {
            return Err(AppError::Validation(format!(
                "a tag must not exceed {} characters",
                MAX_TAG_LEN
            )));
        }
        cleaned.push(trimmed.to_string());
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: u64) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {}", id),
            description: "Description".to_string(),
            priority: Priority::Low,
            status: Status::Open,
            tags: Vec::new(),
            created_at: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn test_status_serialization_uses_literal_strings() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Open).unwrap(), "\"Open\"");

        let parsed: Status = serde_json::from_str("\"In progress\"").unwrap();
        assert_eq!(parsed, Status::InProgress);
        assert!(serde_json::from_str::<Status>("\"in progress\"").is_err());
    }

    #[test]
    fn test_priority_rejects_unknown_values() {
        assert!(serde_json::from_str::<Priority>("\"Urgent\"").is_err());
        assert_eq!(
            serde_json::from_str::<Priority>("\"High\"").unwrap(),
            Priority::High
        );
    }

    #[test]
    fn test_enum_weights_follow_business_order() {
        assert!(Priority::Low.weight() < Priority::Medium.weight());
        assert!(Priority::Medium.weight() < Priority::High.weight());
        assert!(Status::Open.weight() < Status::InProgress.weight());
        assert!(Status::InProgress.weight() < Status::Closed.weight());
    }

    #[test]
    fn test_created_date_falls_back_to_epoch() {
        let mut t = ticket(1);
        assert_eq!(
            t.created_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );

        t.created_at = "not-a-date".to_string();
        assert_eq!(t.created_date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());

        t.created_at = String::new();
        assert_eq!(t.created_date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn test_contains_text_covers_title_description_and_tags() {
        let mut t = ticket(1);
        t.title = "App Crash".to_string();
        t.tags = vec!["crash-report".to_string()];

        assert!(t.contains_text("crash"));
        assert!(t.contains_text("description"));
        assert!(!t.contains_text("network"));
    }

    #[test]
    fn test_create_ticket_trims_and_assigns() {
        let payload = CreateTicket {
            title: "  Broken login  ".to_string(),
            description: " Cannot sign in ".to_string(),
            priority: Priority::High,
            status: Status::default(),
            tags: vec!["  auth ".to_string(), "   ".to_string()],
        };

        let created = payload
            .into_ticket(7, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap();
        assert_eq!(created.id, 7);
        assert_eq!(created.title, "Broken login");
        assert_eq!(created.description, "Cannot sign in");
        assert_eq!(created.status, Status::Open);
        assert_eq!(created.tags, vec!["auth".to_string()]);
        assert_eq!(created.created_at, "2024-03-01");
    }

    #[test]
    fn test_create_ticket_rejects_blank_title() {
        let payload = CreateTicket {
            title: "   ".to_string(),
            description: "desc".to_string(),
            priority: Priority::default(),
            status: Status::default(),
            tags: Vec::new(),
        };

        let err = payload
            .into_ticket(1, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut t = ticket(3);
        t.tags = vec!["bug".to_string()];

        let patch = TicketPatch {
            status: Some(Status::Closed),
            ..Default::default()
        };
        patch.apply(&mut t).unwrap();

        assert_eq!(t.status, Status::Closed);
        assert_eq!(t.title, "Ticket 3");
        assert_eq!(t.description, "Description");
        assert_eq!(t.priority, Priority::Low);
        assert_eq!(t.tags, vec!["bug".to_string()]);
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let mut t = ticket(1);
        let patch = TicketPatch {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            patch.apply(&mut t),
            Err(AppError::Validation(_))
        ));
        assert_eq!(t.title, "Ticket 1");
    }

    #[test]
    fn test_empty_patch_detection() {
        assert!(TicketPatch::default().is_empty());
        assert!(!TicketPatch {
            status: Some(Status::Open),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_clean_tags_limits() {
        let too_many: Vec<String> = (0..=MAX_TAGS).map(|i| format!("tag{}", i)).collect();
        assert!(matches!(
            clean_tags(too_many),
            Err(AppError::Validation(_))
        ));

        let too_long = vec!["x".repeat(MAX_TAG_LEN + 1)];
        assert!(matches!(clean_tags(too_long), Err(AppError::Validation(_))));
    }
}
