use crate::models::Ticket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use strum::{Display, EnumString};

/// Fields a query may sort by
///
/// Wire names match the query parameters exactly (`createdAt`, not
/// `created_at`). Unknown field names are rejected at the query boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    CreatedAt,
    Priority,
    Status,
    Title,
}

/// Sort direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Comparable key extracted from a ticket for one sort field
///
/// Keys extracted for a given field always share a variant, so the derived
/// cross-variant ordering is never exercised.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Id(u64),
    Date(NaiveDate),
    Weight(u8),
    Text(String),
}

impl SortField {
    /// Extract the comparable key for this field from a ticket
    ///
    /// Field-specific semantics: numeric id, case-insensitive title,
    /// parsed date with an epoch fallback, and business-ordered weights
    /// for priority and status.
    pub fn key(&self, ticket: &Ticket) -> SortKey {
        match self {
            SortField::Id => SortKey::Id(ticket.id),
            SortField::CreatedAt => SortKey::Date(ticket.created_date()),
            SortField::Priority => SortKey::Weight(ticket.priority.weight()),
            SortField::Status => SortKey::Weight(ticket.status.weight()),
            SortField::Title => SortKey::Text(ticket.title.to_lowercase()),
        }
    }
}

/// Stable in-place sort by one field
///
/// Descending order reverses the key comparison only; elements with equal
/// keys keep their relative order in both directions.
pub fn sort_tickets(tickets: &mut [Ticket], field: SortField, order: SortOrder) {
    match order {
        SortOrder::Asc => tickets.sort_by_key(|t| field.key(t)),
        SortOrder::Desc => tickets.sort_by_key(|t| Reverse(field.key(t))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Status};

    fn ticket(id: u64, priority: Priority, created_at: &str) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {}", id),
            description: "Description".to_string(),
            priority,
            status: Status::Open,
            tags: Vec::new(),
            created_at: created_at.to_string(),
        }
    }

    fn ids(tickets: &[Ticket]) -> Vec<u64> {
        tickets.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_sort_field_wire_names() {
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert_eq!("id".parse::<SortField>().unwrap(), SortField::Id);
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert!("updatedAt".parse::<SortField>().is_err());

        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("ascending".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_priority_sorts_by_business_weight() {
        let mut tickets = vec![
            ticket(1, Priority::Low, "2024-01-01"),
            ticket(2, Priority::High, "2024-01-01"),
            ticket(3, Priority::Medium, "2024-01-01"),
        ];

        sort_tickets(&mut tickets, SortField::Priority, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec![1, 3, 2]);

        sort_tickets(&mut tickets, SortField::Priority, SortOrder::Desc);
        assert_eq!(ids(&tickets), vec![2, 3, 1]);
    }

    #[test]
    fn test_title_sort_is_case_insensitive() {
        let mut tickets = vec![
            ticket(1, Priority::Low, "2024-01-01"),
            ticket(2, Priority::Low, "2024-01-01"),
            ticket(3, Priority::Low, "2024-01-01"),
        ];
        tickets[0].title = "zebra".to_string();
        tickets[1].title = "Apple".to_string();
        tickets[2].title = "mango".to_string();

        sort_tickets(&mut tickets, SortField::Title, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec![2, 3, 1]);
    }

    #[test]
    fn test_unparsable_dates_sort_first_ascending() {
        let mut tickets = vec![
            ticket(1, Priority::Low, "2024-06-01"),
            ticket(2, Priority::Low, "garbage"),
            ticket(3, Priority::Low, "2023-12-31"),
        ];

        sort_tickets(&mut tickets, SortField::CreatedAt, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec![2, 3, 1]);
    }

    #[test]
    fn test_descending_sort_preserves_order_of_ties() {
        let mut tickets = vec![
            ticket(10, Priority::Medium, "2024-01-01"),
            ticket(20, Priority::Medium, "2024-01-01"),
            ticket(30, Priority::Low, "2024-01-01"),
        ];

        sort_tickets(&mut tickets, SortField::Priority, SortOrder::Desc);
        // 10 and 20 tie on priority and keep their relative order.
        assert_eq!(ids(&tickets), vec![10, 20, 30]);
    }
}
