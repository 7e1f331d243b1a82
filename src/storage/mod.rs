pub mod json_store;

pub use json_store::JsonFileStore;

use crate::error::Result;
use crate::models::Ticket;
use async_trait::async_trait;

/// Trait for ticket persistence operations
///
/// The store deals in whole collections: every load returns the full
/// collection and every save fully replaces the prior persisted state.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Load the full ticket collection; empty if no data exists yet
    async fn load(&self) -> Result<Vec<Ticket>>;

    /// Persist the full ticket collection, replacing prior state
    async fn save(&self, tickets: &[Ticket]) -> Result<()>;
}

/// Next id to assign: `max(existing ids) + 1`, or 1 for an empty
/// collection. Never `count + 1`, which would reuse ids after a delete.
pub fn next_id(tickets: &[Ticket]) -> u64 {
    tickets.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}
