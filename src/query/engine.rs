use crate::error::{AppError, Result};
use crate::models::Ticket;
use crate::query::filter::TicketFilter;
use crate::query::sort::{sort_tickets, SortField, SortOrder};
use serde::Serialize;

/// Default page size when the caller does not specify one
pub const DEFAULT_LIMIT: usize = 200;

/// Maximum allowed page size
pub const MAX_LIMIT: usize = 500;

/// Validated query parameters: filter, two-level sort, pagination
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub filter: TicketFilter,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub then_by: Option<SortField>,
    pub then_order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            filter: TicketFilter::default(),
            sort_by: SortField::default(),
            order: SortOrder::default(),
            then_by: None,
            then_order: SortOrder::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Query result: one page of tickets plus the total count and every
/// parameter echoed back, so a caller can reconstruct the query that
/// produced the page.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub items: Vec<Ticket>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    #[serde(rename = "sortBy")]
    pub sort_by: SortField,
    pub order: SortOrder,
    #[serde(rename = "thenBy")]
    pub then_by: Option<SortField>,
    #[serde(rename = "thenOrder")]
    pub then_order: SortOrder,
    pub filters: TicketFilter,
}

impl QueryParams {
    /// Range-check the pagination parameters
    ///
    /// Enum-constrained parameters are already typed by the time they reach
    /// the engine; the boundary rejects out-of-set values with an error
    /// naming the parameter.
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(AppError::Validation(format!(
                "limit parameter must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(())
    }

    /// Run the query over a ticket collection
    ///
    /// Filters preserving relative order, counts the filtered set before
    /// pagination, applies the two-level stable sort, then slices the page.
    /// The input collection is untouched; sorting happens on a copy.
    pub fn run(&self, tickets: &[Ticket]) -> Result<Envelope> {
        self.validate()?;

        let mut results: Vec<Ticket> = tickets
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect();

        let total = results.len();

        // Secondary key first, primary key last. Both passes are stable, so
        // equal primary keys retain their secondary-sorted order.
        if let Some(then_by) = self.then_by {
            sort_tickets(&mut results, then_by, self.then_order);
        }
        sort_tickets(&mut results, self.sort_by, self.order);

        // Out-of-range offsets yield an empty page, never an error.
        let items: Vec<Ticket> = results
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect();

        Ok(Envelope {
            items,
            total,
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort_by,
            order: self.order,
            then_by: self.then_by,
            then_order: self.then_order,
            filters: self.filter.clone(),
        })
    }
}
