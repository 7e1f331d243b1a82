pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::{Envelope, QueryParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use filter::TicketFilter;
pub use sort::{SortField, SortOrder};
