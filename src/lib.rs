//! Ticket-tracking backend with a flat-file JSON store.
//!
//! The core is the query engine in [`query`]: multi-criteria filtering,
//! a stable two-level sort with business-ordered tie-break weights, and
//! offset/limit pagination with a consistent result envelope. The HTTP
//! surface in [`api`] and the JSON file store in [`storage`] are the
//! plumbing around it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;
