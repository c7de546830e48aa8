//! IT Glue and Autotask API clients
//!
//! Both clients share the same plumbing: every HTTP call goes through the
//! retrying [`RequestExecutor`], collections are read with the walkers in
//! [`pagination`], and the sync logic sees them only through the
//! [`DirectoryApi`] / [`TicketingApi`] traits.

pub mod api;
pub mod directory;
pub mod executor;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod rate_limit;
pub mod ticketing;

pub use api::{DirectoryApi, TicketingApi};
pub use directory::DirectoryClient;
pub use executor::{RequestExecutor, RetryPolicy};
pub use parallel::fan_out;
pub use rate_limit::Throttle;
pub use ticketing::TicketingClient;
