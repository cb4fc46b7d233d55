//! Wire-level request and query models plus constrained value objects.

pub mod query;
pub mod request;
pub mod types;
