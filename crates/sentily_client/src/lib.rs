//! Remote data fetcher for the Sentily dashboard backend.
//!
//! [`ApiClient`] performs single GET requests; [`Resource`] wraps one
//! endpoint in a loading/failed/ready state with explicit refetch.

pub mod client;
pub mod resource;

pub use client::ApiClient;
pub use resource::{FetchState, RequestTicket, Resource};
