//! Listing-service client abstraction.
//!
//! The pipeline talks to the external vacancy listing service only through
//! the `ListingClient` trait: one paged search endpoint and one detail
//! endpoint. `HttpListingClient` implements it over an HH-style REST API
//! with retry on transient failures.

mod http;
mod retry;
mod types;

pub use http::HttpListingClient;
pub use retry::RetryPolicy;
pub use types::{
    DetailPayload, ListingClient, ListingError, NamedRef, PageRequest, SalaryPayload, VacancyPage,
};
