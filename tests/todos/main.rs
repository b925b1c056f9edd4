//! Todo endpoint integration tests.
//!
//! - `dispatch`: the method handlers driven through `Service::dispatch_request`,
//!   no server involved.
//! - `failures`: a store that always fails, surfacing as 500 envelopes.
//! - `http`: full axum roundtrip with a reqwest client.

mod support;
#[cfg(feature = "http")]
mod http;
