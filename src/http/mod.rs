//! HTTP download client with a bounded single attempt and status reporting.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{describe_status, error_chain};
