//! HTTP transport adapter.

mod http_client;

pub use http_client::HttpTransport;
