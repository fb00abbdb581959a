//! Upload transport implementations for Courier.

pub mod http;

pub use http::HttpTransport;
