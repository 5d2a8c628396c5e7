pub mod api;
pub mod client;
pub mod error;
pub mod http;
#[cfg(test)]
pub mod mock;

pub use api::MessageApi;
pub use client::SyncClient;
pub use http::HttpMessageApi;
