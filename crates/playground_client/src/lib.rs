//! HTTP client and configuration for the hosted connector API.

mod config;
mod dto;
mod http;

pub use config::{
    DEFAULT_API_URL, DEFAULT_LIMIT, DEMO_PUBLIC_KEY, DEMO_SECRET_KEY, PlaygroundConfig,
    PlaygroundConfigBuilder,
};
pub use http::HttpConnectorApi;
