//! I/O side of luckyball: fetching and caching the historical draw file,
//! normalizing it into draw records, and serving tickets over HTTP.

pub mod config;
pub mod fetch;
pub mod history;
pub mod server;
pub mod service;

pub use config::AppConfig;
pub use fetch::CacheStatus;
pub use server::{HttpServer, HttpServerConfig};
