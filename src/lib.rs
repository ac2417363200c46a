pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod page;
pub mod routes;
pub mod view;

use client::HttpFileService;

/// Shared state of the gateway service.
pub struct GatewayState {
    pub backend: HttpFileService,
}
