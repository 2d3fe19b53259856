//! Media server REST API: wire models and the backend seam.

pub mod backend;
pub mod models;

pub use {
    backend::{Backend, HttpBackend, stream_path},
    models::{
        ConfigureResponse, DeleteResponse, Document, HealthStatus, Network, NetworksResponse,
        Picture, ServerConfig, Track, WifiCredentials,
    },
};
