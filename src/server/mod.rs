//! HTTP server layer

pub mod builder;
pub mod routes;
pub mod server;
pub mod sse;
pub mod state;

pub use server::HttpServer;
