//! Core gateway logic: normalized types, routing, provider adapters, facade

pub mod gateway;
pub mod models;
pub mod providers;
pub mod router;
pub mod types;

pub use gateway::AiGateway;
pub use router::{route, ProviderKind};
