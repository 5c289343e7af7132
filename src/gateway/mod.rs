//! Gateway assembly and request orchestration

mod builder;
mod traffic;

pub use builder::{Vegvisir, VegvisirBuilder};
pub use traffic::{CacheStatus, STALE_WARNING, Served, TrafficGateway};
