//! In-memory configuration store for quotaserve.
//!
//! [`MemoryConfigStore`] implements the `Administrable` capability consumed
//! by the admin HTTP layer: the whole configuration graph lives behind a
//! single reader-writer lock, reads return atomic snapshots, and every
//! successful mutation bumps the configuration version.

pub mod config;
pub mod store;

pub use config::ServerConfig;
pub use store::MemoryConfigStore;
