//! Admin HTTP layer for quotaserve.
//!
//! This crate is a thin dispatcher over the configuration model: it parses
//! resource addresses out of request paths, decodes JSON bodies with the
//! config codecs, and delegates every read and mutation to an externally
//! supplied store implementing [`Administrable`]. The dispatcher holds no
//! mutable state of its own; each request is an independent task and all
//! shared state lives behind the store's own synchronization.

pub mod body;
pub mod dispatch;
pub mod error;
pub mod response;
pub mod router;
pub mod service;
pub mod ui;

pub use dispatch::{Administrable, StoreError};
pub use error::AdminError;
pub use service::{AdminHttpConfig, AdminHttpService};
