//! Data Transfer Objects (DTOs) served by the server.
//!
//! Chat wire messages live in `tokei_shared::dto`; this module holds the
//! shapes of the inspection HTTP API and the conversions from domain models.

pub mod conversion;
pub mod http;
