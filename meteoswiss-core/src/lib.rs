//! Core library for the `meteoswiss` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The blocking transport seam used to reach the MeteoSwiss API
//! - Schema validation and extraction of the `plzDetail` payload
//! - Shared domain models (report, forecast, graph series)
//!
//! It is used by `meteoswiss-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod transport;
pub mod validate;

pub use client::MeteoSwissClient;
pub use config::Config;
pub use error::MeteoSwissError;
pub use model::{CurrentWeather, ForecastEntry, WeatherGraph, WeatherReport};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub(crate) mod testdata;
