//! Core types for the rotorwatch condition-monitoring system.
//!
//! This crate holds what every other rotorwatch crate depends on:
//!
//! - [`config`]: the immutable [`MonitorConfig`] built once at startup.
//! - [`error`]: the configuration and signal-processing error taxonomy.
//! - [`types`]: the typed records that flow between pipeline stages
//!   ([`SampleWindow`] → [`FeatureSet`] → [`Observation`] →
//!   [`AlertEvent`]).
//!
//! It contains no processing logic and no I/O.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{MonitorConfig, MonitorConfigBuilder, SinkKind};
pub use error::{ConfigError, SignalError};
pub use types::{
    AlertEvent, FeatureSet, MachineId, Observation, SampleWindow, TicketId, TicketPayload,
    SPECTRUM_SAMPLE_BINS,
};
