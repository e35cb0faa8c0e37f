//! Fleet monitoring for rotorwatch.
//!
//! This crate ties the signal chain into a running system:
//!
//! 1. **Acquisition** ([`source`]): windows arrive through the
//!    [`WindowSource`] trait; the shipped implementation is the seeded
//!    [`SimulatedSensor`].
//! 2. **History** ([`store`]): the [`HistoryStore`] keeps a bounded
//!    FIFO ring of observations per machine behind one coarse lock -
//!    the only state shared between workers.
//! 3. **Scoring** ([`anomaly`], [`rul`]): z-score deviation from the
//!    calibrated baseline and the linear-degradation RUL estimate.
//! 4. **Alerting** ([`alert`]): inclusive-threshold decisions
//!    dispatched to a [`TicketSink`], with local degradation when the
//!    sink fails.
//! 5. **Orchestration** ([`pipeline`]): one [`MachinePipeline`] worker
//!    per machine, driven by the [`FleetMonitor`].

#![warn(missing_docs)]

pub mod alert;
pub mod anomaly;
pub mod pipeline;
pub mod rul;
pub mod source;
pub mod store;

pub use alert::{sink_for, AlertDecider, CmmsTicketSink, LocalTicketSink, SinkError, TicketSink};
pub use anomaly::AnomalyScorer;
pub use pipeline::{CycleError, CycleReport, FleetMonitor, MachinePipeline};
pub use rul::RulEstimator;
pub use source::{SimulatedSensor, WindowSource};
pub use store::{HistorySnapshot, HistoryStore};
