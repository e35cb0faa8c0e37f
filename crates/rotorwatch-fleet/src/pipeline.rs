//! Per-machine monitoring pipeline and fleet orchestration.
//!
//! One worker task runs the full signal-to-decision pipeline for each
//! machine, independently of the others; the shared [`HistoryStore`] is
//! the only cross-worker state. Within a worker, cycles run strictly
//! sequentially; a failed cycle is logged with machine context and the
//! loop continues, so a single bad window never takes a machine - let
//! alone the fleet - offline.

use std::sync::Arc;
use std::time::Duration;

use rotorwatch_core::{MachineId, MonitorConfig, Observation, SignalError, TicketId};
use rotorwatch_signal::FeatureExtractor;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::alert::{sink_for, AlertDecider, TicketSink};
use crate::anomaly::AnomalyScorer;
use crate::rul::RulEstimator;
use crate::source::{SimulatedSensor, WindowSource};
use crate::store::HistoryStore;

/// Typed failure of a single monitoring cycle.
///
/// The worker loop inspects and logs these, then always proceeds to the
/// next cycle.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CycleError {
    /// Feature extraction rejected the window.
    #[error("Signal processing failed: {0}")]
    Signal(#[from] SignalError),
}

/// Outcome of one successful monitoring cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Machine the cycle ran for.
    pub machine_id: MachineId,
    /// Zero-based cycle index.
    pub cycle: u32,
    /// Health index computed this cycle.
    pub health: f64,
    /// Anomaly score computed this cycle.
    pub anomaly_score: f64,
    /// RUL estimate computed this cycle.
    pub rul: f64,
    /// Ticket created if an alert fired.
    pub ticket: Option<TicketId>,
}

/// The signal-to-decision pipeline for one machine.
pub struct MachinePipeline<S: WindowSource> {
    machine_id: MachineId,
    source: S,
    extractor: FeatureExtractor,
    scorer: AnomalyScorer,
    estimator: RulEstimator,
    decider: AlertDecider,
    store: Arc<HistoryStore>,
}

impl<S: WindowSource> MachinePipeline<S> {
    /// Assemble a pipeline from configuration, shared store, sink, and
    /// an acquisition source.
    #[must_use]
    pub fn new(
        machine_id: MachineId,
        config: &MonitorConfig,
        store: Arc<HistoryStore>,
        sink: Arc<dyn TicketSink>,
        source: S,
    ) -> Self {
        Self {
            machine_id,
            source,
            extractor: FeatureExtractor::new(config),
            scorer: AnomalyScorer::from_config(config),
            estimator: RulEstimator::from_config(config),
            decider: AlertDecider::new(config, sink),
            store,
        }
    }

    /// Machine this pipeline monitors.
    #[must_use]
    pub fn machine_id(&self) -> &MachineId {
        &self.machine_id
    }

    /// Run one cycle: acquire, extract, score, estimate, persist,
    /// decide.
    ///
    /// The RUL estimate reads the history as it stood *before* this
    /// cycle's observation is stored, so the first cycle of a fresh
    /// machine uses the brand-new default.
    pub async fn run_cycle(&mut self, cycle: u32) -> Result<CycleReport, CycleError> {
        let window = self.source.acquire();
        let features = self.extractor.extract(&window)?;
        let health = features.health_index;

        let history = self.store.get_history(&self.machine_id);
        let anomaly_score = self.scorer.score(health);
        let rul = self.estimator.estimate(&history);

        self.store.store(
            &self.machine_id,
            Observation {
                health,
                anomaly_score,
                rul,
                timestamp: window.captured_at,
                features,
            },
        );

        let ticket = self
            .decider
            .handle(&self.machine_id, health, anomaly_score, rul)
            .await
            .map(|(_, ticket_id)| ticket_id);

        debug!(
            machine = %self.machine_id,
            cycle,
            health,
            anomaly = anomaly_score,
            rul,
            "Cycle complete"
        );

        Ok(CycleReport {
            machine_id: self.machine_id.clone(),
            cycle,
            health,
            anomaly_score,
            rul,
            ticket,
        })
    }

    /// Run `cycles` cycles with `delay` between them.
    ///
    /// Cycle failures are logged and skipped; the loop never aborts.
    pub async fn run(&mut self, cycles: u32, delay: Duration) {
        info!(machine = %self.machine_id, cycles, "Starting monitoring pipeline");
        for cycle in 0..cycles {
            if let Err(err) = self.run_cycle(cycle).await {
                warn!(
                    machine = %self.machine_id,
                    cycle,
                    error = %err,
                    "Cycle failed; continuing"
                );
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        info!(machine = %self.machine_id, "Monitoring pipeline completed");
    }
}

/// Owns the shared store and runs one pipeline worker per machine.
pub struct FleetMonitor {
    config: MonitorConfig,
    store: Arc<HistoryStore>,
    sink: Arc<dyn TicketSink>,
}

impl FleetMonitor {
    /// Build the fleet: shared store, configured sink, and the machine
    /// roster registered up front.
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        let store = Arc::new(HistoryStore::new(config.history_capacity));
        for machine_id in &config.machines {
            store.ensure_machine(machine_id);
        }
        let sink = sink_for(&config);
        Self {
            config,
            store,
            sink,
        }
    }

    /// Handle to the shared history store.
    #[must_use]
    pub fn store(&self) -> Arc<HistoryStore> {
        Arc::clone(&self.store)
    }

    /// Run every machine's pipeline to completion.
    ///
    /// Workers are independent tokio tasks; one aborting (panic or
    /// cancellation) is reported and does not stop the others. Returns
    /// once all workers have finished.
    pub async fn run(&self) {
        info!(
            machines = self.config.machines.len(),
            cycles = self.config.cycles_per_run,
            "Starting fleet monitoring run"
        );

        let mut workers = JoinSet::new();
        for (index, machine_id) in self.config.machines.iter().enumerate() {
            let seed = self.config.rng_seed.wrapping_add(index as u64);
            let source = SimulatedSensor::new(machine_id.clone(), &self.config, seed);
            let mut pipeline = MachinePipeline::new(
                machine_id.clone(),
                &self.config,
                Arc::clone(&self.store),
                Arc::clone(&self.sink),
                source,
            );
            let cycles = self.config.cycles_per_run;
            let delay = self.config.cycle_delay;
            workers.spawn(async move {
                pipeline.run(cycles, delay).await;
                pipeline.machine_id().clone()
            });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(machine_id) => info!(machine = %machine_id, "Worker finished"),
                Err(err) => error!(error = %err, "Worker aborted"),
            }
        }

        info!("All machine monitoring pipelines have finished");
    }
}
