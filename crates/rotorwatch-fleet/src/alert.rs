//! Threshold-based alert decisions and maintenance ticket sinks.
//!
//! The decider compares the cycle's health/anomaly/RUL triple against
//! the configured thresholds and, on trigger, dispatches a structured
//! payload to a [`TicketSink`]. Ticket creation is best-effort: a sink
//! failure degrades to a locally synthesized ticket id and the cycle
//! carries on.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rotorwatch_core::{AlertEvent, MachineId, MonitorConfig, SinkKind, TicketId, TicketPayload};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors a ticket sink may report.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SinkError {
    /// The backend could not be reached or refused the ticket.
    #[error("Ticket sink unavailable: {message}")]
    Unavailable {
        /// What went wrong.
        message: String,
    },
}

/// Capability interface for maintenance ticket creation.
///
/// Implementations must be bounded-time from the pipeline's point of
/// view; retry and backoff are the backend's concern, not the caller's.
#[async_trait]
pub trait TicketSink: Send + Sync {
    /// Sink name for log context.
    fn name(&self) -> &str;

    /// Create a maintenance ticket and return its identifier.
    async fn create_ticket(
        &self,
        machine_id: &MachineId,
        anomaly_score: f64,
        rul: f64,
    ) -> Result<TicketId, SinkError>;
}

/// CMMS-facing sink used in deployments.
///
/// Stands in for the maintenance-system integration: it logs the
/// request under the configured server label and mints a `TCK-` ticket
/// id the way the backend would.
pub struct CmmsTicketSink {
    server_label: String,
    tool: String,
}

impl CmmsTicketSink {
    /// Create a sink carrying the configured CMMS identifiers.
    #[must_use]
    pub fn new(server_label: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            server_label: server_label.into(),
            tool: tool.into(),
        }
    }
}

#[async_trait]
impl TicketSink for CmmsTicketSink {
    fn name(&self) -> &str {
        "cmms"
    }

    async fn create_ticket(
        &self,
        machine_id: &MachineId,
        anomaly_score: f64,
        rul: f64,
    ) -> Result<TicketId, SinkError> {
        let ticket_id = TicketId::new(format!("TCK-{}-{}", machine_id, Utc::now().timestamp()));
        info!(
            machine = %machine_id,
            anomaly = anomaly_score,
            rul,
            ticket = %ticket_id,
            server_label = %self.server_label,
            tool = %self.tool,
            "Creating maintenance ticket"
        );
        Ok(ticket_id)
    }
}

/// Deterministic local stand-in for tests and offline runs.
pub struct LocalTicketSink;

#[async_trait]
impl TicketSink for LocalTicketSink {
    fn name(&self) -> &str {
        "local"
    }

    async fn create_ticket(
        &self,
        machine_id: &MachineId,
        _anomaly_score: f64,
        _rul: f64,
    ) -> Result<TicketId, SinkError> {
        Ok(TicketId::new(format!("STUB-TICKET-{machine_id}")))
    }
}

/// Build the sink selected by configuration.
#[must_use]
pub fn sink_for(config: &MonitorConfig) -> Arc<dyn TicketSink> {
    match config.sink {
        SinkKind::Cmms => Arc::new(CmmsTicketSink::new(
            config.cmms_server_label.clone(),
            config.cmms_tool_name.clone(),
        )),
        SinkKind::Local => Arc::new(LocalTicketSink),
    }
}

/// Evaluates trigger thresholds and dispatches alerts.
pub struct AlertDecider {
    z_threshold: f64,
    rul_warning: f64,
    server_label: String,
    tool: String,
    sink: Arc<dyn TicketSink>,
}

impl AlertDecider {
    /// Create a decider from configuration and a ticket sink.
    #[must_use]
    pub fn new(config: &MonitorConfig, sink: Arc<dyn TicketSink>) -> Self {
        Self {
            z_threshold: config.anomaly_z_threshold,
            rul_warning: config.rul_warning,
            server_label: config.cmms_server_label.clone(),
            tool: config.cmms_tool_name.clone(),
            sink,
        }
    }

    /// Evaluate the trigger conditions without side effects.
    ///
    /// Both thresholds are inclusive: `anomaly_score >= z_threshold` or
    /// `rul <= rul_warning`. When both hold, the anomaly reason is
    /// listed first.
    #[must_use]
    pub fn evaluate(
        &self,
        machine_id: &MachineId,
        health: f64,
        anomaly_score: f64,
        rul: f64,
    ) -> Option<AlertEvent> {
        let anomaly_triggered = anomaly_score >= self.z_threshold;
        let rul_triggered = rul <= self.rul_warning;
        if !(anomaly_triggered || rul_triggered) {
            return None;
        }

        let mut trigger_reasons = Vec::with_capacity(2);
        if anomaly_triggered {
            trigger_reasons.push(format!(
                "anomaly_score={anomaly_score:.2} >= {}",
                self.z_threshold
            ));
        }
        if rul_triggered {
            trigger_reasons.push(format!("RUL={rul:.2} <= {}", self.rul_warning));
        }

        Some(AlertEvent {
            id: Uuid::new_v4(),
            machine_id: machine_id.clone(),
            health,
            anomaly_score,
            rul,
            trigger_reasons,
            payload: TicketPayload {
                server_label: self.server_label.clone(),
                tool: self.tool.clone(),
                machine_id: machine_id.clone(),
                health,
                anomaly_score,
                rul,
            },
        })
    }

    /// Evaluate and, on trigger, create a maintenance ticket.
    ///
    /// A sink failure is degraded to a locally synthesized `LOCAL-`
    /// ticket id so the pipeline never blocks or fails on ticketing.
    /// The ticket id is logged and returned but not stored anywhere.
    pub async fn handle(
        &self,
        machine_id: &MachineId,
        health: f64,
        anomaly_score: f64,
        rul: f64,
    ) -> Option<(AlertEvent, TicketId)> {
        let event = self.evaluate(machine_id, health, anomaly_score, rul)?;

        warn!(
            machine = %machine_id,
            alert = %event.id,
            reasons = ?event.trigger_reasons,
            "Maintenance alert triggered"
        );
        match serde_json::to_string(&event.payload) {
            Ok(json) => debug!(machine = %machine_id, payload = %json, "Ticket payload"),
            Err(err) => warn!(machine = %machine_id, error = %err, "Failed to encode payload"),
        }

        let ticket_id = match self.sink.create_ticket(machine_id, anomaly_score, rul).await {
            Ok(id) => id,
            Err(err) => {
                let fallback =
                    TicketId::new(format!("LOCAL-{}-{}", machine_id, Utc::now().timestamp()));
                warn!(
                    machine = %machine_id,
                    sink = self.sink.name(),
                    error = %err,
                    fallback = %fallback,
                    "Ticket sink failed; using local placeholder id"
                );
                fallback
            }
        };

        info!(machine = %machine_id, ticket = %ticket_id, "Maintenance ticket recorded");
        Some((event, ticket_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    #[async_trait]
    impl TicketSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn create_ticket(
            &self,
            _machine_id: &MachineId,
            _anomaly_score: f64,
            _rul: f64,
        ) -> Result<TicketId, SinkError> {
            Err(SinkError::Unavailable {
                message: "connection refused".into(),
            })
        }
    }

    fn decider_with(sink: Arc<dyn TicketSink>) -> AlertDecider {
        AlertDecider::new(&MonitorConfig::default(), sink)
    }

    fn machine() -> MachineId {
        MachineId::new("EQP-001")
    }

    #[test]
    fn no_alert_below_both_thresholds() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        assert!(decider.evaluate(&machine(), 0.5, 2.99, 50.01).is_none());
    }

    #[test]
    fn anomaly_boundary_is_inclusive() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        let event = decider.evaluate(&machine(), 0.5, 3.0, 1000.0).unwrap();
        assert_eq!(event.trigger_reasons.len(), 1);
        assert!(event.trigger_reasons[0].starts_with("anomaly_score="));
    }

    #[test]
    fn rul_boundary_is_inclusive() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        let event = decider.evaluate(&machine(), 0.5, 0.1, 50.0).unwrap();
        assert_eq!(event.trigger_reasons.len(), 1);
        assert!(event.trigger_reasons[0].starts_with("RUL="));
    }

    #[test]
    fn anomaly_reason_comes_first_when_both_trigger() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        let event = decider.evaluate(&machine(), 0.1, 4.0, 10.0).unwrap();
        assert_eq!(event.trigger_reasons.len(), 2);
        assert!(event.trigger_reasons[0].starts_with("anomaly_score="));
        assert!(event.trigger_reasons[1].starts_with("RUL="));
    }

    #[test]
    fn payload_carries_scores_and_machine() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        let event = decider.evaluate(&machine(), 0.1, 4.0, 10.0).unwrap();
        assert_eq!(event.payload.machine_id, machine());
        assert!((event.payload.anomaly_score - 4.0).abs() < f64::EPSILON);
        assert!((event.payload.rul - 10.0).abs() < f64::EPSILON);
        assert_eq!(event.payload.server_label, "maintenance_cmms");
    }

    #[tokio::test]
    async fn local_sink_is_deterministic() {
        let decider = decider_with(Arc::new(LocalTicketSink));
        let (_, ticket) = decider.handle(&machine(), 0.5, 3.5, 1000.0).await.unwrap();
        assert_eq!(ticket.as_str(), "STUB-TICKET-EQP-001");
    }

    #[tokio::test]
    async fn cmms_sink_mints_tck_ids() {
        let decider = decider_with(Arc::new(CmmsTicketSink::new(
            "maintenance_cmms",
            "create_maintenance_ticket",
        )));
        let (_, ticket) = decider.handle(&machine(), 0.5, 3.5, 1000.0).await.unwrap();
        assert!(ticket.as_str().starts_with("TCK-EQP-001-"));
    }

    #[tokio::test]
    async fn sink_failure_degrades_to_local_placeholder() {
        let decider = decider_with(Arc::new(FailingSink));
        let (event, ticket) = decider.handle(&machine(), 0.5, 3.5, 1000.0).await.unwrap();
        assert!(ticket.as_str().starts_with("LOCAL-EQP-001-"));
        assert!(!event.trigger_reasons.is_empty());
    }

    #[tokio::test]
    async fn handle_returns_none_when_healthy() {
        let decider = decider_with(Arc::new(FailingSink));
        assert!(decider.handle(&machine(), 0.5, 0.5, 1000.0).await.is_none());
    }

    #[test]
    fn sink_for_respects_config() {
        let mut config = MonitorConfig::default();
        config.sink = SinkKind::Local;
        assert_eq!(sink_for(&config).name(), "local");
        config.sink = SinkKind::Cmms;
        assert_eq!(sink_for(&config).name(), "cmms");
    }
}
