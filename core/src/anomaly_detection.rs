//! Threshold anomaly detection over a metrics snapshot.
//!
//! Check order is fixed: complaint rate, FCR, handling time, escalation.
//! Every comparison is strict; a value sitting exactly on its threshold
//! does not fire.

use crate::{config::InsightConfig, metrics::MetricsSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    HighComplaintRate,
    LowFcr,
    HighAht,
    HighEscalation,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighComplaintRate => "high_complaint_rate",
            Self::LowFcr            => "low_fcr",
            Self::HighAht           => "high_aht",
            Self::HighEscalation    => "high_escalation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
    pub message: String,
}

pub struct AnomalyDetector {
    config: Arc<InsightConfig>,
}

impl AnomalyDetector {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self { config }
    }

    pub fn detect(&self, metrics: &MetricsSnapshot) -> Vec<Anomaly> {
        let t = &self.config.thresholds;
        let mut anomalies = Vec::new();

        if metrics.complaint_rate > t.complaint_rate_high {
            anomalies.push(Anomaly {
                kind: AnomalyKind::HighComplaintRate,
                severity: AnomalySeverity::High,
                message: format!(
                    "Complaint rate ({:.1}%) exceeds threshold ({:.1}%)",
                    metrics.complaint_rate, t.complaint_rate_high
                ),
            });
        }

        if metrics.fcr_rate < t.fcr_rate_low {
            anomalies.push(Anomaly {
                kind: AnomalyKind::LowFcr,
                severity: AnomalySeverity::Medium,
                message: format!(
                    "FCR rate ({:.1}%) below target ({:.1}%)",
                    metrics.fcr_rate, t.fcr_rate_low
                ),
            });
        }

        if metrics.avg_handling_time_minutes > t.aht_high {
            anomalies.push(Anomaly {
                kind: AnomalyKind::HighAht,
                severity: AnomalySeverity::Medium,
                message: format!(
                    "AHT ({:.1} min) exceeds benchmark ({:.1} min)",
                    metrics.avg_handling_time_minutes, t.aht_high
                ),
            });
        }

        if metrics.escalation_rate > t.escalation_high {
            anomalies.push(Anomaly {
                kind: AnomalyKind::HighEscalation,
                severity: AnomalySeverity::Medium,
                message: format!(
                    "Escalation rate ({:.1}%) above normal ({:.1}%)",
                    metrics.escalation_rate, t.escalation_high
                ),
            });
        }

        for anomaly in &anomalies {
            log::warn!(
                "anomaly: {} ({:?}) - {}",
                anomaly.kind.as_str(),
                anomaly.severity,
                anomaly.message,
            );
        }

        anomalies
    }
}

/// True when `anomalies` contains one of `kind`.
pub fn has_anomaly(anomalies: &[Anomaly], kind: AnomalyKind) -> bool {
    anomalies.iter().any(|a| a.kind == kind)
}
