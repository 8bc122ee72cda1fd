//! KPI snapshots over a batch of interactions, and period-over-period
//! deltas between two snapshots.

use crate::{
    interaction::{ComplaintSeverity, Interaction},
    types::{ratio, round_to},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COMPLAINT_RATE: &str = "complaint_rate";
pub const FCR_RATE: &str = "fcr_rate";
pub const AVG_HANDLING_TIME_MINUTES: &str = "avg_handling_time_minutes";
pub const ESCALATION_RATE: &str = "escalation_rate";

/// Rates are percentages rounded to one decimal; zero denominators yield 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub total_interactions: u64,
    pub total_complaints: u64,
    pub complaint_rate: f64,
    pub avg_handling_time_minutes: f64,
    pub fcr_rate: f64,
    pub escalation_rate: f64,
    pub transfer_rate: f64,
    pub digital_deflection_rate: f64,
    pub cost_per_call: f64,
    pub total_cost: f64,
    pub high_severity_count: u64,
}

impl MetricsSnapshot {
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        if interactions.is_empty() {
            return Self::default();
        }

        let total = interactions.len() as f64;
        let count = |pred: &dyn Fn(&Interaction) -> bool| {
            interactions.iter().filter(|&i| pred(i)).count() as u64
        };

        let complaints = count(&|i| i.is_complaint);
        let resolved = count(&|i| i.resolved_on_first_contact);
        let escalated = count(&|i| i.escalated);
        let transferred = count(&|i| i.transfer_count > 0);
        let digital_eligible = count(&|i| i.digital_eligible);
        let deflected = count(&|i| i.digital_eligible && i.deflection_success);
        let high_severity =
            count(&|i| i.is_complaint && i.severity() == ComplaintSeverity::High);

        let handling_seconds: f64 = interactions
            .iter()
            .map(|i| f64::from(i.handling_time_seconds))
            .sum();
        let total_cost: f64 = interactions.iter().map(|i| i.estimated_cost_dollars).sum();

        let pct = |n: u64, d: f64| round_to(ratio(n as f64, d) * 100.0, 1);

        Self {
            total_interactions: interactions.len() as u64,
            total_complaints: complaints,
            complaint_rate: pct(complaints, total),
            avg_handling_time_minutes: round_to(handling_seconds / total / 60.0, 2),
            fcr_rate: pct(resolved, total),
            escalation_rate: pct(escalated, total),
            transfer_rate: pct(transferred, total),
            digital_deflection_rate: pct(deflected, digital_eligible as f64),
            cost_per_call: round_to(total_cost / total, 2),
            total_cost: round_to(total_cost, 2),
            high_severity_count: high_severity,
        }
    }

    /// Named metric values, in a fixed order.
    pub fn values(&self) -> [(&'static str, f64); 11] {
        [
            ("total_interactions", self.total_interactions as f64),
            ("total_complaints", self.total_complaints as f64),
            (COMPLAINT_RATE, self.complaint_rate),
            (AVG_HANDLING_TIME_MINUTES, self.avg_handling_time_minutes),
            (FCR_RATE, self.fcr_rate),
            (ESCALATION_RATE, self.escalation_rate),
            ("transfer_rate", self.transfer_rate),
            ("digital_deflection_rate", self.digital_deflection_rate),
            ("cost_per_call", self.cost_per_call),
            ("total_cost", self.total_cost),
            ("high_severity_count", self.high_severity_count as f64),
        ]
    }
}

/// Metrics where a rising value is bad news.
const LOWER_IS_BETTER: &[&str] = &[
    COMPLAINT_RATE,
    ESCALATION_RATE,
    "transfer_rate",
    "cost_per_call",
    "total_cost",
    "high_severity_count",
    AVG_HANDLING_TIME_MINUTES,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub absolute: f64,
    pub percentage: f64,
    #[serde(default = "flat")]
    pub trend: Trend,
    #[serde(default)]
    pub is_positive: Option<bool>,
}

fn flat() -> Trend {
    Trend::Flat
}

impl MetricDelta {
    pub fn between(metric: &str, current: f64, previous: f64) -> Self {
        let absolute = round_to(current - previous, 2);
        let percentage = if previous == 0.0 {
            0.0
        } else {
            round_to((current - previous) / previous * 100.0, 1)
        };
        let trend = if absolute > 0.0 {
            Trend::Up
        } else if absolute < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        };
        let bad_if_higher = LOWER_IS_BETTER.contains(&metric);
        let is_positive = match trend {
            Trend::Flat => None,
            Trend::Up => Some(!bad_if_higher),
            Trend::Down => Some(bad_if_higher),
        };
        Self {
            absolute,
            percentage,
            trend,
            is_positive,
        }
    }
}

/// Per-metric deltas between a current and a prior period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    #[serde(default)]
    pub deltas: BTreeMap<String, MetricDelta>,
}

impl PeriodComparison {
    pub fn between(current: &MetricsSnapshot, previous: &MetricsSnapshot) -> Self {
        let deltas = current
            .values()
            .iter()
            .zip(previous.values().iter())
            .map(|((name, curr), (_, prev))| {
                (name.to_string(), MetricDelta::between(name, *curr, *prev))
            })
            .collect();
        Self { deltas }
    }

    pub fn has_deltas(&self) -> bool {
        !self.deltas.is_empty()
    }

    /// Absolute delta for `metric`, 0 when absent.
    pub fn absolute(&self, metric: &str) -> f64 {
        self.deltas.get(metric).map_or(0.0, |d| d.absolute)
    }

    /// Record a delta supplied directly by the host.
    pub fn with_delta(mut self, metric: &str, absolute: f64, percentage: f64) -> Self {
        let mut delta = MetricDelta::between(metric, absolute, 0.0);
        delta.percentage = percentage;
        self.deltas.insert(metric.to_string(), delta);
        self
    }
}
