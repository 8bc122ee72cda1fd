//! Narrative assembler: turns metrics, ranked root causes, anomalies and
//! an optional period comparison into a structured executive summary plus
//! one rendered text block.
//!
//! Which sentences appear is decided here from the numbers alone. The
//! `PhraseSource` only picks between wordings of an already-chosen
//! sentence.

use crate::{
    action_prioritizer::{ActionPrioritizer, PrioritizedAction},
    anomaly_detection::Anomaly,
    config::InsightConfig,
    metrics::{
        MetricsSnapshot, PeriodComparison, AVG_HANDLING_TIME_MINUTES, COMPLAINT_RATE,
        ESCALATION_RATE, FCR_RATE,
    },
    phrases,
    rng::PhraseSource,
    root_cause_analysis::{AggregatedRootCause, Concentration},
    types::FilterContext,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected period and filters.";
pub const SUMMARY_CONFIDENCE: f64 = 0.85;

/// Complaint-rate drop (percentage points) below which the trend reads as "down".
const TREND_DOWN_DELTA: f64 = -2.0;
const FCR_GAIN_DELTA: f64 = 2.0;
const AHT_DROP_DELTA: f64 = -0.5;
const ESCALATION_DROP_DELTA: f64 = -2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub key_finding: String,
    pub details: Vec<String>,
    pub actions: Vec<PrioritizedAction>,
    pub positive_trends: Vec<String>,
    pub anomalies: Vec<Anomaly>,
    pub generated_summary: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_context: Option<FilterContext>,
}

impl ExecutiveSummary {
    pub fn no_data(filters: Option<&FilterContext>) -> Self {
        Self {
            key_finding: NO_DATA_MESSAGE.into(),
            details: Vec::new(),
            actions: Vec::new(),
            positive_trends: Vec::new(),
            anomalies: Vec::new(),
            generated_summary: NO_DATA_MESSAGE.into(),
            confidence: 0.0,
            filter_context: filters.cloned(),
        }
    }
}

pub struct NarrativeAssembler {
    config: Arc<InsightConfig>,
    prioritizer: ActionPrioritizer,
}

impl NarrativeAssembler {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self {
            prioritizer: ActionPrioritizer::new(config.clone()),
            config,
        }
    }

    pub fn assemble(
        &self,
        metrics: &MetricsSnapshot,
        root_causes: &[AggregatedRootCause],
        anomalies: &[Anomaly],
        comparison: Option<&PeriodComparison>,
        filters: Option<&FilterContext>,
        rng: &mut dyn PhraseSource,
    ) -> ExecutiveSummary {
        if metrics.total_interactions == 0 {
            return ExecutiveSummary::no_data(filters);
        }

        // Only a comparison that actually carries deltas drives trend text.
        let comparison = comparison.filter(|c| c.has_deltas());
        let top = root_causes.first();

        let key_finding = self.key_finding(metrics, top, comparison);
        let details = self.details(metrics, root_causes, top, comparison, rng);
        let actions = self.prioritizer.prioritize(root_causes, anomalies, metrics);
        let positive_trends = comparison.map(positive_trends).unwrap_or_default();

        let generated_summary =
            self.render(metrics, &key_finding, &details, &actions, &positive_trends, rng);

        log::info!(
            "narrative: {} details, {} actions, {} positive trends",
            details.len(),
            actions.len(),
            positive_trends.len(),
        );

        ExecutiveSummary {
            key_finding,
            details,
            actions,
            positive_trends,
            anomalies: anomalies.to_vec(),
            generated_summary,
            confidence: SUMMARY_CONFIDENCE,
            filter_context: filters.cloned(),
        }
    }

    /// First matching rule wins.
    fn key_finding(
        &self,
        metrics: &MetricsSnapshot,
        top: Option<&AggregatedRootCause>,
        comparison: Option<&PeriodComparison>,
    ) -> String {
        let t = &self.config.thresholds;

        if let Some(comparison) = comparison {
            let change = comparison.absolute(COMPLAINT_RATE);
            if change > t.complaint_rate_change {
                return match top {
                    Some(rc) => format!(
                        "significant complaint increase ({change:+.1}% WoW) driven by {}",
                        rc.root_cause_label
                    ),
                    None => format!(
                        "significant complaint rate increase of {change:+.1}% week-over-week"
                    ),
                };
            }
            if change < -t.complaint_rate_change {
                return format!("notable improvement in complaint rate ({change:.1}% WoW)");
            }
        }

        if metrics.complaint_rate > t.complaint_rate_high {
            return match top {
                Some(rc) => format!(
                    "elevated complaint rate ({:.1}%) with {} as primary driver",
                    metrics.complaint_rate, rc.root_cause_label
                ),
                None => format!("elevated complaint rate at {:.1}%", metrics.complaint_rate),
            };
        }

        if metrics.fcr_rate < t.fcr_rate_low {
            return format!("FCR challenges with {:.1}% resolution rate", metrics.fcr_rate);
        }

        match top {
            Some(rc) => format!(
                "stable operations with {} as top focus area",
                rc.root_cause_label
            ),
            None => "stable performance across key metrics".into(),
        }
    }

    fn details(
        &self,
        metrics: &MetricsSnapshot,
        root_causes: &[AggregatedRootCause],
        top: Option<&AggregatedRootCause>,
        comparison: Option<&PeriodComparison>,
        rng: &mut dyn PhraseSource,
    ) -> Vec<String> {
        let mut details = Vec::new();

        if let Some(comparison) = comparison {
            let delta = comparison.absolute(COMPLAINT_RATE);
            let change = delta.abs();
            let current = metrics.complaint_rate;
            let sentence = if delta > 0.0 {
                let driver = top.map_or("multiple factors", |rc| rc.root_cause_label.as_str());
                phrases::complaint_trend_up(rng, change, current, driver)
            } else if delta < TREND_DOWN_DELTA {
                phrases::complaint_trend_down(rng, change, current)
            } else {
                phrases::complaint_trend_stable(change, current)
            };
            details.push(sentence);
        }

        if metrics.fcr_rate < self.config.thresholds.fcr_rate_low {
            details.push(phrases::fcr_concern(rng, metrics.fcr_rate));
        }

        let concentrated = root_causes
            .iter()
            .filter(|rc| rc.concentration == Concentration::AgentConcentrated)
            .count();
        if concentrated > 0 {
            details.push(phrases::agent_concentration(rng, concentrated));
        }

        details
    }

    fn render(
        &self,
        metrics: &MetricsSnapshot,
        key_finding: &str,
        details: &[String],
        actions: &[PrioritizedAction],
        positive_trends: &[String],
        rng: &mut dyn PhraseSource,
    ) -> String {
        let limits = &self.config.analysis;
        let mut lines = vec![phrases::opening(
            rng,
            metrics.total_interactions,
            metrics.total_complaints,
            &key_finding.to_lowercase(),
        )];

        lines.extend(details.iter().take(limits.max_rendered_details).cloned());

        if !actions.is_empty() {
            lines.push(String::new());
            lines.push(phrases::action_intro(rng).to_string());
            for (n, action) in actions.iter().take(limits.max_rendered_actions).enumerate() {
                let impact = if action.estimated_impact.is_empty() {
                    String::new()
                } else {
                    format!(" (est. impact: {})", action.estimated_impact)
                };
                lines.push(format!("{}. {}{impact}", n + 1, action.text));
            }
        }

        if !positive_trends.is_empty() {
            lines.push(String::new());
            lines.push(format!("**Positive Developments:** {}", positive_trends.join("; ")));
        }

        lines.join("\n")
    }
}

fn positive_trends(comparison: &PeriodComparison) -> Vec<String> {
    let mut trends = Vec::new();

    let fcr = comparison.absolute(FCR_RATE);
    if fcr > FCR_GAIN_DELTA {
        trends.push(format!("FCR improved {fcr:.1}% WoW"));
    }

    let aht = comparison.absolute(AVG_HANDLING_TIME_MINUTES);
    if aht < AHT_DROP_DELTA {
        trends.push(format!("AHT reduced by {:.1} minutes WoW", aht.abs()));
    }

    let escalation = comparison.absolute(ESCALATION_RATE);
    if escalation < ESCALATION_DROP_DELTA {
        trends.push(format!("Escalation rate down {:.1}% WoW", escalation.abs()));
    }

    trends
}
